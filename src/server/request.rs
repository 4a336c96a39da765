//! HTTP request types for the log server.

use serde::Deserialize;

use crate::error::{LogrevError, Result};
use crate::scan::LogQuery;

/// Query parameters for `GET /logs`.
///
/// Everything arrives as an optional string so malformed values are reported
/// through the same error body as every other invalid query.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsParams {
    /// Log file name relative to the log directory.
    pub file_name: Option<String>,
    /// Case-sensitive substring filter.
    pub keyword: Option<String>,
    /// Maximum number of lines to return (default 10).
    pub limit: Option<String>,
}

impl LogsParams {
    /// Validate the parameters into a [`LogQuery`].
    pub fn into_query(self) -> Result<LogQuery> {
        let file_name = self
            .file_name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| LogrevError::invalid_query("fileName is required"))?;

        let limit = match self.limit.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<usize>()
                    .map_err(|_| LogrevError::invalid_query("limit must be a positive integer"))?,
            ),
        };

        LogQuery::new(file_name, self.keyword.as_deref(), limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(file_name: Option<&str>, keyword: Option<&str>, limit: Option<&str>) -> LogsParams {
        LogsParams {
            file_name: file_name.map(String::from),
            keyword: keyword.map(String::from),
            limit: limit.map(String::from),
        }
    }

    #[test]
    fn should_build_query_with_defaults() {
        // given
        let params = params(Some("app.log"), None, None);

        // when
        let query = params.into_query().unwrap();

        // then
        assert_eq!(query.file_identifier(), "app.log");
        assert_eq!(query.keyword(), None);
        assert_eq!(query.limit().get(), 10);
    }

    #[test]
    fn should_parse_limit_and_trim_keyword() {
        let query = params(Some("app.log"), Some(" ERROR "), Some("25"))
            .into_query()
            .unwrap();

        assert_eq!(query.keyword(), Some("ERROR"));
        assert_eq!(query.limit().get(), 25);
    }

    #[test]
    fn should_treat_empty_limit_as_default() {
        let query = params(Some("app.log"), None, Some("")).into_query().unwrap();
        assert_eq!(query.limit().get(), 10);
    }

    #[test]
    fn should_reject_missing_file_name() {
        for file_name in [None, Some("")] {
            let err = params(file_name, None, None).into_query().unwrap_err();
            assert_eq!(err.to_string(), "fileName is required");
        }
    }

    #[test]
    fn should_reject_bad_limits() {
        for limit in ["0", "-3", "ten", "1.5"] {
            let err = params(Some("app.log"), None, Some(limit))
                .into_query()
                .unwrap_err();
            assert!(matches!(err, LogrevError::InvalidQuery { .. }), "limit {limit}");
        }
    }
}
