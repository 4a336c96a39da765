//! Keyword filter for candidate lines.

use crate::error::Result;
use crate::scan::query::normalize_keyword;
use crate::scan::reconstruct::trim_line;
use memchr::memmem::Finder;

/// Case-sensitive literal substring filter
///
/// Blank lines are never accepted. Without a keyword every other line is.
#[derive(Debug, Clone, Default)]
pub struct KeywordFilter {
    finder: Option<Finder<'static>>,
}

impl KeywordFilter {
    /// Build a filter from a raw keyword, trimming it first
    ///
    /// # Errors
    /// * `LogrevError::InvalidQuery` if the keyword is empty or all whitespace
    pub fn parse(keyword: Option<&str>) -> Result<Self> {
        Ok(Self::from_normalized(normalize_keyword(keyword)?.as_deref()))
    }

    /// Build a filter from an already trimmed keyword
    ///
    /// An empty keyword disables filtering.
    pub fn from_normalized(keyword: Option<&str>) -> Self {
        let finder = keyword
            .filter(|keyword| !keyword.is_empty())
            .map(|keyword| Finder::new(keyword.as_bytes()).into_owned());
        Self { finder }
    }

    /// A filter that only drops blank lines
    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn keyword(&self) -> Option<&str> {
        // Finder needles come from &str, so they are valid UTF-8.
        self.finder
            .as_ref()
            .and_then(|finder| std::str::from_utf8(finder.needle()).ok())
    }

    /// Decide whether `line` should be kept
    pub fn accepts(&self, line: &str) -> bool {
        let line = trim_line(line);
        if line.is_empty() {
            return false;
        }

        match &self.finder {
            Some(finder) => finder.find(line.as_bytes()).is_some(),
            None => true,
        }
    }
}

/// Stateless form of [`KeywordFilter::accepts`]
pub fn accepts(line: &str, keyword: Option<&str>) -> bool {
    KeywordFilter::from_normalized(keyword).accepts(line)
}
