//! Bounded result sink.

use std::num::NonZeroUsize;

/// Upper bound on up-front allocation; larger limits grow on demand
const MAX_PREALLOCATED_LINES: usize = 1024;

/// Collects accepted lines in offer order until `limit` is reached
#[derive(Debug, Clone)]
pub struct ResultCollector {
    lines: Vec<String>,
    limit: usize,
}

impl ResultCollector {
    pub fn new(limit: NonZeroUsize) -> Self {
        let limit = limit.get();
        Self {
            lines: Vec::with_capacity(limit.min(MAX_PREALLOCATED_LINES)),
            limit,
        }
    }

    /// Append `line` if there is room
    ///
    /// # Returns
    /// * `true` while the collector wants more lines
    /// * `false` once it holds `limit` lines; further offers are ignored
    pub fn offer(&mut self, line: String) -> bool {
        if self.lines.len() < self.limit {
            self.lines.push(line);
        }
        !self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.lines.len() >= self.limit
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Finish collecting and hand back the lines in offer order
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
