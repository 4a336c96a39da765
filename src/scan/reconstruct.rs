//! Line reconstruction across chunk boundaries.
//!
//! Chunks arrive back to front, so the bytes in front of a chunk's first
//! newline may belong to a line that started in an earlier, unread chunk. That
//! prefix is carried as the leftover and glued onto the end of the next chunk.
//! The leftover stays raw bytes until its line is complete, which keeps
//! multi-byte UTF-8 sequences split at a boundary intact.

use memchr::{memchr, memrchr};
use std::collections::VecDeque;

/// Output of one reconstruction step
#[derive(Debug)]
pub struct Reconstructed {
    /// Complete lines of this step, newest first
    pub lines: CandidateLines,
    /// Bytes before the first newline; not yet known to be a whole line
    pub leftover: Leftover,
}

/// The unfinished start of a line, held as chunk segments in file order
///
/// A line spanning many chunks grows by pushing each new chunk to the front.
/// The segments are joined once, when the line's start is finally found.
#[derive(Debug, Default)]
pub struct Leftover {
    segments: VecDeque<Vec<u8>>,
    len: usize,
}

impl Leftover {
    /// Prepend a segment that precedes everything already held
    pub fn push_front(&mut self, segment: Vec<u8>) {
        if segment.is_empty() {
            return;
        }
        self.len += segment.len();
        self.segments.push_front(segment);
    }

    /// Total bytes held
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Append the held bytes, in file order, to `buffer`
    fn append_to(self, buffer: &mut Vec<u8>) {
        buffer.reserve(self.len);
        for segment in self.segments {
            buffer.extend_from_slice(&segment);
        }
    }

    /// Join the segments into one buffer
    pub fn into_bytes(mut self) -> Vec<u8> {
        if self.segments.len() == 1 {
            return self.segments.pop_front().unwrap_or_default();
        }
        let mut bytes = Vec::new();
        self.append_to(&mut bytes);
        bytes
    }
}

impl From<Vec<u8>> for Leftover {
    fn from(bytes: Vec<u8>) -> Self {
        let mut leftover = Self::default();
        leftover.push_front(bytes);
        leftover
    }
}

/// Combine a chunk with the leftover from the later chunk and split it
///
/// `chunk` must immediately precede `leftover` in the file. The first
/// newline-delimited piece becomes the new leftover; everything after it is a
/// complete line and is yielded last-line-first. Each leftover byte is copied
/// at most once, when its line completes.
pub fn reconstruct(mut chunk: Vec<u8>, mut leftover: Leftover) -> Reconstructed {
    match memchr(b'\n', &chunk) {
        Some(first_newline) => {
            let mut rest = chunk.split_off(first_newline + 1);
            chunk.truncate(first_newline);
            leftover.append_to(&mut rest);
            Reconstructed {
                lines: CandidateLines::new(rest),
                leftover: Leftover::from(chunk),
            }
        }
        None => {
            leftover.push_front(chunk);
            Reconstructed {
                lines: CandidateLines::empty(),
                leftover,
            }
        }
    }
}

/// Trim surrounding whitespace and byte-order marks from a line
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Decode and trim one complete line
///
/// Invalid UTF-8 is replaced rather than rejected. Trimming also strips the
/// `\r` of CRLF endings and a leading BOM.
pub fn decode_line(bytes: &[u8]) -> String {
    trim_line(&String::from_utf8_lossy(bytes)).to_string()
}

/// Lazily yields the complete lines of one step, newest first
///
/// Lines are decoded on demand so a scan that fills its result set early does
/// not pay for decoding the rest of the chunk.
#[derive(Debug)]
pub struct CandidateLines {
    buffer: Vec<u8>,
    /// Exclusive end of the next line to yield; `None` when finished
    end: Option<usize>,
}

impl CandidateLines {
    fn new(buffer: Vec<u8>) -> Self {
        let end = Some(buffer.len());
        Self { buffer, end }
    }

    fn empty() -> Self {
        Self {
            buffer: Vec::new(),
            end: None,
        }
    }
}

impl Iterator for CandidateLines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let end = self.end?;
        let (start, next_end) = match memrchr(b'\n', &self.buffer[..end]) {
            Some(newline) => (newline + 1, Some(newline)),
            None => (0, None),
        };

        self.end = next_end;
        Some(decode_line(&self.buffer[start..end]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(chunk: &str, leftover: &str) -> (Vec<String>, String) {
        let leftover = Leftover::from(leftover.as_bytes().to_vec());
        let step = reconstruct(chunk.as_bytes().to_vec(), leftover);
        let lines = step.lines.collect();
        (lines, String::from_utf8(step.leftover.into_bytes()).unwrap())
    }

    #[test]
    fn test_lines_come_out_newest_first() {
        let (lines, leftover) = run("head\nA\nB\nC", "");
        assert_eq!(lines, vec!["C", "B", "A"]);
        assert_eq!(leftover, "head");
    }

    #[test]
    fn test_leftover_completes_split_line() {
        // "...partial li" + "ne\nnext" where the later chunk left "ne"
        let (lines, leftover) = run("x\nfirst\nsplit li", "ne");
        assert_eq!(lines, vec!["split line", "first"]);
        assert_eq!(leftover, "x");
    }

    #[test]
    fn test_chunk_without_newline_is_all_leftover() {
        let (lines, leftover) = run("middle of a long", " line");
        assert!(lines.is_empty());
        assert_eq!(leftover, "middle of a long line");
    }

    #[test]
    fn test_trailing_newline_yields_empty_candidate() {
        let (lines, leftover) = run("a\nb\n", "");
        assert_eq!(lines, vec!["", "b"]);
        assert_eq!(leftover, "a");
    }

    #[test]
    fn test_lines_are_trimmed() {
        let (lines, _) = run("\n  padded  \r\nwin\r", "");
        assert_eq!(lines, vec!["win", "padded"]);
    }

    #[test]
    fn test_split_multibyte_character() {
        let text = "x\nnaïve";
        let bytes = text.as_bytes();
        // Split inside the two-byte 'ï'
        let cut = text.find('ï').unwrap() + 1;

        let later = reconstruct(bytes[cut..].to_vec(), Leftover::default());
        assert_eq!(later.lines.count(), 0);

        let earlier = reconstruct(bytes[..cut].to_vec(), later.leftover);
        let lines: Vec<String> = earlier.lines.collect();
        assert_eq!(lines, vec!["naïve"]);
        assert_eq!(earlier.leftover.into_bytes(), b"x");
    }

    #[test]
    fn test_long_line_segments_are_not_joined_until_complete() {
        // "x\nabcdef" read back to front in two-byte chunks
        let mut leftover = Leftover::default();
        for chunk in ["ef", "cd", "ab"] {
            let step = reconstruct(chunk.as_bytes().to_vec(), leftover);
            assert_eq!(step.lines.count(), 0);
            leftover = step.leftover;
        }
        assert_eq!(leftover.segment_count(), 3);
        assert_eq!(leftover.len(), 6);

        let step = reconstruct(b"x\n".to_vec(), leftover);
        let lines: Vec<String> = step.lines.collect();
        assert_eq!(lines, vec!["abcdef"]);
        assert_eq!(step.leftover.into_bytes(), b"x");
    }

    #[test]
    fn test_trim_line_strips_byte_order_mark() {
        assert_eq!(trim_line("\u{feff}first"), "first");
        assert_eq!(trim_line(" \u{feff} "), "");
        assert_eq!(trim_line("mid\u{feff}dle\r"), "mid\u{feff}dle");
        assert_eq!(
            decode_line("\u{feff}2024-12-19 INFO: up\r".as_bytes()),
            "2024-12-19 INFO: up"
        );
    }

    #[test]
    fn test_decode_line_replaces_invalid_utf8() {
        assert_eq!(decode_line(b"ok \xff end "), "ok \u{fffd} end");
    }
}
