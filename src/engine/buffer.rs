//! The mutable line buffer backing one apply call
//!
//! All index bookkeeping lives here: directive line numbers are 1-based,
//! padding and splicing keep the buffer a finite sequence of lines, and
//! nothing is ever truncated implicitly. The buffer is exclusively owned by
//! the running apply call.

use regex::Regex;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a target file's decoded text. Splitting on `\n` keeps a
    /// trailing empty element for newline-terminated files, which mirrors
    /// how the buffer serializes back with `join`.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Serialize for the single final write.
    pub fn into_text(self) -> String {
        self.lines.join("\n")
    }

    /// Grow with empty lines until at least `len` lines exist.
    pub fn pad_to(&mut self, len: usize) {
        while self.lines.len() < len {
            self.lines.push(String::new());
        }
    }

    /// Store `content` into the 1-based `line` slot, padding as needed.
    ///
    /// Multi-line content is embedded into the single slot as-is; embedded
    /// breaks surface as separate lines only at serialization time.
    pub fn set_line(&mut self, line: usize, content: &str) {
        self.pad_to(line);
        self.lines[line - 1] = content.to_string();
    }

    /// Replace the inclusive 1-based range `start..=end` with `content`'s
    /// lines, padding first so the range exists. The buffer length shifts by
    /// the difference between the replacement and the range it covers.
    pub fn replace_range(&mut self, start: usize, end: usize, content: &str) {
        self.pad_to(end);
        self.lines
            .splice(start - 1..end, content.split('\n').map(str::to_string));
    }

    /// Replace every line matching `pattern` with `content`'s lines.
    ///
    /// The scan always runs on current, post-edit indices and steps the
    /// cursor over freshly inserted lines, so replacement text is never
    /// re-matched. Matching is unanchored substring search; patterns that
    /// want full-line semantics must self-anchor. Returns the number of
    /// lines replaced.
    pub fn replace_matching(&mut self, pattern: &Regex, content: &str) -> usize {
        let replacement: Vec<String> = content.split('\n').map(str::to_string).collect();
        let mut i = 0;
        let mut replaced = 0;
        while i < self.lines.len() {
            if pattern.is_match(&self.lines[i]) {
                self.lines.splice(i..=i, replacement.iter().cloned());
                i += replacement.len();
                replaced += 1;
            } else {
                i += 1;
            }
        }
        replaced
    }

    /// Add `content`'s lines at the end.
    pub fn append(&mut self, content: &str) {
        self.lines.extend(content.split('\n').map(str::to_string));
    }

    /// Insert `content`'s lines at the start.
    pub fn prepend(&mut self, content: &str) {
        self.lines
            .splice(0..0, content.split('\n').map(str::to_string));
    }

    /// Discard everything and start over with `content`'s lines.
    pub fn replace_all(&mut self, content: &str) {
        self.lines = content.split('\n').map(str::to_string).collect();
    }
}
