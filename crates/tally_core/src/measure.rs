use std::fmt;

/// Result of measuring one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    /// Newline-delimited line count of a successfully fetched body.
    Lines(u64),
    /// Failure status code: the HTTP status for non-200 responses, or the
    /// internal-error code for transport and read failures.
    Failed(u16),
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::Lines(count) => write!(f, "{count}"),
            Measurement::Failed(code) => write!(f, "{code}"),
        }
    }
}

/// Incremental newline counter for bodies delivered in arbitrary chunks.
///
/// A body counts one line per `\n` byte, plus one more if it is non-empty
/// and does not end with `\n`. The count is insensitive to how the body is
/// split into chunks.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineCounter {
    newlines: u64,
    trailing_partial: bool,
}

impl LineCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the next body chunk. Empty chunks are a no-op.
    pub fn push_chunk(&mut self, chunk: &[u8]) {
        let Some(&last) = chunk.last() else { return };
        self.newlines += chunk.iter().filter(|&&byte| byte == b'\n').count() as u64;
        self.trailing_partial = last != b'\n';
    }

    /// Final line count for everything fed so far.
    pub fn finish(self) -> u64 {
        self.newlines + u64::from(self.trailing_partial)
    }
}

/// One-shot line count of a complete body.
pub fn count_lines(body: &[u8]) -> u64 {
    let mut counter = LineCounter::new();
    counter.push_chunk(body);
    counter.finish()
}
