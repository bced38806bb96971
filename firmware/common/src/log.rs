//! Event log for the mesh screen.
//!
//! Keeps the last few screen events (touches, probe progress, ignored input)
//! in a fixed ring buffer so a debug view or a test can inspect them. With the
//! `defmt` feature every event is also forwarded to `defmt::debug!`.
//!
//! Messages go through [`log_event!`], which formats into a stack buffer and
//! truncates instead of allocating. Format strings passed to it must stay
//! within the syntax `defmt` accepts (plain `{}` placeholders).

use heapless::{Deque, String};

// =============================================================================
// Event Log Configuration
// =============================================================================

/// Maximum number of lines kept in the ring buffer.
pub const LOG_BUFFER_SIZE: usize = 8;

/// Maximum characters per line.
pub const LOG_LINE_LENGTH: usize = 48;

// =============================================================================
// Event Log Ring Buffer
// =============================================================================

/// Ring buffer of the most recent `LOG_BUFFER_SIZE` events.
///
/// The oldest line is dropped when the buffer is full.
#[derive(Clone, Debug)]
pub struct EventLog {
    buffer: Deque<String<LOG_LINE_LENGTH>, LOG_BUFFER_SIZE>,
    pushed: u32,
}

impl EventLog {
    pub const fn new() -> Self {
        Self {
            buffer: Deque::new(),
            pushed: 0,
        }
    }

    /// Append a line, truncating it to `LOG_LINE_LENGTH` characters.
    pub fn push(
        &mut self,
        msg: &str,
    ) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }

        let mut line: String<LOG_LINE_LENGTH> = String::new();
        for c in msg.chars() {
            if line.push(c).is_err() {
                break;
            }
        }

        self.buffer.push_back(line).ok();
        self.pushed = self.pushed.wrapping_add(1);
    }

    /// Lines from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.buffer.iter().map(|line| line.as_str()) }

    /// Most recent line.
    pub fn last(&self) -> Option<&str> { self.buffer.back().map(|line| line.as_str()) }

    /// Lines pushed since creation, including dropped ones.
    ///
    /// Lets a reader that polls the log tell how many lines are new.
    #[inline]
    pub const fn pushed(&self) -> u32 { self.pushed }

    /// Lines pushed after a reader saw `seen` total, oldest first.
    ///
    /// Lines already dropped from the buffer are skipped.
    pub fn since(
        &self,
        seen: u32,
    ) -> impl Iterator<Item = &str> {
        let new = (self.pushed.wrapping_sub(seen) as usize).min(self.buffer.len());
        self.iter().skip(self.buffer.len() - new)
    }

    #[inline]
    pub fn len(&self) -> usize { self.buffer.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }

    pub fn clear(&mut self) { self.buffer.clear(); }
}

impl Default for EventLog {
    fn default() -> Self { Self::new() }
}

/// Format a line into an [`EventLog`] and mirror it to `defmt` when enabled.
macro_rules! log_event {
    ($log:expr, $($arg:tt)*) => {{
        use core::fmt::Write as _;
        let mut line: heapless::String<{ $crate::log::LOG_LINE_LENGTH }> = heapless::String::new();
        write!(line, $($arg)*).ok();
        $log.push(line.as_str());
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
    }};
}

// =============================================================================
// Unit Tests
// =============================================================================
