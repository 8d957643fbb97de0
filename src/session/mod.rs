//! Decode and encode sessions
//!
//! A session owns the state of the result area for one page. Each attempt is
//! numbered; finishing an attempt that is no longer the latest is ignored, so
//! a superseded attempt can never overwrite a newer result.

pub mod decode;
pub mod encode;

pub use decode::{DecodeSession, Upload};
pub use encode::{EncodeResult, EncodeSession, EncodeState};

/// Identifies one decode or encode attempt within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptId(u64);

/// Hands out attempt ids and remembers the latest
#[derive(Debug, Default)]
pub(crate) struct AttemptCounter {
    latest: u64,
}

impl AttemptCounter {
    pub(crate) fn next(&mut self) -> AttemptId {
        self.latest += 1;
        AttemptId(self.latest)
    }

    pub(crate) fn current(&self) -> AttemptId {
        AttemptId(self.latest)
    }

    pub(crate) fn is_current(&self, attempt: AttemptId) -> bool {
        attempt.0 == self.latest
    }
}
