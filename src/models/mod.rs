/// Persisted history records
pub mod history_entry;
/// Decode outcomes and result-area markers
pub mod outcome;
/// Colors and rendering style
pub mod style;

pub use history_entry::{EntryKind, HistoryEntry};
pub use outcome::{DecodeFailure, DecodeResult, DecodeState, is_actionable, is_reserved_marker};
pub use style::{Color, ErrorCorrection, QrStyle};
