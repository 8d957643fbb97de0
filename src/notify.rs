//! Transient user-facing status messages

use std::sync::Mutex;
use tracing::debug;

/// Toast flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Operation completed
    Success,
    /// Neutral information
    Info,
    /// Warning or failure the user should act on
    Error,
}

/// One status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Flavour
    pub kind: ToastKind,
    /// Text shown to the user
    pub message: String,
}

impl Toast {
    /// Create a toast
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Shows toasts to the user. Retains nothing.
pub trait Notifier: Send + Sync {
    /// Display `toast`
    fn show(&self, toast: Toast);

    /// Display a success toast
    fn success(&self, message: &str) {
        self.show(Toast::new(ToastKind::Success, message));
    }

    /// Display an informational toast
    fn info(&self, message: &str) {
        self.show(Toast::new(ToastKind::Info, message));
    }

    /// Display an error or warning toast
    fn error(&self, message: &str) {
        self.show(Toast::new(ToastKind::Error, message));
    }
}

/// Writes toasts to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show(&self, toast: Toast) {
        debug!(kind = ?toast.kind, message = %toast.message, "toast");
        eprintln!("{}", toast.message);
    }
}

/// Keeps every toast in memory; useful for tests and headless callers
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All toasts shown so far, oldest first
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Most recent toast
    pub fn last(&self) -> Option<Toast> {
        self.toasts.lock().unwrap_or_else(|e| e.into_inner()).last().cloned()
    }

    /// Forget recorded toasts
    pub fn clear(&self) {
        self.toasts.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, toast: Toast) {
        self.toasts.lock().unwrap_or_else(|e| e.into_inner()).push(toast);
    }
}
