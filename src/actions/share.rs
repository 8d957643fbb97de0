use crate::error::ShareError;

/// A file offered to the share sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFile {
    /// File name
    pub name: String,
    /// MIME type
    pub mime_type: String,
    /// Contents
    pub bytes: Vec<u8>,
    /// Dialog title
    pub title: String,
    /// Accompanying text
    pub text: String,
}

/// Native share capability
pub trait ShareSheet {
    /// Whether plain text can be shared
    fn supports_text(&self) -> bool;

    /// Whether `file` can be shared
    fn supports_file(&self, file: &SharedFile) -> bool;

    /// Share text. Dismissal is [`ShareError::Cancelled`].
    fn share_text(&mut self, text: &str) -> Result<(), ShareError>;

    /// Share a file. Dismissal is [`ShareError::Cancelled`].
    fn share_file(&mut self, file: &SharedFile) -> Result<(), ShareError>;
}

/// Environment without a share sheet
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedShare;

impl ShareSheet for UnsupportedShare {
    fn supports_text(&self) -> bool {
        false
    }

    fn supports_file(&self, _file: &SharedFile) -> bool {
        false
    }

    fn share_text(&mut self, _text: &str) -> Result<(), ShareError> {
        Err(ShareError::Unsupported)
    }

    fn share_file(&mut self, _file: &SharedFile) -> Result<(), ShareError> {
        Err(ShareError::Unsupported)
    }
}
