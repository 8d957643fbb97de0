//! Copy, share and download of the current result
//!
//! Every action refuses to act (with a warning toast) when there is no real
//! result: empty text, a status marker, or no generated image yet.

pub mod clipboard;
pub mod download;
pub mod share;

use crate::error::{ActionError, ShareError};
use crate::models::is_actionable;
use crate::notify::Notifier;
use crate::session::EncodeResult;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

pub use clipboard::{Clipboard, SystemClipboard};
pub use download::Downloads;
pub use share::{ShareSheet, SharedFile, UnsupportedShare};

/// File name used for downloaded and shared codes
pub const QR_FILE_NAME: &str = "qrcode.png";

/// What an action ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing to act on; a warning was shown
    Skipped,
    /// Text written to the clipboard
    Copied,
    /// Share sheet completed
    Shared,
    /// User dismissed the share sheet
    Cancelled,
    /// Sharing unavailable; text copied instead
    CopiedInstead,
    /// File saved
    Downloaded(PathBuf),
    /// Sharing unavailable or failed; file saved instead
    DownloadedInstead(PathBuf),
}

/// Result actions wired to a clipboard, a share sheet and a downloads folder
pub struct ResultActions {
    clipboard: Box<dyn Clipboard>,
    share: Box<dyn ShareSheet>,
    downloads: Downloads,
    notifier: Arc<dyn Notifier>,
}

impl ResultActions {
    /// Assemble result actions
    pub fn new(
        clipboard: Box<dyn Clipboard>,
        share: Box<dyn ShareSheet>,
        downloads: Downloads,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            clipboard,
            share,
            downloads,
            notifier,
        }
    }

    /// Copy `text` to the clipboard
    pub fn copy(&mut self, text: &str) -> Result<ActionOutcome, ActionError> {
        if !is_actionable(text) {
            self.notifier.error("⚠️ Nothing to copy yet!");
            return Ok(ActionOutcome::Skipped);
        }
        self.write_clipboard(text)?;
        self.notifier.success("📋 Copied to clipboard!");
        Ok(ActionOutcome::Copied)
    }

    /// Share `text`, falling back to the clipboard when sharing is unavailable
    pub fn share_text(&mut self, text: &str) -> Result<ActionOutcome, ActionError> {
        if !is_actionable(text) {
            self.notifier.error("⚠️ Nothing to share yet!");
            return Ok(ActionOutcome::Skipped);
        }

        if self.share.supports_text() {
            match self.share.share_text(text) {
                Ok(()) => {
                    self.notifier.success("✅ Shared successfully!");
                    return Ok(ActionOutcome::Shared);
                }
                Err(ShareError::Cancelled) => {
                    debug!("share dismissed");
                    return Ok(ActionOutcome::Cancelled);
                }
                Err(ShareError::Unsupported) => {}
                Err(err) => {
                    warn!(error = %err, "text share failed");
                    self.notifier.error(&format!("❌ {err}"));
                    return Err(err.into());
                }
            }
        }

        self.write_clipboard(text)?;
        self.notifier
            .info("📋 Sharing not supported. Text copied to clipboard instead!");
        Ok(ActionOutcome::CopiedInstead)
    }

    /// Share the generated image, falling back to a download
    pub fn share_image(
        &mut self,
        result: Option<&EncodeResult>,
    ) -> Result<ActionOutcome, ActionError> {
        let Some(result) = result else {
            self.notifier.error("⚠️ Generate QR code first!");
            return Ok(ActionOutcome::Skipped);
        };

        let file = SharedFile {
            name: QR_FILE_NAME.to_string(),
            mime_type: "image/png".to_string(),
            bytes: self.png_or_notify(result)?,
            title: "QR Code".to_string(),
            text: "Here is your QR code".to_string(),
        };

        if !self.share.supports_file(&file) {
            let path = self.save_or_notify(&file.bytes)?;
            self.notifier
                .info("📋 Sharing not supported. QR code downloaded instead!");
            return Ok(ActionOutcome::DownloadedInstead(path));
        }

        match self.share.share_file(&file) {
            Ok(()) => {
                self.notifier.success("✅ Shared successfully!");
                Ok(ActionOutcome::Shared)
            }
            Err(ShareError::Cancelled) => {
                debug!("share dismissed");
                Ok(ActionOutcome::Cancelled)
            }
            Err(err) => {
                warn!(error = %err, "image share failed, downloading instead");
                let path = self.save_or_notify(&file.bytes)?;
                self.notifier
                    .info("📋 Sharing failed. QR code downloaded instead!");
                Ok(ActionOutcome::DownloadedInstead(path))
            }
        }
    }

    /// Save the generated image as a PNG file
    pub fn download(&mut self, result: Option<&EncodeResult>) -> Result<ActionOutcome, ActionError> {
        let Some(result) = result else {
            self.notifier.error("⚠️ Generate QR code first!");
            return Ok(ActionOutcome::Skipped);
        };
        let bytes = self.png_or_notify(result)?;
        let path = self.save_or_notify(&bytes)?;
        self.notifier.success("📥 QR Code downloaded!");
        Ok(ActionOutcome::Downloaded(path))
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), ActionError> {
        self.clipboard.write_text(text).inspect_err(|err| {
            warn!(error = %err, "clipboard write failed");
            self.notifier.error(&format!("❌ Copy failed: {err}"));
        })
    }

    fn png_or_notify(&self, result: &EncodeResult) -> Result<Vec<u8>, ActionError> {
        result.to_png().map_err(|err| {
            self.notifier
                .error("❌ An error occurred. Please try downloading instead.");
            ActionError::from(err)
        })
    }

    fn save_or_notify(&self, bytes: &[u8]) -> Result<PathBuf, ActionError> {
        self.downloads.save(QR_FILE_NAME, bytes).inspect_err(|err| {
            self.notifier.error(&format!("❌ Download failed: {err}"));
        })
    }
}
