use crate::error::ActionError;

/// Writes text to a clipboard
pub trait Clipboard {
    /// Replace the clipboard contents with `text`
    fn write_text(&mut self, text: &str) -> Result<(), ActionError>;
}

/// The system clipboard, opened on first use
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Clipboard that connects lazily
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ActionError> {
        let clipboard = match self.inner.as_mut() {
            Some(clipboard) => clipboard,
            None => {
                let opened = arboard::Clipboard::new()
                    .map_err(|err| ActionError::Clipboard(err.to_string()))?;
                self.inner.insert(opened)
            }
        };
        clipboard
            .set_text(text.to_owned())
            .map_err(|err| ActionError::Clipboard(err.to_string()))
    }
}
