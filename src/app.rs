//! Page-level composition: sessions, result actions and history behind one
//! explicitly passed [`AppContext`].

use crate::actions::{ActionOutcome, Clipboard, Downloads, ResultActions, ShareSheet};
use crate::config::Settings;
use crate::decoder::ImageDecoder;
use crate::encoder::QrEncoder;
use crate::error::{ActionError, HistoryError, StorageError};
use crate::models::{HistoryEntry, QrStyle};
use crate::notify::Notifier;
use crate::session::{DecodeSession, EncodeSession, EncodeState};
use crate::storage::{FileStore, HistoryStore, KeyValueStore, Preferences, Theme};
use crate::tools::placeholder_data_url;
use std::sync::Arc;
use tracing::warn;

/// Shared storage handle used by pages
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Everything a page needs from its surroundings
#[derive(Clone)]
pub struct AppContext {
    /// Runtime settings
    pub settings: Settings,
    /// Toast sink
    pub notifier: Arc<dyn Notifier>,
    /// Persistent storage
    pub storage: SharedStore,
    /// Display theme loaded from preferences
    pub theme: Theme,
}

impl AppContext {
    /// Context over an existing store; the theme is read from it
    pub fn new(settings: Settings, notifier: Arc<dyn Notifier>, storage: SharedStore) -> Self {
        let theme = Preferences::new(Arc::clone(&storage)).theme();
        Self {
            settings,
            notifier,
            storage,
            theme,
        }
    }

    /// Context backed by a [`FileStore`] in `settings.data_dir`
    pub fn open(settings: Settings, notifier: Arc<dyn Notifier>) -> Result<Self, StorageError> {
        let store: SharedStore = Arc::new(FileStore::open(&settings.data_dir)?);
        Ok(Self::new(settings, notifier, store))
    }

    /// History stored in this context
    pub fn history(&self) -> HistoryStore<SharedStore> {
        HistoryStore::new(Arc::clone(&self.storage))
    }

    /// Preferences stored in this context
    pub fn preferences(&self) -> Preferences<SharedStore> {
        Preferences::new(Arc::clone(&self.storage))
    }

    /// Result actions saving into the configured downloads directory
    pub fn result_actions(
        &self,
        clipboard: Box<dyn Clipboard>,
        share: Box<dyn ShareSheet>,
    ) -> ResultActions {
        ResultActions::new(
            clipboard,
            share,
            Downloads::new(&self.settings.download_dir),
            Arc::clone(&self.notifier),
        )
    }

    /// Flip dark mode, persist it and announce the change
    pub fn toggle_dark_mode(&mut self) -> Result<Theme, StorageError> {
        let theme = self.preferences().toggle_dark_mode()?;
        self.theme = theme;
        let message = if theme.is_dark() {
            "🌙 Dark mode enabled"
        } else {
            "☀️ Light mode enabled"
        };
        self.notifier.info(message);
        Ok(theme)
    }
}

/// Announce the outcome of a history insert
fn report_saved(notifier: &dyn Notifier, result: &Result<usize, HistoryError>) {
    match result {
        Ok(count) => notifier.success(&format!("💾 Saved to history! ({count} items)")),
        Err(HistoryError::EmptyText | HistoryError::ReservedMarker) => {
            notifier.error("⚠️ Nothing to save yet!")
        }
        Err(HistoryError::NothingToSave) => notifier.error("⚠️ Generate QR code first!"),
        Err(err) => {
            warn!(error = %err, "saving history failed");
            notifier.error(&format!("❌ Could not save history: {err}"));
        }
    }
}

/// The scan page: decode session plus copy/share/save of its text
pub struct ScannerPage {
    session: DecodeSession,
    actions: ResultActions,
    history: HistoryStore<SharedStore>,
    notifier: Arc<dyn Notifier>,
}

impl ScannerPage {
    /// Build the page from `context`
    pub fn new(context: &AppContext, decoder: Arc<dyn ImageDecoder>, actions: ResultActions) -> Self {
        Self {
            session: DecodeSession::new(
                decoder,
                Arc::clone(&context.notifier),
                context.settings.scan,
            ),
            actions,
            history: context.history(),
            notifier: Arc::clone(&context.notifier),
        }
    }

    /// Decode session
    pub fn session(&self) -> &DecodeSession {
        &self.session
    }

    /// Decode session, for starting attempts
    pub fn session_mut(&mut self) -> &mut DecodeSession {
        &mut self.session
    }

    /// Text in the result area, markers included
    pub fn displayed_text(&self) -> String {
        self.session.state().display_text()
    }

    /// Copy the displayed text
    pub fn copy(&mut self) -> Result<ActionOutcome, ActionError> {
        let text = self.displayed_text();
        self.actions.copy(&text)
    }

    /// Share the displayed text
    pub fn share(&mut self) -> Result<ActionOutcome, ActionError> {
        let text = self.displayed_text();
        self.actions.share_text(&text)
    }

    /// Save the displayed text as a scanned entry
    pub fn save_to_history(&mut self) -> Result<usize, HistoryError> {
        let text = self.displayed_text();
        let result = placeholder_data_url()
            .map_err(HistoryError::from)
            .and_then(|placeholder| self.history.append(HistoryEntry::scanned(text, placeholder)));
        report_saved(self.notifier.as_ref(), &result);
        result
    }
}

/// The generate page: encode session plus download/share/save of its image
pub struct GeneratorPage {
    session: EncodeSession,
    actions: ResultActions,
    history: HistoryStore<SharedStore>,
    notifier: Arc<dyn Notifier>,
}

impl GeneratorPage {
    /// Build the page from `context`
    pub fn new(context: &AppContext, encoder: Arc<dyn QrEncoder>, actions: ResultActions) -> Self {
        Self {
            session: EncodeSession::new(encoder, Arc::clone(&context.notifier)),
            actions,
            history: context.history(),
            notifier: Arc::clone(&context.notifier),
        }
    }

    /// Encode session
    pub fn session(&self) -> &EncodeSession {
        &self.session
    }

    /// Generate a code from `text`
    pub fn generate(&mut self, text: &str, style: &QrStyle) -> &EncodeState {
        self.session.generate(text, style)
    }

    /// Download the current code
    pub fn download(&mut self) -> Result<ActionOutcome, ActionError> {
        self.actions.download(self.session.current())
    }

    /// Share the current code
    pub fn share(&mut self) -> Result<ActionOutcome, ActionError> {
        self.actions.share_image(self.session.current())
    }

    /// Save the current code as a generated entry
    pub fn save_to_history(&mut self) -> Result<usize, HistoryError> {
        let result = match self.session.current() {
            None => Err(HistoryError::NothingToSave),
            Some(current) => current
                .to_data_url()
                .map_err(HistoryError::from)
                .and_then(|image| {
                    self.history
                        .append(HistoryEntry::generated(&current.text, image, &current.style))
                }),
        };
        report_saved(self.notifier.as_ref(), &result);
        result
    }

    /// Saved entries, newest first, with a summary toast
    pub fn view_history(&self) -> Vec<HistoryEntry> {
        let entries = self.history.load_all();
        if entries.is_empty() {
            self.notifier.info("📭 No history yet!");
        } else {
            self.notifier
                .info(&format!("📜 You have {} saved QR codes.", entries.len()));
        }
        entries
    }
}
