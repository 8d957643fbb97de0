//! Copy, share and download: marker guards and share fallbacks

mod common;

use common::{FakeClipboard, FakeShare, ShareMode, all_markers, fake_actions, png, qr_image};
use qr_studio::actions::{ActionOutcome, Downloads, ResultActions, UnsupportedShare};
use qr_studio::app::AppContext;
use qr_studio::config::Settings;
use qr_studio::error::ActionError;
use qr_studio::notify::{RecordingNotifier, ToastKind};
use qr_studio::session::{EncodeResult, Upload};
use qr_studio::storage::MemoryStore;
use qr_studio::{QrStyle, RqrrDecoder, ScannerPage, encode_text};
use std::path::Path;
use std::sync::Arc;

fn generated(text: &str) -> EncodeResult {
    let style = QrStyle::default();
    EncodeResult {
        text: text.to_string(),
        style,
        image: encode_text(text, &style).unwrap(),
    }
}

struct Harness {
    actions: ResultActions,
    clipboard: FakeClipboard,
    share: FakeShare,
    notifier: Arc<RecordingNotifier>,
}

fn harness(dir: &Path, mode: ShareMode) -> Harness {
    let clipboard = FakeClipboard::default();
    let share = FakeShare::new(mode);
    let notifier = Arc::new(RecordingNotifier::new());
    let actions = fake_actions(&clipboard, &share, dir, &notifier);
    Harness {
        actions,
        clipboard,
        share,
        notifier,
    }
}

#[test]
fn markers_are_never_copied_or_shared() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = harness(dir.path(), ShareMode::Accept);

    let markers = all_markers();
    assert_eq!(markers.len(), 8);
    for marker in markers.iter().map(String::as_str).chain(["", "   "]) {
        assert_eq!(h.actions.copy(marker).unwrap(), ActionOutcome::Skipped, "{marker}");
        assert_eq!(h.actions.share_text(marker).unwrap(), ActionOutcome::Skipped, "{marker}");
    }

    assert!(h.clipboard.written().is_empty());
    assert!(h.share.texts.lock().unwrap().is_empty());
    assert!(h.notifier.toasts().iter().all(|t| t.kind == ToastKind::Error));
}

#[test]
fn real_text_is_copied() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = harness(dir.path(), ShareMode::Accept);

    assert_eq!(h.actions.copy("https://example.com").unwrap(), ActionOutcome::Copied);
    assert_eq!(h.clipboard.written(), vec!["https://example.com"]);
    assert_eq!(h.notifier.last().unwrap().message, "📋 Copied to clipboard!");
}

#[test]
fn clipboard_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let clipboard = FakeClipboard {
        fail: true,
        ..FakeClipboard::default()
    };
    let notifier = Arc::new(RecordingNotifier::new());
    let mut actions = fake_actions(&clipboard, &FakeShare::new(ShareMode::Accept), dir.path(), &notifier);

    assert!(matches!(actions.copy("text"), Err(ActionError::Clipboard(_))));
    assert_eq!(notifier.last().unwrap().kind, ToastKind::Error);
}

#[test]
fn text_share_falls_back_to_the_clipboard() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = harness(dir.path(), ShareMode::Unsupported);

    assert_eq!(h.actions.share_text("hello").unwrap(), ActionOutcome::CopiedInstead);
    assert_eq!(h.clipboard.written(), vec!["hello"]);
    assert_eq!(
        h.notifier.last().unwrap().message,
        "📋 Sharing not supported. Text copied to clipboard instead!"
    );
}

#[test]
fn dismissed_share_is_silent() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = harness(dir.path(), ShareMode::Cancel);

    assert_eq!(h.actions.share_text("hello").unwrap(), ActionOutcome::Cancelled);
    assert_eq!(
        h.actions.share_image(Some(&generated("hi"))).unwrap(),
        ActionOutcome::Cancelled
    );
    assert!(h.notifier.toasts().is_empty());
    assert!(h.clipboard.written().is_empty());
}

#[test]
fn image_share_sends_a_png_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = harness(dir.path(), ShareMode::Accept);

    assert_eq!(
        h.actions.share_image(Some(&generated("hi"))).unwrap(),
        ActionOutcome::Shared
    );
    let files = h.share.files.lock().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "qrcode.png");
    assert_eq!(files[0].mime_type, "image/png");
    assert!(files[0].bytes.starts_with(b"\x89PNG"));
}

#[test]
fn image_share_downloads_when_files_are_unsupported_or_fail() {
    for mode in [ShareMode::Unsupported, ShareMode::TextOnly, ShareMode::Fail] {
        let dir = tempfile::tempdir().unwrap();
        let mut h = harness(dir.path(), mode);

        let outcome = h.actions.share_image(Some(&generated("hi"))).unwrap();
        let ActionOutcome::DownloadedInstead(path) = &outcome else {
            panic!("{mode:?}: unexpected outcome {outcome:?}");
        };
        assert!(path.starts_with(dir.path()));
        assert!(path.exists());
    }
}

#[test]
fn repeated_downloads_do_not_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = harness(dir.path(), ShareMode::Accept);
    let result = generated("again");

    let first = h.actions.download(Some(&result)).unwrap();
    let second = h.actions.download(Some(&result)).unwrap();

    assert_eq!(first, ActionOutcome::Downloaded(dir.path().join("qrcode.png")));
    assert_eq!(second, ActionOutcome::Downloaded(dir.path().join("qrcode (1).png")));
}

#[tokio::test]
async fn scanner_page_acts_on_decoded_text_only() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = Arc::new(RecordingNotifier::new());
    let mut settings = Settings::from_lookup(|_| None);
    settings.download_dir = dir.path().to_path_buf();
    let ctx = AppContext::new(settings, notifier.clone(), Arc::new(MemoryStore::new()));
    let clipboard = FakeClipboard::default();
    let actions = fake_actions(&clipboard, &FakeShare::new(ShareMode::Unsupported), dir.path(), &notifier);
    let mut page = ScannerPage::new(&ctx, Arc::new(RqrrDecoder::new()), actions);

    // Idle placeholder: nothing to copy or save
    assert_eq!(page.copy().unwrap(), ActionOutcome::Skipped);
    assert!(page.save_to_history().is_err());

    let upload = Upload::new("code.png", png(&qr_image("SCANNED", 200)));
    page.session_mut().decode_upload(Some(upload)).await;

    assert_eq!(page.copy().unwrap(), ActionOutcome::Copied);
    assert_eq!(page.share().unwrap(), ActionOutcome::CopiedInstead);
    assert_eq!(clipboard.written(), vec!["SCANNED", "SCANNED"]);

    assert_eq!(page.save_to_history().unwrap(), 1);
    let entries = ctx.history().load_all();
    assert_eq!(entries[0].text, "SCANNED");
    assert_eq!(entries[0].kind, qr_studio::EntryKind::Scanned);
}

#[tokio::test]
async fn scanner_page_surfaces_a_failed_copy_as_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = Arc::new(RecordingNotifier::new());
    let ctx = AppContext::new(
        Settings::from_lookup(|_| None),
        notifier.clone(),
        Arc::new(MemoryStore::new()),
    );
    let clipboard = FakeClipboard {
        fail: true,
        ..FakeClipboard::default()
    };
    let actions = fake_actions(&clipboard, &FakeShare::new(ShareMode::Unsupported), dir.path(), &notifier);
    let mut page = ScannerPage::new(&ctx, Arc::new(RqrrDecoder::new()), actions);

    let upload = Upload::new("code.png", png(&qr_image("SCANNED", 200)));
    page.session_mut().decode_upload(Some(upload)).await;

    assert!(matches!(page.copy(), Err(ActionError::Clipboard(_))));
    assert_eq!(notifier.last().unwrap().kind, ToastKind::Error);
    // Share falls back to the same broken clipboard
    assert!(matches!(page.share(), Err(ActionError::Clipboard(_))));
    assert!(clipboard.written().is_empty());
}

#[test]
fn unsupported_share_never_shares() {
    let dir = tempfile::tempdir().unwrap();
    let clipboard = FakeClipboard::default();
    let notifier = Arc::new(RecordingNotifier::new());
    let mut actions = ResultActions::new(
        Box::new(clipboard.clone()),
        Box::new(UnsupportedShare),
        Downloads::new(dir.path()),
        notifier,
    );
    assert_eq!(actions.share_text("x").unwrap(), ActionOutcome::CopiedInstead);
}
