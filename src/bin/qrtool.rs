use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use qr_studio::actions::{SystemClipboard, UnsupportedShare};
use qr_studio::camera::{FrameDirectoryCamera, ScanBox};
use qr_studio::config::Settings;
use qr_studio::notify::ConsoleNotifier;
use qr_studio::session::{EncodeState, Upload};
use qr_studio::tools::decode_batch;
use qr_studio::{
    AppContext, Color, DecodeState, ErrorCorrection, GeneratorPage, QrStyle, QrcodeEncoder,
    RqrrDecoder, ScannerPage,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "qrtool", version, about = "Scan and generate QR codes")]
struct Cli {
    /// Directory holding history and preferences
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Directory downloads are written to
    #[arg(long, global = true)]
    download_dir: Option<PathBuf>,
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode QR codes from image files
    Decode {
        /// Images to decode; more than one runs in parallel
        #[arg(required = true)]
        images: Vec<PathBuf>,
        /// Copy the decoded text
        #[arg(long)]
        copy: bool,
        /// Share the decoded text
        #[arg(long)]
        share: bool,
        /// Save the decoded text to history
        #[arg(long)]
        save: bool,
    },
    /// Scan frames from a camera frame directory until one decodes
    Scan {
        /// Directory of frame images, read in path order
        #[arg(long)]
        frames: PathBuf,
        /// Frames scanned per second
        #[arg(long)]
        fps: Option<u32>,
        /// Side of the central detection box in pixels
        #[arg(long = "box")]
        scan_box: Option<u32>,
        /// Copy the decoded text
        #[arg(long)]
        copy: bool,
        /// Save the decoded text to history
        #[arg(long)]
        save: bool,
    },
    /// Generate a QR code
    Encode {
        /// Text to encode
        text: String,
        /// Dark module color
        #[arg(long, default_value = "#000000")]
        fg: Color,
        /// Background color
        #[arg(long, default_value = "#ffffff")]
        bg: Color,
        /// Width in pixels
        #[arg(long, default_value_t = 256)]
        width: u32,
        /// Error correction: L, M, Q or H
        #[arg(long, default_value = "M")]
        ec: ErrorCorrection,
        /// Quiet zone in modules
        #[arg(long, default_value_t = 2)]
        margin: u32,
        /// Share the image (downloads when sharing is unavailable)
        #[arg(long)]
        share: bool,
        /// Skip saving the PNG into the downloads directory
        #[arg(long)]
        no_download: bool,
        /// Save the code to history
        #[arg(long)]
        save: bool,
    },
    /// Show or clear saved history
    History {
        /// Remove every entry
        #[arg(long)]
        clear: bool,
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or toggle the dark-mode preference
    Theme {
        /// Flip the stored preference
        #[arg(long)]
        toggle: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::from_env();
    if let Some(dir) = cli.data_dir.clone() {
        settings.data_dir = dir;
    }
    if let Some(dir) = cli.download_dir.clone() {
        settings.download_dir = dir;
    }

    let log_level = if cli.verbose || settings.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("qr_studio={log_level},qrtool={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let context = AppContext::open(settings, Arc::new(ConsoleNotifier))
        .context("failed to open data directory")?;

    match cli.command {
        Command::Decode {
            images,
            copy,
            share,
            save,
        } => decode_cmd(&context, images, copy, share, save).await,
        Command::Scan {
            frames,
            fps,
            scan_box,
            copy,
            save,
        } => scan_cmd(context, frames, fps, scan_box, copy, save).await,
        Command::Encode {
            text,
            fg,
            bg,
            width,
            ec,
            margin,
            share,
            no_download,
            save,
        } => {
            let style = QrStyle {
                foreground: fg,
                background: bg,
                width,
                error_correction: ec,
                margin,
            };
            encode_cmd(&context, &text, &style, share, !no_download, save)
        }
        Command::History { clear, json } => history_cmd(&context, clear, json),
        Command::Theme { toggle } => theme_cmd(context, toggle),
    }
}

fn scanner_page(context: &AppContext) -> ScannerPage {
    let actions =
        context.result_actions(Box::new(SystemClipboard::new()), Box::new(UnsupportedShare));
    ScannerPage::new(context, Arc::new(RqrrDecoder::new()), actions)
}

fn generator_page(context: &AppContext) -> GeneratorPage {
    let actions =
        context.result_actions(Box::new(SystemClipboard::new()), Box::new(UnsupportedShare));
    GeneratorPage::new(context, Arc::new(QrcodeEncoder::new()), actions)
}

async fn decode_cmd(
    context: &AppContext,
    images: Vec<PathBuf>,
    copy: bool,
    share: bool,
    save: bool,
) -> Result<()> {
    if images.len() > 1 {
        let start = Instant::now();
        let results = decode_batch(&images, &RqrrDecoder::new());
        let hits = results.iter().filter(|(_, r)| r.is_ok()).count();
        for (path, result) in &results {
            let shown = match result {
                Ok(text) => text.clone(),
                Err(failure) => failure.marker(),
            };
            println!("{}: {}", path.display(), shown);
        }
        info!(hits, total = results.len(), elapsed = ?start.elapsed(), "batch decode finished");
        return Ok(());
    }

    let mut page = scanner_page(context);
    let path = &images[0];
    let upload = Upload::from_path(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    page.session_mut().decode_upload(Some(upload)).await;
    println!("{}", page.displayed_text());
    finish_scan(&mut page, copy, share, save)
}

async fn scan_cmd(
    mut context: AppContext,
    frames: PathBuf,
    fps: Option<u32>,
    scan_box: Option<u32>,
    copy: bool,
    save: bool,
) -> Result<()> {
    if let Some(fps) = fps {
        context.settings.scan.fps = fps.clamp(1, 60);
    }
    if let Some(side) = scan_box {
        context.settings.scan.scan_box = ScanBox::square(side.max(1));
    }

    let mut page = scanner_page(&context);
    let session = page.session_mut();
    session.open_camera(FrameDirectoryCamera::new(&frames)).await;
    if session.is_camera_open() {
        tokio::select! {
            _ = session.await_camera() => {}
            _ = tokio::signal::ctrl_c() => {}
        }
        // Interrupted: release the device before exiting
        if session.is_camera_open() {
            session.close_camera().await;
        }
    }
    println!("{}", page.displayed_text());
    finish_scan(&mut page, copy, false, save)
}

fn finish_scan(page: &mut ScannerPage, copy: bool, share: bool, save: bool) -> Result<()> {
    if !matches!(page.session().state(), DecodeState::Succeeded(_)) {
        return Ok(());
    }
    if copy {
        page.copy()?;
    }
    if share {
        page.share()?;
    }
    if save {
        page.save_to_history()?;
    }
    Ok(())
}

fn encode_cmd(
    context: &AppContext,
    text: &str,
    style: &QrStyle,
    share: bool,
    download: bool,
    save: bool,
) -> Result<()> {
    let mut page = generator_page(context);

    match page.generate(text, style) {
        EncodeState::Succeeded(result) => {
            info!(width = result.width(), "generated");
        }
        EncodeState::Failed(message) => anyhow::bail!("{message}"),
        EncodeState::Idle | EncodeState::Generating => anyhow::bail!("nothing to encode"),
    }

    if share {
        page.share()?;
    } else if download {
        page.download()?;
    }
    if save {
        page.save_to_history()?;
    }
    Ok(())
}

fn history_cmd(context: &AppContext, clear: bool, json: bool) -> Result<()> {
    let history = context.history();
    if clear {
        history.clear()?;
        println!("History cleared.");
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&history.load_all())?);
        return Ok(());
    }

    // Announces the count (or the empty state) through the notifier
    let entries = generator_page(context).view_history();
    for (i, entry) in entries.iter().enumerate() {
        let style = match (entry.color, entry.bg_color, entry.size) {
            (Some(fg), Some(bg), Some(size)) => format!(" [{fg} on {bg}, {size}px]"),
            _ => String::new(),
        };
        println!(
            "{:>2}. {} {:?}: {}{}",
            i + 1,
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.kind,
            entry.text,
            style
        );
    }
    Ok(())
}

fn theme_cmd(mut context: AppContext, toggle: bool) -> Result<()> {
    let theme = if toggle {
        context.toggle_dark_mode()?
    } else {
        context.theme
    };
    println!("{:?} (toggle: {})", theme, theme.toggle_label());
    Ok(())
}
