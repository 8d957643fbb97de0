//! Runtime settings read from environment variables
//!
//! | Variable | Default |
//! |---|---|
//! | `QR_DATA_DIR` | `<platform data dir>/qr_studio` |
//! | `QR_DOWNLOAD_DIR` | platform downloads dir, else `.` |
//! | `QR_SCAN_FPS` | 10 (clamped to 1..=60) |
//! | `QR_SCAN_BOX` | 250 (pixels, square) |
//! | `QR_DEBUG` | unset |

use crate::camera::{FacingMode, ScanBox, ScanConfig};
use std::env;
use std::path::PathBuf;

/// Resolved runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Where history and preferences are stored
    pub data_dir: PathBuf,
    /// Where downloads are written
    pub download_dir: PathBuf,
    /// Camera scan parameters
    pub scan: ScanConfig,
    /// Verbose logging requested
    pub debug: bool,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read settings through `lookup`, which returns the raw value of a variable
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = parse_path(&lookup, "QR_DATA_DIR").unwrap_or_else(default_data_dir);
        let download_dir =
            parse_path(&lookup, "QR_DOWNLOAD_DIR").unwrap_or_else(default_download_dir);
        let fps = parse_u32(&lookup, "QR_SCAN_FPS", 10).clamp(1, 60);
        let side = parse_u32(&lookup, "QR_SCAN_BOX", 250).max(1);
        let debug = parse_flag(&lookup, "QR_DEBUG");

        Self {
            data_dir,
            download_dir,
            scan: ScanConfig {
                facing: FacingMode::Environment,
                fps,
                scan_box: ScanBox::square(side),
            },
            debug,
        }
    }
}

fn parse_u32<F>(lookup: &F, name: &str, default: u32) -> u32
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_path<F>(lookup: &F, name: &str) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn parse_flag<F>(lookup: &F, name: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    matches!(
        lookup(name).as_deref().map(str::trim),
        Some("1") | Some("true") | Some("TRUE") | Some("yes") | Some("YES")
    )
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("qr_studio"))
        .unwrap_or_else(|| PathBuf::from(".qr_studio"))
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
