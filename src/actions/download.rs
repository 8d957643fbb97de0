use crate::error::ActionError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Saves files into a downloads directory without overwriting existing ones
#[derive(Debug, Clone)]
pub struct Downloads {
    dir: PathBuf,
}

impl Downloads {
    /// Downloads written under `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Target directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` as `file_name`, or `stem (n).ext` if the name is taken
    pub fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ActionError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.free_path(file_name);
        fs::write(&path, bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "download saved");
        Ok(path)
    }

    fn free_path(&self, file_name: &str) -> PathBuf {
        let candidate = self.dir.join(file_name);
        if !candidate.exists() {
            return candidate;
        }
        let name = Path::new(file_name);
        let stem = name
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = name
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        (1..)
            .map(|n| self.dir.join(format!("{stem} ({n}){ext}")))
            .find(|path| !path.exists())
            .unwrap_or(candidate)
    }
}
