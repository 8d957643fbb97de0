use super::{CameraBackend, FacingMode};
use crate::error::CameraError;
use crate::tools::{collect_images, load_rgba};
use image::RgbaImage;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Camera that replays image files from a directory, one per frame, in path order.
///
/// Stands in for a capture device wherever frames were recorded to disk.
#[derive(Debug, Clone)]
pub struct FrameDirectoryCamera {
    root: PathBuf,
    pending: VecDeque<PathBuf>,
}

impl FrameDirectoryCamera {
    /// Camera reading frames from `root`
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            pending: VecDeque::new(),
        }
    }

    /// Frames not yet delivered
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl CameraBackend for FrameDirectoryCamera {
    fn acquire(&mut self, facing: FacingMode) -> Result<(), CameraError> {
        // Read the directory up front so permission and missing-device errors classify
        fs::read_dir(&self.root).map_err(|err| CameraError::from_io(&err))?;

        let frames = collect_images(&self.root);
        if frames.is_empty() {
            return Err(CameraError::DeviceMissing);
        }
        debug!(root = %self.root.display(), frames = frames.len(), ?facing, "frame directory opened");
        self.pending = frames.into();
        Ok(())
    }

    fn capture(&mut self) -> Result<Option<RgbaImage>, CameraError> {
        let Some(path) = self.pending.pop_front() else {
            return Ok(None);
        };
        load_rgba(&path)
            .map(Some)
            .map_err(|err| CameraError::Other(format!("bad frame {}: {}", path.display(), err)))
    }

    fn release(&mut self) -> Result<(), CameraError> {
        self.pending.clear();
        Ok(())
    }
}
