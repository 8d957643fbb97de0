use super::{CameraBackend, ScanConfig};
use crate::decoder::ImageDecoder;
use crate::error::CameraError;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

/// How a capture session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// A frame decoded; the device has already been released
    Decoded(String),
    /// The backend ran out of frames
    Ended,
    /// Capturing a frame failed
    Failed(CameraError),
    /// The session was stopped before anything decoded
    Stopped,
}

/// Handle to a running capture task.
///
/// Dropping the handle closes the stop channel, which ends the loop and
/// releases the device.
#[derive(Debug)]
pub struct CaptureHandle {
    stop_tx: Option<oneshot::Sender<()>>,
    events: Option<oneshot::Receiver<ScanEvent>>,
    task: Option<JoinHandle<Result<(), CameraError>>>,
}

/// Acquire `backend` and start scanning frames on a tokio task.
///
/// Acquisition runs before this returns, so its failure is reported here
/// and no task is spawned. Must be called inside a tokio runtime.
pub fn start<B>(
    mut backend: B,
    config: ScanConfig,
    decoder: Arc<dyn ImageDecoder>,
) -> Result<CaptureHandle, CameraError>
where
    B: CameraBackend,
{
    backend.acquire(config.facing)?;
    info!(facing = ?config.facing, fps = config.fps, "camera acquired");

    let (stop_tx, stop_rx) = oneshot::channel();
    let (event_tx, event_rx) = oneshot::channel();
    let task = tokio::spawn(scan_loop(backend, config, decoder, stop_rx, event_tx));

    Ok(CaptureHandle {
        stop_tx: Some(stop_tx),
        events: Some(event_rx),
        task: Some(task),
    })
}

async fn scan_loop<B>(
    mut backend: B,
    config: ScanConfig,
    decoder: Arc<dyn ImageDecoder>,
    mut stop_rx: oneshot::Receiver<()>,
    event_tx: oneshot::Sender<ScanEvent>,
) -> Result<(), CameraError>
where
    B: CameraBackend,
{
    let mut ticker = interval(config.frame_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut frames = 0u64;

    let event = loop {
        tokio::select! {
            _ = &mut stop_rx => break ScanEvent::Stopped,
            _ = ticker.tick() => match backend.capture() {
                Ok(Some(frame)) => {
                    frames += 1;
                    let region = config.scan_box.crop(&frame);
                    if let Some(text) = decoder.decode(&region) {
                        debug!(frames, "frame decoded");
                        break ScanEvent::Decoded(text);
                    }
                    debug!(frames, "no QR code in frame");
                }
                Ok(None) => break ScanEvent::Ended,
                Err(err) => break ScanEvent::Failed(err),
            },
        }
    };

    // Release before reporting: at most one result per session
    let released = backend.release();
    if let Err(err) = &released {
        warn!(error = %err, "camera release failed");
    }
    info!(frames, "camera released");
    let _ = event_tx.send(event);
    released
}

impl CaptureHandle {
    /// Wait for the session outcome. Later calls return [`ScanEvent::Stopped`].
    pub async fn first_result(&mut self) -> ScanEvent {
        match self.events.take() {
            Some(rx) => rx.await.unwrap_or(ScanEvent::Stopped),
            None => ScanEvent::Stopped,
        }
    }

    /// Stop scanning and wait for the device to be released.
    ///
    /// Returns the backend's release result.
    pub async fn stop(mut self) -> Result<(), CameraError> {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        match self.task.take() {
            Some(task) => task
                .await
                .map_err(|err| CameraError::Other(format!("capture task failed: {err}")))?,
            None => Ok(()),
        }
    }
}
