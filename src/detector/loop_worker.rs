//! Periodic detection loop.
//!
//! Captures a frame, runs it through the classifier, and publishes the
//! latest result on a watch channel. One failed cycle never kills the
//! loop; it logs and waits for the next tick.

use std::path::PathBuf;

use log::{debug, warn};
use tokio::sync::watch;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::detector::classifier::{Detection, DetectorError, ExpressionClassifier};

pub const DETECT_INTERVAL_SECS: u64 = 3;

/// Produces raw image bytes for one detection cycle.
///
/// The production implementation wraps a camera; tests substitute canned
/// frames.
pub trait FrameSource: Send + 'static {
    fn capture(&mut self) -> anyhow::Result<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct DetectionLoopConfig {
    pub interval: Duration,
    /// Directory where frames are staged for the classifier.
    pub work_dir: PathBuf,
}

impl Default for DetectionLoopConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DETECT_INTERVAL_SECS),
            work_dir: std::env::temp_dir(),
        }
    }
}

pub async fn detection_loop<S: FrameSource>(
    mut source: S,
    classifier: ExpressionClassifier,
    config: DetectionLoopConfig,
    updates: watch::Sender<Option<Detection>>,
    cancel_token: CancellationToken,
) {
    let mut ticker = interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let frame = match source.capture() {
                    Ok(frame) => frame,
                    Err(err) => {
                        warn!("Frame capture failed: {err:#}");
                        continue;
                    }
                };

                match classifier.classify_bytes(&frame, &config.work_dir).await {
                    Ok(detection) => {
                        debug!("Detected mood: {}", detection.detected_mood.as_str());
                        let _ = updates.send(Some(detection));
                    }
                    // No face in frame is a normal outcome, not a fault.
                    Err(DetectorError::Script(message)) => {
                        debug!("Classifier found nothing usable: {message}");
                        let _ = updates.send(None);
                    }
                    Err(DetectorError::NoMood) => {
                        let _ = updates.send(None);
                    }
                    Err(err) => {
                        warn!("Detection cycle failed: {err}");
                    }
                }
            }
            _ = cancel_token.cancelled() => {
                debug!("Detection loop cancelled");
                break;
            }
        }
    }
}
