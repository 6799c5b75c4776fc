use anyhow::{bail, Context, Result};
use log::info;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::classifier::{Detection, ExpressionClassifier};
use super::loop_worker::{detection_loop, DetectionLoopConfig, FrameSource};

/// Owns the background detection task. At most one loop runs at a time.
pub struct DetectionController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl DetectionController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Spawn the detection loop and hand back the channel it publishes on.
    pub fn start_detection<S: FrameSource>(
        &mut self,
        source: S,
        classifier: ExpressionClassifier,
        config: DetectionLoopConfig,
    ) -> Result<watch::Receiver<Option<Detection>>> {
        if self.handle.is_some() {
            bail!("detection already active");
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let (updates_tx, updates_rx) = watch::channel(None);

        info!("Starting detection loop (every {:?})", config.interval);
        let handle = tokio::spawn(detection_loop(
            source,
            classifier,
            config,
            updates_tx,
            token_clone,
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(updates_rx)
    }

    pub async fn stop_detection(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("detection loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

impl Default for DetectionController {
    fn default() -> Self {
        Self::new()
    }
}

// A dropped controller must not leave the loop running with nobody able to
// stop it.
impl Drop for DetectionController {
    fn drop(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
