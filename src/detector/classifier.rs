//! Out-of-process expression classifier bridge.
//!
//! The classifier is an external command (a Python script by default) that
//! takes an image path as its final argument and prints one JSON object:
//! `{ "detectedMood": ..., "confidence": { label: score }, "error": ... }`.
//! Everything that can go wrong surfaces as a [`DetectorError`]; no partial
//! detection ever escapes.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::ExitStatus;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use uuid::Uuid;

use crate::mood::{dominant_mood, normalize_confidence, Mood};

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("failed to launch classifier: {0}")]
    Launch(#[source] std::io::Error),
    #[error("classifier timed out after {0:?}")]
    Timeout(Duration),
    #[error("classifier exited with {status}: {stderr}")]
    ProcessFailed { status: ExitStatus, stderr: String },
    #[error("classifier output was not valid JSON: {0}")]
    InvalidOutput(#[from] serde_json::Error),
    #[error("classifier reported: {0}")]
    Script(String),
    #[error("no recognizable mood in classifier output")]
    NoMood,
    #[error("failed to stage image for classification: {0}")]
    Staging(#[source] std::io::Error),
}

/// How to invoke the external classifier process.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Program to run; the image path is appended as the final argument.
    pub command: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            command: "python".to_string(),
            args: vec!["emotion.py".to_string()],
            timeout: Duration::from_secs(30),
        }
    }
}

/// A completed read of one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub detected_mood: Mood,
    /// Label -> whole percentage in [0, 100].
    pub confidence: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassifierOutput {
    detected_mood: Option<String>,
    #[serde(default)]
    confidence: BTreeMap<String, f64>,
    error: Option<String>,
}

pub struct ExpressionClassifier {
    config: ClassifierConfig,
}

impl ExpressionClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Run the classifier over an image already on disk.
    pub async fn classify(&self, image_path: &Path) -> Result<Detection, DetectorError> {
        let mut command = Command::new(&self.config.command);
        command
            .args(&self.config.args)
            .arg(image_path)
            // A timed-out child must not keep running after the output
            // future is dropped.
            .kill_on_drop(true);

        let output = timeout(self.config.timeout, command.output())
            .await
            .map_err(|_| DetectorError::Timeout(self.config.timeout))?
            .map_err(DetectorError::Launch)?;

        if !output.status.success() {
            return Err(DetectorError::ProcessFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let parsed: ClassifierOutput = serde_json::from_slice(&output.stdout)?;
        if let Some(message) = parsed.error {
            return Err(DetectorError::Script(message));
        }

        let confidence = normalize_confidence(parsed.confidence);
        let detected_mood = parsed
            .detected_mood
            .as_deref()
            .and_then(Mood::from_label)
            .or_else(|| dominant_mood(&confidence))
            .ok_or(DetectorError::NoMood)?;

        Ok(Detection {
            detected_mood,
            confidence,
        })
    }

    /// Stage raw image bytes under `work_dir`, classify, and delete the
    /// staged file again whatever the outcome.
    pub async fn classify_bytes(
        &self,
        bytes: &[u8],
        work_dir: &Path,
    ) -> Result<Detection, DetectorError> {
        let staged = work_dir.join(format!("{}.img", Uuid::new_v4()));
        tokio::fs::write(&staged, bytes)
            .await
            .map_err(DetectorError::Staging)?;

        let result = self.classify(&staged).await;

        if let Err(err) = tokio::fs::remove_file(&staged).await {
            warn!(
                "Failed to remove staged classifier input {}: {err}",
                staged.display()
            );
        }

        result
    }
}
