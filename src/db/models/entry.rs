//! Mood record data models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mood::{Mood, Source};

/// One stored mood record. `id` and, when not supplied, `timestamp` are
/// assigned by storage on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: String,
    pub user_id: String,
    /// Classifier verdict, if a face was read.
    pub detected_mood: Option<Mood>,
    /// Manual picks; the first element is the primary selection.
    pub selected_moods: Vec<Mood>,
    /// Label -> percentage in [0, 100]. Keys are classifier labels and the
    /// values need not sum to 100.
    pub confidence: Option<BTreeMap<String, f64>>,
    pub note: Option<String>,
    pub source: Source,
    pub timestamp: DateTime<Utc>,
}

impl MoodEntry {
    /// Manual selection wins over detection; records with neither are
    /// excluded from mood-keyed statistics but still count toward totals.
    pub fn effective_mood(&self) -> Option<Mood> {
        self.selected_moods.first().copied().or(self.detected_mood)
    }
}

/// Insert payload for a new record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntryInput {
    pub user_id: String,
    pub detected_mood: Option<Mood>,
    pub selected_moods: Vec<Mood>,
    pub confidence: Option<BTreeMap<String, f64>>,
    pub note: Option<String>,
    /// Source as reported by the client; ignored when `selected_moods` is
    /// non-empty (that always means `manual`).
    pub source: Option<Source>,
    /// Explicit timestamp for imports; new records take the insert time.
    pub timestamp: Option<DateTime<Utc>>,
}

impl MoodEntryInput {
    pub fn resolved_source(&self) -> Source {
        if !self.selected_moods.is_empty() {
            Source::Manual
        } else {
            self.source.unwrap_or(Source::Auto)
        }
    }
}
