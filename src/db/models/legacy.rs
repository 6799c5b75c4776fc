//! Legacy mood document shapes.
//!
//! Earlier clients wrote several divergent shapes: a single `mood` field
//! (sometimes a comma-joined list), `manualMoods` instead of
//! `selectedMoods`, `datetime` instead of `timestamp`, and epoch-object
//! timestamps. They are normalized into [`MoodEntryInput`] here, at the
//! storage boundary, so nothing downstream ever sees them.

use std::collections::BTreeMap;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::db::models::MoodEntryInput;
use crate::mood::{normalize_confidence, Mood, Source};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyMoodDocument {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub detected_mood: Option<String>,
    #[serde(default, alias = "manualMoods")]
    pub selected_moods: Option<Vec<String>>,
    /// Oldest shape: one field holding either the detection or a
    /// comma-joined manual list.
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub manual_mood: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub confidence: Option<BTreeMap<String, f64>>,
    #[serde(default, alias = "datetime")]
    pub timestamp: Option<LegacyTimestamp>,
}

/// Either RFC 3339 text or the epoch object older exports carry.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LegacyTimestamp {
    Epoch {
        seconds: i64,
        #[serde(default)]
        nanoseconds: u32,
    },
    Text(String),
}

impl LegacyTimestamp {
    fn resolve(&self) -> Result<DateTime<Utc>> {
        match self {
            LegacyTimestamp::Epoch {
                seconds,
                nanoseconds,
            } => Utc
                .timestamp_opt(*seconds, *nanoseconds)
                .single()
                .ok_or_else(|| anyhow!("epoch timestamp {seconds}s out of range")),
            LegacyTimestamp::Text(raw) => DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .with_context(|| format!("failed to parse timestamp '{raw}'")),
        }
    }
}

impl LegacyMoodDocument {
    /// Normalize into a canonical insert payload. Documents without a
    /// resolvable owner or timestamp are rejected; everything else maps
    /// best-effort, dropping labels outside the vocabulary.
    pub fn normalize(self) -> Result<MoodEntryInput> {
        let user_id = self
            .user_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| anyhow!("document has no userId"))?;
        let timestamp = self
            .timestamp
            .ok_or_else(|| anyhow!("document has no timestamp"))?
            .resolve()?;

        let source = self.source.as_deref().and_then(Source::from_label);

        let mut selected: Vec<Mood> = self
            .selected_moods
            .unwrap_or_default()
            .iter()
            .filter_map(|label| Mood::from_label(label))
            .collect();
        if selected.is_empty() {
            if let Some(single) = self.manual_mood.as_deref().and_then(Mood::from_label) {
                selected.push(single);
            }
        }

        let mut detected = self.detected_mood.as_deref().and_then(Mood::from_label);

        if let Some(raw) = self.mood.as_deref() {
            let labels: Vec<Mood> = raw.split(',').filter_map(Mood::from_label).collect();
            if !labels.is_empty() {
                // A comma-joined list only ever came from manual selection.
                let manual = matches!(source, Some(Source::Manual)) || labels.len() > 1;
                if manual && selected.is_empty() {
                    selected = labels;
                } else if detected.is_none() {
                    detected = Some(labels[0]);
                }
            }
        }

        Ok(MoodEntryInput {
            user_id,
            detected_mood: detected,
            selected_moods: selected,
            confidence: self.confidence.map(normalize_confidence),
            note: self.note.filter(|note| !note.is_empty()),
            source,
            timestamp: Some(timestamp),
        })
    }
}
