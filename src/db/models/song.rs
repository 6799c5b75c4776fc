//! Music catalog data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mood::Mood;

/// A catalog track, keyed by mood and language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: Option<String>,
    pub mood: Mood,
    pub language: String,
    pub youtube_url: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for seeding the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongInput {
    pub title: String,
    pub artist: Option<String>,
    pub mood: Mood,
    pub language: String,
    pub youtube_url: String,
}

/// The explanatory copy shown next to a mood's track list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodSuggestion {
    pub mood: Mood,
    pub paragraph: String,
    pub points: Vec<String>,
}

/// One track a user actually picked for a mood.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongSelection {
    pub id: String,
    pub user_id: String,
    pub song_title: String,
    pub artist: Option<String>,
    pub mood: Option<Mood>,
    pub language: Option<String>,
    pub youtube_url: Option<String>,
    pub timestamp: DateTime<Utc>,
}
