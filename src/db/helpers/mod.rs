use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::mood::{Mood, Source};

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_mood(value: &str, field: &str) -> Result<Mood> {
    Mood::from_label(value).ok_or_else(|| anyhow!("unknown mood '{value}' in {field}"))
}

pub fn parse_optional_mood(value: Option<String>, field: &str) -> Result<Option<Mood>> {
    match value {
        Some(raw) => parse_mood(&raw, field).map(Some),
        None => Ok(None),
    }
}

pub fn parse_source(value: &str) -> Result<Source> {
    Source::from_label(value).ok_or_else(|| anyhow!("unknown source '{value}'"))
}

pub fn parse_json_column<T: DeserializeOwned>(value: &str, field: &str) -> Result<T> {
    serde_json::from_str(value).with_context(|| format!("failed to parse {field} column"))
}
