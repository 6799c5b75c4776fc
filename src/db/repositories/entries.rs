use anyhow::{Context, Result};
use chrono::Utc;
use log::warn;
use rusqlite::{params, Connection, Row};
use serde::Serialize;
use uuid::Uuid;

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, parse_json_column, parse_optional_mood, parse_source},
    models::{LegacyMoodDocument, MoodEntry, MoodEntryInput},
};

fn row_to_entry(row: &Row) -> Result<MoodEntry> {
    let detected_mood: Option<String> = row.get("detected_mood")?;
    let selected_moods: String = row.get("selected_moods")?;
    let confidence: Option<String> = row.get("confidence")?;
    let source: String = row.get("source")?;
    let timestamp: String = row.get("timestamp")?;

    Ok(MoodEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        detected_mood: parse_optional_mood(detected_mood, "detected_mood")?,
        selected_moods: parse_json_column(&selected_moods, "selected_moods")?,
        confidence: confidence
            .map(|raw| parse_json_column(&raw, "confidence"))
            .transpose()?,
        note: row.get("note")?,
        source: parse_source(&source)?,
        timestamp: parse_datetime(&timestamp, "timestamp")?,
    })
}

fn entry_from_input(input: MoodEntryInput) -> MoodEntry {
    let source = input.resolved_source();
    MoodEntry {
        id: Uuid::new_v4().to_string(),
        user_id: input.user_id,
        detected_mood: input.detected_mood,
        selected_moods: input.selected_moods,
        confidence: input.confidence,
        note: input.note,
        source,
        timestamp: input.timestamp.unwrap_or_else(Utc::now),
    }
}

fn insert_entry_row(conn: &Connection, record: &MoodEntry) -> Result<()> {
    let selected_moods = serde_json::to_string(&record.selected_moods)
        .context("failed to serialize selected moods")?;
    let confidence = record
        .confidence
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .context("failed to serialize confidence map")?;

    conn.execute(
        "INSERT INTO mood_entries (id, user_id, detected_mood, selected_moods, confidence, note, source, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            record.id,
            record.user_id,
            record.detected_mood.map(|mood| mood.as_str()),
            selected_moods,
            confidence,
            record.note,
            record.source.as_str(),
            record.timestamp.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Outcome of a legacy import batch.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

impl Database {
    /// Store a new record, assigning its id, resolving its source, and
    /// stamping the insert time when none was supplied.
    pub async fn insert_entry(&self, input: MoodEntryInput) -> Result<MoodEntry> {
        let entry = entry_from_input(input);
        let record = entry.clone();
        self.execute(move |conn| insert_entry_row(conn, &record)).await?;
        Ok(entry)
    }

    /// Everything a user logged, ascending by timestamp. This is the read
    /// contract the aggregation layer builds on.
    pub async fn list_entries_for_user(&self, user_id: &str) -> Result<Vec<MoodEntry>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, detected_mood, selected_moods, confidence, note, source, timestamp
                 FROM mood_entries
                 WHERE user_id = ?1
                 ORDER BY timestamp ASC",
            )?;

            let mut rows = stmt.query(params![user_id])?;
            let mut entries = Vec::new();
            while let Some(row) = rows.next()? {
                entries.push(row_to_entry(row)?);
            }

            Ok(entries)
        })
        .await
    }

    /// Normalize and store a batch of legacy documents in one transaction.
    /// Documents that fail normalization are skipped with a warning rather
    /// than aborting the whole import.
    pub async fn import_legacy_documents(
        &self,
        docs: Vec<LegacyMoodDocument>,
    ) -> Result<ImportSummary> {
        let mut entries = Vec::new();
        let mut skipped = 0usize;
        for doc in docs {
            match doc.normalize() {
                Ok(input) => entries.push(entry_from_input(input)),
                Err(err) => {
                    warn!("Skipping legacy mood document: {err:#}");
                    skipped += 1;
                }
            }
        }

        let imported = entries.len();
        self.execute(move |conn| {
            let tx = conn.transaction()?;
            for record in &entries {
                insert_entry_row(&tx, record)?;
            }
            tx.commit()?;
            Ok(())
        })
        .await?;

        Ok(ImportSummary { imported, skipped })
    }
}
