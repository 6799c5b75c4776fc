use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, parse_json_column, parse_mood, parse_optional_mood},
    models::{MoodSuggestion, Song, SongInput, SongSelection},
};
use crate::mood::Mood;

fn row_to_song(row: &Row) -> Result<Song> {
    let mood: String = row.get("mood")?;
    let created_at: String = row.get("created_at")?;

    Ok(Song {
        id: row.get("id")?,
        title: row.get("title")?,
        artist: row.get("artist")?,
        mood: parse_mood(&mood, "mood")?,
        language: row.get("language")?,
        youtube_url: row.get("youtube_url")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

fn row_to_selection(row: &Row) -> Result<SongSelection> {
    let mood: Option<String> = row.get("mood")?;
    let timestamp: String = row.get("timestamp")?;

    Ok(SongSelection {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        song_title: row.get("song_title")?,
        artist: row.get("artist")?,
        mood: parse_optional_mood(mood, "mood")?,
        language: row.get("language")?,
        youtube_url: row.get("youtube_url")?,
        timestamp: parse_datetime(&timestamp, "timestamp")?,
    })
}

impl Database {
    /// Swap the whole catalog in one transaction. Seeding is idempotent:
    /// running it twice leaves one copy.
    pub async fn replace_song_catalog(&self, songs: Vec<SongInput>) -> Result<usize> {
        let count = songs.len();
        self.execute(move |conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM songs", [])?;

            let now = Utc::now().to_rfc3339();
            for song in &songs {
                tx.execute(
                    "INSERT INTO songs (id, title, artist, mood, language, youtube_url, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        Uuid::new_v4().to_string(),
                        song.title,
                        song.artist,
                        song.mood.as_str(),
                        song.language,
                        song.youtube_url,
                        now,
                    ],
                )?;
            }

            tx.commit()?;
            Ok(())
        })
        .await?;
        Ok(count)
    }

    pub async fn songs_for_mood(&self, mood: Mood, language: &str) -> Result<Vec<Song>> {
        let language = language.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, artist, mood, language, youtube_url, created_at
                 FROM songs
                 WHERE mood = ?1 AND language = ?2
                 ORDER BY title ASC",
            )?;

            let mut rows = stmt.query(params![mood.as_str(), language])?;
            let mut songs = Vec::new();
            while let Some(row) = rows.next()? {
                songs.push(row_to_song(row)?);
            }

            Ok(songs)
        })
        .await
    }

    pub async fn upsert_suggestion(&self, suggestion: MoodSuggestion) -> Result<()> {
        let points = serde_json::to_string(&suggestion.points)
            .context("failed to serialize suggestion points")?;
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO mood_suggestions (mood, paragraph, points)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(mood) DO UPDATE SET paragraph = ?2, points = ?3",
                params![suggestion.mood.as_str(), suggestion.paragraph, points],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn suggestion_for_mood(&self, mood: Mood) -> Result<Option<MoodSuggestion>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT mood, paragraph, points
                 FROM mood_suggestions
                 WHERE mood = ?1",
            )?;

            let mut rows = stmt.query(params![mood.as_str()])?;
            let suggestion = match rows.next()? {
                Some(row) => {
                    let mood: String = row.get("mood")?;
                    let points: String = row.get("points")?;
                    Some(MoodSuggestion {
                        mood: parse_mood(&mood, "mood")?,
                        paragraph: row.get("paragraph")?,
                        points: parse_json_column(&points, "points")?,
                    })
                }
                None => None,
            };
            Ok(suggestion)
        })
        .await
    }

    /// Log which track the user picked for a mood.
    pub async fn insert_song_selection(
        &self,
        user_id: &str,
        song: &Song,
    ) -> Result<SongSelection> {
        let selection = SongSelection {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            song_title: song.title.clone(),
            artist: song.artist.clone(),
            mood: Some(song.mood),
            language: Some(song.language.clone()),
            youtube_url: Some(song.youtube_url.clone()),
            timestamp: Utc::now(),
        };
        let record = selection.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO song_selections (id, user_id, song_title, artist, mood, language, youtube_url, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    record.id,
                    record.user_id,
                    record.song_title,
                    record.artist,
                    record.mood.map(|mood| mood.as_str()),
                    record.language,
                    record.youtube_url,
                    record.timestamp.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await?;
        Ok(selection)
    }

    /// Listening history, most recent first.
    pub async fn list_song_selections_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<SongSelection>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, song_title, artist, mood, language, youtube_url, timestamp
                 FROM song_selections
                 WHERE user_id = ?1
                 ORDER BY timestamp DESC",
            )?;

            let mut rows = stmt.query(params![user_id])?;
            let mut selections = Vec::new();
            while let Some(row) = rows.next()? {
                selections.push(row_to_selection(row)?);
            }

            Ok(selections)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("moods.db")).unwrap();
        (dir, db)
    }

    fn track(title: &str, mood: Mood, language: &str) -> SongInput {
        SongInput {
            title: title.to_string(),
            artist: Some("Test Artist".to_string()),
            mood,
            language: language.to_string(),
            youtube_url: format!("https://youtube.com/watch?v={title}"),
        }
    }

    #[tokio::test]
    async fn catalog_replacement_is_idempotent() {
        let (_dir, db) = open_db();

        let seed = vec![
            track("Raincheck", Mood::Sad, "English"),
            track("Sunrise", Mood::Happy, "English"),
            track("Dhoop", Mood::Happy, "Hindi"),
        ];
        db.replace_song_catalog(seed.clone()).await.unwrap();
        db.replace_song_catalog(seed).await.unwrap();

        let happy_english = db.songs_for_mood(Mood::Happy, "English").await.unwrap();
        assert_eq!(happy_english.len(), 1);
        assert_eq!(happy_english[0].title, "Sunrise");

        let happy_hindi = db.songs_for_mood(Mood::Happy, "Hindi").await.unwrap();
        assert_eq!(happy_hindi.len(), 1);
        assert!(db.songs_for_mood(Mood::Angry, "English").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn suggestions_upsert_and_read_back() {
        let (_dir, db) = open_db();

        db.upsert_suggestion(MoodSuggestion {
            mood: Mood::Sad,
            paragraph: "Slow tempos can help you sit with the feeling.".to_string(),
            points: vec!["Take a walk".to_string(), "Call a friend".to_string()],
        })
        .await
        .unwrap();

        db.upsert_suggestion(MoodSuggestion {
            mood: Mood::Sad,
            paragraph: "Gentle music first, brighter songs later.".to_string(),
            points: vec!["Take a walk".to_string()],
        })
        .await
        .unwrap();

        let suggestion = db.suggestion_for_mood(Mood::Sad).await.unwrap().unwrap();
        assert_eq!(suggestion.paragraph, "Gentle music first, brighter songs later.");
        assert_eq!(suggestion.points.len(), 1);
        assert!(db.suggestion_for_mood(Mood::Angry).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn selections_log_and_list_most_recent_first() {
        let (_dir, db) = open_db();

        db.replace_song_catalog(vec![
            track("First", Mood::Happy, "English"),
            track("Second", Mood::Happy, "English"),
        ])
        .await
        .unwrap();
        let songs = db.songs_for_mood(Mood::Happy, "English").await.unwrap();

        db.insert_song_selection("u1", &songs[0]).await.unwrap();
        db.insert_song_selection("u1", &songs[1]).await.unwrap();

        let history = db.list_song_selections_for_user("u1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].song_title, "Second");
        assert_eq!(history[0].mood, Some(Mood::Happy));
        assert!(db.list_song_selections_for_user("u2").await.unwrap().is_empty());
    }
}
