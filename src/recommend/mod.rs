//! Music recommendation: mood/language keyed lookups plus selection logging.

use anyhow::Result;
use serde::Serialize;

use crate::db::{Database, MoodSuggestion, Song, SongSelection};
use crate::mood::Mood;

/// What the music screen renders for one mood: the suggestion copy and the
/// track list for the chosen language.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub mood: Mood,
    pub language: String,
    pub suggestion: Option<MoodSuggestion>,
    pub songs: Vec<Song>,
}

/// Look up the suggestion and track list for a mood. Missing catalog data
/// is not an error; the screen renders what it gets.
pub async fn recommend(db: &Database, mood: Mood, language: &str) -> Result<Recommendation> {
    let suggestion = db.suggestion_for_mood(mood).await?;
    let songs = db.songs_for_mood(mood, language).await?;

    Ok(Recommendation {
        mood,
        language: language.to_string(),
        suggestion,
        songs,
    })
}

/// Log which track the user picked; feeds their listening history.
pub async fn record_selection(db: &Database, user_id: &str, song: &Song) -> Result<SongSelection> {
    db.insert_song_selection(user_id, song).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SongInput;

    fn open_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("moods.db")).unwrap();
        (dir, db)
    }

    async fn seed(db: &Database) {
        db.replace_song_catalog(vec![
            SongInput {
                title: "Golden Hour".to_string(),
                artist: Some("Arcade Lights".to_string()),
                mood: Mood::Happy,
                language: "English".to_string(),
                youtube_url: "https://youtube.com/watch?v=golden".to_string(),
            },
            SongInput {
                title: "Dhoop".to_string(),
                artist: None,
                mood: Mood::Happy,
                language: "Hindi".to_string(),
                youtube_url: "https://youtube.com/watch?v=dhoop".to_string(),
            },
        ])
        .await
        .unwrap();

        db.upsert_suggestion(MoodSuggestion {
            mood: Mood::Happy,
            paragraph: "Ride the wave while it lasts.".to_string(),
            points: vec!["Share it with someone".to_string()],
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn returns_the_suggestion_and_matching_tracks() {
        let (_dir, db) = open_db();
        seed(&db).await;

        let rec = recommend(&db, Mood::Happy, "English").await.unwrap();
        assert_eq!(rec.songs.len(), 1);
        assert_eq!(rec.songs[0].title, "Golden Hour");
        assert_eq!(
            rec.suggestion.unwrap().paragraph,
            "Ride the wave while it lasts."
        );
    }

    #[tokio::test]
    async fn unseeded_moods_come_back_empty_not_as_errors() {
        let (_dir, db) = open_db();
        seed(&db).await;

        let rec = recommend(&db, Mood::Angry, "English").await.unwrap();
        assert!(rec.songs.is_empty());
        assert!(rec.suggestion.is_none());
    }

    #[tokio::test]
    async fn selections_land_in_the_listening_history() {
        let (_dir, db) = open_db();
        seed(&db).await;

        let songs = db.songs_for_mood(Mood::Happy, "Hindi").await.unwrap();
        let selection = record_selection(&db, "u1", &songs[0]).await.unwrap();
        assert_eq!(selection.song_title, "Dhoop");
        assert_eq!(selection.mood, Some(Mood::Happy));

        let history = db.list_song_selections_for_user("u1").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, selection.id);
    }
}
