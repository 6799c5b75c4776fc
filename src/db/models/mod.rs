pub mod entry;
pub mod legacy;
pub mod song;

pub use entry::{MoodEntry, MoodEntryInput};
pub use legacy::{LegacyMoodDocument, LegacyTimestamp};
pub use song::{MoodSuggestion, Song, SongInput, SongSelection};
