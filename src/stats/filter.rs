use chrono::NaiveDate;

use crate::db::models::MoodEntry;
use crate::mood::Mood;

/// Dashboard filter. `None` on either axis means "all"; when both are set a
/// record must pass both tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoodFilter {
    pub mood: Option<Mood>,
    pub date: Option<NaiveDate>,
}

impl MoodFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_mood(mood: Mood) -> Self {
        Self {
            mood: Some(mood),
            ..Self::default()
        }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    /// The mood axis matches against the record's effective mood, so a
    /// manual selection wins over what the detector saw; the date axis
    /// compares the timestamp truncated to a UTC calendar date.
    pub fn matches(&self, entry: &MoodEntry) -> bool {
        let mood_ok = match self.mood {
            Some(mood) => entry.effective_mood() == Some(mood),
            None => true,
        };
        let date_ok = match self.date {
            Some(date) => entry.timestamp.date_naive() == date,
            None => true,
        };
        mood_ok && date_ok
    }

    /// Build a filtered view. The source collection is never mutated and
    /// the relative order of surviving records is preserved.
    pub fn apply<'a>(&self, entries: &'a [MoodEntry]) -> Vec<&'a MoodEntry> {
        entries.iter().filter(|entry| self.matches(entry)).collect()
    }
}

/// Defensive re-sort for views built from sources that do not guarantee
/// ascending order. Stable, so applying it to sorted input is a no-op.
pub fn sort_by_timestamp(view: &mut [&MoodEntry]) {
    view.sort_by_key(|entry| entry.timestamp);
}
