use std::collections::BTreeMap;

use serde::Serialize;

use crate::db::models::MoodEntry;
use crate::mood::Mood;
use crate::stats::valence::ValenceScale;

/// The six dashboard stat cards. `average_score` and `top_mood` are `None`
/// when nothing in the view can back them; that is the whole error story,
/// nothing here ever fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total: usize,
    pub happy_count: usize,
    pub sad_count: usize,
    pub average_score: Option<f64>,
    pub top_mood: Option<Mood>,
    pub happy_streak: usize,
}

/// One line of the "recent notes" card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteLine {
    pub date: String,
    pub mood: Option<Mood>,
    pub note: String,
}

/// Every record in the view, including ones without an effective mood.
pub fn total(view: &[&MoodEntry]) -> usize {
    view.len()
}

/// Records whose effective mood equals the label.
pub fn count_by_mood(view: &[&MoodEntry], mood: Mood) -> usize {
    view.iter()
        .filter(|entry| entry.effective_mood() == Some(mood))
        .count()
}

/// Mean valence over the records with a mappable effective mood, rounded
/// to two decimal places. `None` when no record is mappable.
pub fn average_mood_score(view: &[&MoodEntry], scale: &ValenceScale) -> Option<f64> {
    let scores: Vec<i64> = view
        .iter()
        .filter_map(|entry| entry.effective_mood().and_then(|mood| scale.score(mood)))
        .collect();

    if scores.is_empty() {
        return None;
    }

    let mean = scores.iter().sum::<i64>() as f64 / scores.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}

/// Most frequent effective mood. Ties break toward the label seen first in
/// the view, so counting keeps insertion order and a replacement requires a
/// strictly greater count.
pub fn top_mood(view: &[&MoodEntry]) -> Option<Mood> {
    let mut counts: Vec<(Mood, usize)> = Vec::new();
    for entry in view {
        if let Some(mood) = entry.effective_mood() {
            match counts.iter_mut().find(|(label, _)| *label == mood) {
                Some((_, count)) => *count += 1,
                None => counts.push((mood, 1)),
            }
        }
    }

    let mut best: Option<(Mood, usize)> = None;
    for (mood, count) in counts {
        match best {
            Some((_, top)) if count <= top => {}
            _ => best = Some((mood, count)),
        }
    }
    best.map(|(mood, _)| mood)
}

/// Longest run of consecutive happy records in ascending timestamp order.
/// Anything else, including a record with no effective mood, resets the
/// run to zero.
pub fn happy_streak(view: &[&MoodEntry]) -> usize {
    let mut run = 0usize;
    let mut best = 0usize;
    for entry in view {
        if entry.effective_mood() == Some(Mood::Happy) {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}

/// The last `limit` records carrying a note, most recent first.
pub fn recent_notes(view: &[&MoodEntry], limit: usize) -> Vec<NoteLine> {
    view.iter()
        .rev()
        .filter_map(|entry| {
            entry.note.as_ref().map(|note| NoteLine {
                date: entry.timestamp.format("%Y-%m-%d").to_string(),
                mood: entry.effective_mood(),
                note: note.clone(),
            })
        })
        .take(limit)
        .collect()
}

/// Confidence map of the final record, when it has one. Feeds the
/// detection-quality card.
pub fn latest_confidence<'a>(view: &[&'a MoodEntry]) -> Option<&'a BTreeMap<String, f64>> {
    view.last().and_then(|entry| entry.confidence.as_ref())
}

pub fn summarize(view: &[&MoodEntry], scale: &ValenceScale) -> DashboardSummary {
    DashboardSummary {
        total: total(view),
        happy_count: count_by_mood(view, Mood::Happy),
        sad_count: count_by_mood(view, Mood::Sad),
        average_score: average_mood_score(view, scale),
        top_mood: top_mood(view),
        happy_streak: happy_streak(view),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::testing::{entry, moodless, view_of};

    #[test]
    fn empty_view_yields_sentinels() {
        let scale = ValenceScale::default();
        let summary = summarize(&[], &scale);

        assert_eq!(summary.total, 0);
        assert_eq!(summary.happy_count, 0);
        assert_eq!(summary.average_score, None);
        assert_eq!(summary.top_mood, None);
        assert_eq!(summary.happy_streak, 0);
    }

    #[test]
    fn counts_use_the_effective_mood() {
        let mut entries = vec![entry(Mood::Sad, 1), entry(Mood::Sad, 2)];
        entries[0].selected_moods = vec![Mood::Happy];
        let view = view_of(&entries);

        assert_eq!(total(&view), 2);
        assert_eq!(count_by_mood(&view, Mood::Happy), 1);
        assert_eq!(count_by_mood(&view, Mood::Sad), 1);
    }

    #[test]
    fn average_rounds_to_two_decimals() {
        let entries = vec![entry(Mood::Happy, 1), entry(Mood::Happy, 2), entry(Mood::Sad, 3)];
        let view = view_of(&entries);
        // (5 + 5 + 2) / 3 = 4.0
        assert_eq!(average_mood_score(&view, &ValenceScale::default()), Some(4.0));

        let entries = vec![entry(Mood::Happy, 1), entry(Mood::Sad, 2), entry(Mood::Sad, 3)];
        let view = view_of(&entries);
        // (5 + 2 + 2) / 3 = 3.0

        assert_eq!(average_mood_score(&view, &ValenceScale::default()), Some(3.0));

        let entries = vec![entry(Mood::Happy, 1), entry(Mood::Neutral, 2), entry(Mood::Sad, 3)];
        let view = view_of(&entries);
        // (5 + 3 + 2) / 3 = 3.333...
        assert_eq!(
            average_mood_score(&view, &ValenceScale::default()),
            Some(3.33)
        );
    }

    #[test]
    fn unmappable_moods_fall_out_of_the_average() {
        let entries = vec![entry(Mood::Fearful, 1), entry(Mood::Happy, 2)];
        let view = view_of(&entries);
        assert_eq!(average_mood_score(&view, &ValenceScale::default()), Some(5.0));

        let entries = vec![entry(Mood::Fearful, 1), entry(Mood::Disgusted, 2)];
        let view = view_of(&entries);
        assert_eq!(average_mood_score(&view, &ValenceScale::default()), None);
    }

    #[test]
    fn top_mood_breaks_ties_by_first_appearance() {
        let entries = vec![
            entry(Mood::Happy, 1),
            entry(Mood::Sad, 2),
            entry(Mood::Sad, 3),
            entry(Mood::Happy, 4),
            entry(Mood::Sad, 5),
            entry(Mood::Happy, 6),
        ];
        let view = view_of(&entries);
        // Three each; happy appeared first.
        assert_eq!(top_mood(&view), Some(Mood::Happy));

        let entries = vec![entry(Mood::Sad, 1), entry(Mood::Happy, 2)];
        let view = view_of(&entries);
        assert_eq!(top_mood(&view), Some(Mood::Sad));
    }

    #[test]
    fn top_mood_ignores_moodless_records() {
        let entries = vec![moodless(1), moodless(2)];
        let view = view_of(&entries);
        assert_eq!(top_mood(&view), None);
    }

    #[test]
    fn happy_streak_counts_consecutive_runs() {
        let entries = vec![
            entry(Mood::Happy, 1),
            entry(Mood::Happy, 2),
            entry(Mood::Sad, 3),
            entry(Mood::Happy, 4),
            entry(Mood::Happy, 5),
            entry(Mood::Happy, 6),
        ];
        let view = view_of(&entries);
        assert_eq!(happy_streak(&view), 3);
    }

    #[test]
    fn moodless_records_break_a_streak() {
        let entries = vec![entry(Mood::Happy, 1), moodless(2), entry(Mood::Happy, 3)];
        let view = view_of(&entries);
        assert_eq!(happy_streak(&view), 1);
        // They still count toward the total.
        assert_eq!(total(&view), 3);
    }

    #[test]
    fn recent_notes_walk_backwards_and_skip_noteless_records() {
        let mut entries = vec![
            entry(Mood::Happy, 1),
            entry(Mood::Sad, 2),
            entry(Mood::Neutral, 3),
        ];
        entries[0].note = Some("morning run".to_string());
        entries[2].note = Some("quiet evening".to_string());
        let view = view_of(&entries);

        let notes = recent_notes(&view, 5);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].note, "quiet evening");
        assert_eq!(notes[1].note, "morning run");

        assert_eq!(recent_notes(&view, 1).len(), 1);
    }

    #[test]
    fn latest_confidence_reads_the_final_record() {
        let mut entries = vec![entry(Mood::Happy, 1), entry(Mood::Sad, 2)];
        let mut scores = BTreeMap::new();
        scores.insert("sad".to_string(), 74.0);
        entries[1].confidence = Some(scores.clone());
        let view = view_of(&entries);

        assert_eq!(latest_confidence(&view), Some(&scores));
        assert_eq!(latest_confidence(&view_of(&entries[..1])), None);
    }
}
