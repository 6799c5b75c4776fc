use serde::Serialize;

use crate::db::models::MoodEntry;
use crate::mood::Mood;
use crate::stats::valence::ValenceScale;

/// Parallel label/count vectors in the given label order, the shape the
/// pie and bar charts consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSeries {
    pub labels: Vec<Mood>,
    pub counts: Vec<u64>,
}

/// One trend point: the record's UTC calendar date and its valence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: String,
    pub score: i64,
}

/// Count effective moods into the fixed label set. Records whose mood is
/// not in the set, and records with no effective mood, fall through, so
/// the counts can sum to less than the view total.
pub fn counts_by_label(view: &[&MoodEntry], labels: &[Mood]) -> LabelSeries {
    let counts = labels
        .iter()
        .map(|label| {
            view.iter()
                .filter(|entry| entry.effective_mood() == Some(*label))
                .count() as u64
        })
        .collect();

    LabelSeries {
        labels: labels.to_vec(),
        counts,
    }
}

/// Valence over time, one point per record with a mappable effective mood,
/// in view order. Unmappable records are skipped entirely rather than
/// plotted as zero. Dates use the same UTC truncation as the filter, so a
/// day can contribute several points.
pub fn trend_series(view: &[&MoodEntry], scale: &ValenceScale) -> Vec<TrendPoint> {
    view.iter()
        .filter_map(|entry| {
            let score = entry.effective_mood().and_then(|mood| scale.score(mood))?;
            Some(TrendPoint {
                date: entry.timestamp.format("%Y-%m-%d").to_string(),
                score,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::summary::total;
    use crate::stats::testing::{entry, entry_at, moodless, view_of};
    use chrono::{TimeZone, Utc};

    #[test]
    fn series_stays_parallel_to_the_label_set() {
        let entries = vec![
            entry(Mood::Happy, 1),
            entry(Mood::Happy, 2),
            entry(Mood::Neutral, 3),
        ];
        let view = view_of(&entries);
        let series = counts_by_label(&view, &Mood::CHART_SET);

        assert_eq!(series.labels, Mood::CHART_SET.to_vec());
        assert_eq!(series.counts, vec![2, 0, 0, 0, 1]);
    }

    #[test]
    fn series_total_never_exceeds_the_view_total() {
        let entries = vec![
            entry(Mood::Happy, 1),
            entry(Mood::Fearful, 2),
            moodless(3),
        ];
        let view = view_of(&entries);
        let series = counts_by_label(&view, &Mood::CHART_SET);

        let plotted: u64 = series.counts.iter().sum();
        assert_eq!(plotted, 1);
        assert!(plotted <= total(&view) as u64);
    }

    #[test]
    fn empty_view_produces_a_zeroed_series() {
        let series = counts_by_label(&[], &Mood::CHART_SET);
        assert_eq!(series.counts, vec![0; Mood::CHART_SET.len()]);
        assert!(trend_series(&[], &ValenceScale::default()).is_empty());
    }

    #[test]
    fn trend_skips_unmappable_records_and_keeps_order() {
        let entries = vec![
            entry_at(Mood::Happy, Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()),
            entry_at(Mood::Fearful, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
            entry_at(Mood::Sad, Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap()),
        ];
        let view = view_of(&entries);
        let trend = trend_series(&view, &ValenceScale::default());

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0], TrendPoint { date: "2024-03-01".to_string(), score: 5 });
        assert_eq!(trend[1], TrendPoint { date: "2024-03-02".to_string(), score: 2 });
    }

    #[test]
    fn a_day_can_contribute_several_points() {
        let entries = vec![
            entry_at(Mood::Happy, Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()),
            entry_at(Mood::Angry, Utc.with_ymd_and_hms(2024, 3, 1, 21, 0, 0).unwrap()),
        ];
        let view = view_of(&entries);
        let trend = trend_series(&view, &ValenceScale::default());

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].date, trend[1].date);
        assert_eq!((trend[0].score, trend[1].score), (5, 1));
    }
}
