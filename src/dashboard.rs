//! One-call dashboard assembly: everything the dashboard screen renders
//! for a user, derived from a single fetch and one filter pass.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;

use crate::db::Database;
use crate::mood::Mood;
use crate::stats::{
    counts_by_label, latest_confidence, recent_notes, sort_by_timestamp, summarize, trend_series,
    DashboardSummary, LabelSeries, MoodFilter, NoteLine, TrendPoint, ValenceScale,
};

const RECENT_NOTE_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub summary: DashboardSummary,
    /// Counts over [`Mood::CHART_SET`], the shape the pie and bar charts
    /// share.
    pub mood_series: LabelSeries,
    pub trend: Vec<TrendPoint>,
    pub recent_notes: Vec<NoteLine>,
    /// Confidence map of the newest record in the view, if it has one.
    pub latest_confidence: Option<BTreeMap<String, f64>>,
}

/// Fetch a user's records, apply the filter, and derive every dashboard
/// panel in one pass. The storage read contract already orders ascending;
/// the view is re-sorted anyway so a misbehaving source cannot skew the
/// streak or the trend.
pub async fn load_dashboard(
    db: &Database,
    user_id: &str,
    filter: MoodFilter,
    scale: &ValenceScale,
) -> Result<Dashboard> {
    let entries = db.list_entries_for_user(user_id).await?;

    let mut view = filter.apply(&entries);
    sort_by_timestamp(&mut view);

    Ok(Dashboard {
        summary: summarize(&view, scale),
        mood_series: counts_by_label(&view, &Mood::CHART_SET),
        trend: trend_series(&view, scale),
        recent_notes: recent_notes(&view, RECENT_NOTE_LIMIT),
        latest_confidence: latest_confidence(&view).cloned(),
    })
}
