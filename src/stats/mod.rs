pub mod filter;
pub mod series;
pub mod summary;
pub mod valence;

pub use filter::{sort_by_timestamp, MoodFilter};
pub use series::{counts_by_label, trend_series, LabelSeries, TrendPoint};
pub use summary::{
    average_mood_score, count_by_mood, happy_streak, latest_confidence, recent_notes, summarize,
    top_mood, total, DashboardSummary, NoteLine,
};
pub use valence::ValenceScale;
