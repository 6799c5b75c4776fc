//! MoodLens core: mood records, aggregate statistics, history exports, and
//! the detection plumbing behind them.
//!
//! One data flow runs through the crate: a capture surface produces a mood
//! record ([`detector`], [`relay`]), storage persists it ([`db`]), and the
//! dashboard derives statistics, chart series, and export artifacts from an
//! immutable snapshot of the history ([`stats`], [`export`],
//! [`dashboard`]). [`recommend`] keys the music catalog off the same mood
//! vocabulary.

pub mod dashboard;
pub mod db;
pub mod detector;
pub mod export;
pub mod mood;
pub mod recommend;
pub mod relay;
pub mod stats;

pub use dashboard::{load_dashboard, Dashboard};
pub use db::{Database, MoodEntry, MoodEntryInput};
pub use mood::{Mood, Source};
pub use stats::{MoodFilter, ValenceScale};
