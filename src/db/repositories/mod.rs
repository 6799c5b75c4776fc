pub mod entries;
pub mod songs;

pub use entries::ImportSummary;
