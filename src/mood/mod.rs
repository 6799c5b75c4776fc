//! Mood vocabulary shared across the crate.
//!
//! Every layer (storage, statistics, exports, detector) speaks in terms of
//! these enums; raw label strings only exist at the edges. Confidence-map
//! helpers live here too since both the detector and legacy ingestion
//! normalize the same shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The fixed label set a record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Surprised,
    Neutral,
    Fearful,
    Disgusted,
}

impl Mood {
    /// Labels the charts plot, in display order. Also the domain of the
    /// default valence scale.
    pub const CHART_SET: [Mood; 5] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Surprised,
        Mood::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Surprised => "surprised",
            Mood::Neutral => "neutral",
            Mood::Fearful => "fearful",
            Mood::Disgusted => "disgusted",
        }
    }

    /// Tolerant parse covering both the UI vocabulary and the short forms
    /// the expression classifier emits (`surprise`, `fear`, `disgust`).
    pub fn from_label(label: &str) -> Option<Mood> {
        match label.trim().to_ascii_lowercase().as_str() {
            "happy" => Some(Mood::Happy),
            "sad" => Some(Mood::Sad),
            "angry" => Some(Mood::Angry),
            "surprised" | "surprise" => Some(Mood::Surprised),
            "neutral" => Some(Mood::Neutral),
            "fearful" | "fear" => Some(Mood::Fearful),
            "disgusted" | "disgust" => Some(Mood::Disgusted),
            _ => None,
        }
    }
}

/// How a record came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Facial expression detection.
    Face,
    /// Explicit user selection.
    Manual,
    /// Background flows that log on the user's behalf.
    Auto,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Face => "face",
            Source::Manual => "manual",
            Source::Auto => "auto",
        }
    }

    pub fn from_label(label: &str) -> Option<Source> {
        match label.trim().to_ascii_lowercase().as_str() {
            "face" => Some(Source::Face),
            "manual" => Some(Source::Manual),
            "auto" => Some(Source::Auto),
            _ => None,
        }
    }
}

/// Rescale a raw classifier score map to whole percentages in [0, 100].
/// Classifiers that emit probabilities (every score inside [0, 1]) get
/// scaled up by 100 first.
pub fn normalize_confidence(raw: BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    let fractional = !raw.is_empty() && raw.values().all(|score| (0.0..=1.0).contains(score));
    raw.into_iter()
        .map(|(label, score)| {
            let scaled = if fractional { score * 100.0 } else { score };
            (label, scaled.round().clamp(0.0, 100.0))
        })
        .collect()
}

/// Arg-max over a confidence map. Replacement requires a strictly greater
/// score, so the first maximal label in iteration order wins ties.
pub fn dominant_mood(scores: &BTreeMap<String, f64>) -> Option<Mood> {
    let mut best: Option<(&str, f64)> = None;
    for (label, score) in scores {
        match best {
            Some((_, top)) if *score <= top => {}
            _ => best = Some((label.as_str(), *score)),
        }
    }
    best.and_then(|(label, _)| Mood::from_label(label))
}
