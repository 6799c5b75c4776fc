use std::collections::HashMap;

use crate::mood::Mood;

/// Integer valence attached to each mood for averaging and the trend
/// chart. Labels outside the scale are unmappable and fall out of both.
#[derive(Debug, Clone)]
pub struct ValenceScale {
    scores: HashMap<Mood, i64>,
}

impl ValenceScale {
    pub fn score(&self, mood: Mood) -> Option<i64> {
        self.scores.get(&mood).copied()
    }
}

impl Default for ValenceScale {
    fn default() -> Self {
        Self {
            scores: HashMap::from([
                (Mood::Happy, 5),
                (Mood::Surprised, 4),
                (Mood::Neutral, 3),
                (Mood::Sad, 2),
                (Mood::Angry, 1),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scale_orders_happy_above_angry() {
        let scale = ValenceScale::default();
        assert_eq!(scale.score(Mood::Happy), Some(5));
        assert_eq!(scale.score(Mood::Surprised), Some(4));
        assert_eq!(scale.score(Mood::Neutral), Some(3));
        assert_eq!(scale.score(Mood::Sad), Some(2));
        assert_eq!(scale.score(Mood::Angry), Some(1));
    }

    #[test]
    fn labels_outside_the_scale_are_unmappable() {
        let scale = ValenceScale::default();
        assert_eq!(scale.score(Mood::Fearful), None);
        assert_eq!(scale.score(Mood::Disgusted), None);
    }
}
