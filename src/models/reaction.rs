use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// The closed set of reactions a post can collect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ReactionKind {
    ThumbsUp,
    Wow,
    Heart,
    Rocket,
    Coffee,
}

impl ReactionKind {
    /// Every reaction kind, in display order.
    pub const ALL: [ReactionKind; 5] = [
        ReactionKind::ThumbsUp,
        ReactionKind::Wow,
        ReactionKind::Heart,
        ReactionKind::Rocket,
        ReactionKind::Coffee,
    ];

    /// Wire name of the reaction (matches the JSON key in a reactions block).
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::ThumbsUp => "thumbsUp",
            ReactionKind::Wow => "wow",
            ReactionKind::Heart => "heart",
            ReactionKind::Rocket => "rocket",
            ReactionKind::Coffee => "coffee",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ReactionKind::ThumbsUp => "👍",
            ReactionKind::Wow => "😮",
            ReactionKind::Heart => "❤️",
            ReactionKind::Rocket => "🚀",
            ReactionKind::Coffee => "☕",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReactionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownReaction {
                name: s.to_string(),
            })
    }
}

/// Per-post reaction counters. All zero on creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Reactions {
    #[serde(default)]
    pub thumbs_up: u32,
    #[serde(default)]
    pub wow: u32,
    #[serde(default)]
    pub heart: u32,
    #[serde(default)]
    pub rocket: u32,
    #[serde(default)]
    pub coffee: u32,
}

impl Reactions {
    pub fn get(&self, kind: ReactionKind) -> u32 {
        match kind {
            ReactionKind::ThumbsUp => self.thumbs_up,
            ReactionKind::Wow => self.wow,
            ReactionKind::Heart => self.heart,
            ReactionKind::Rocket => self.rocket,
            ReactionKind::Coffee => self.coffee,
        }
    }

    fn counter_mut(&mut self, kind: ReactionKind) -> &mut u32 {
        match kind {
            ReactionKind::ThumbsUp => &mut self.thumbs_up,
            ReactionKind::Wow => &mut self.wow,
            ReactionKind::Heart => &mut self.heart,
            ReactionKind::Rocket => &mut self.rocket,
            ReactionKind::Coffee => &mut self.coffee,
        }
    }

    /// Bump one counter by exactly one.
    pub fn increment(&mut self, kind: ReactionKind) {
        let counter = self.counter_mut(kind);
        *counter = counter.saturating_add(1);
    }

    pub fn total(&self) -> u64 {
        ReactionKind::ALL
            .iter()
            .map(|kind| u64::from(self.get(*kind)))
            .sum()
    }

    /// (kind, count) pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ReactionKind, u32)> + '_ {
        ReactionKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reactions_default_is_zeroed() {
        let reactions = Reactions::default();
        assert!(reactions.iter().all(|(_, count)| count == 0));
        assert_eq!(reactions.total(), 0);
    }

    #[test]
    fn test_increment_touches_only_one_counter() {
        let mut reactions = Reactions::default();
        reactions.increment(ReactionKind::Rocket);
        reactions.increment(ReactionKind::Rocket);

        assert_eq!(reactions.get(ReactionKind::Rocket), 2);
        assert_eq!(reactions.get(ReactionKind::ThumbsUp), 0);
        assert_eq!(reactions.total(), 2);
    }

    #[test]
    fn test_reactions_wire_format() {
        let json = serde_json::to_value(Reactions::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"thumbsUp": 0, "wow": 0, "heart": 0, "rocket": 0, "coffee": 0})
        );
    }

    #[test]
    fn test_parse_reaction_kind() {
        assert_eq!("thumbsUp".parse::<ReactionKind>().unwrap(), ReactionKind::ThumbsUp);
        assert_eq!("coffee".parse::<ReactionKind>().unwrap(), ReactionKind::Coffee);

        let err = "sad".parse::<ReactionKind>().unwrap_err();
        assert!(matches!(err, ValidationError::UnknownReaction { name } if name == "sad"));
    }

    #[test]
    fn test_emoji_is_distinct_per_kind() {
        let mut seen: Vec<&str> = ReactionKind::ALL.iter().map(|k| k.emoji()).collect();
        seen.dedup();
        assert_eq!(seen.len(), 5);
    }
}
