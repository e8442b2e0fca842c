//! The six activity kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the six interactive activity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Reading and reflection.
    Reading,
    /// Socratic dialogue.
    Dialogue,
    /// Layered ethical dilemma.
    Dilemma,
    /// Branching story.
    Story,
    /// Concept flashcards.
    Flashcards,
    /// Quiz with hints.
    Quiz,
}

impl ModuleKind {
    /// All kinds in menu order.
    pub fn all() -> &'static [ModuleKind] {
        &[
            ModuleKind::Reading,
            ModuleKind::Dialogue,
            ModuleKind::Dilemma,
            ModuleKind::Story,
            ModuleKind::Flashcards,
            ModuleKind::Quiz,
        ]
    }

    /// Machine identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleKind::Reading => "reading",
            ModuleKind::Dialogue => "dialogue",
            ModuleKind::Dilemma => "dilemma",
            ModuleKind::Story => "story",
            ModuleKind::Flashcards => "flashcards",
            ModuleKind::Quiz => "quiz",
        }
    }

    /// Display title.
    pub fn title(self) -> &'static str {
        match self {
            ModuleKind::Reading => "Reading & Reflection",
            ModuleKind::Dialogue => "Socratic Dialogue",
            ModuleKind::Dilemma => "Ethical Dilemmas",
            ModuleKind::Story => "Branching Stories",
            ModuleKind::Flashcards => "Concept Cards",
            ModuleKind::Quiz => "Quiz with Hints",
        }
    }

    /// Time budget in seconds. For the quiz this is per item.
    pub fn time_budget(self) -> u32 {
        match self {
            ModuleKind::Reading => 180,
            ModuleKind::Dialogue => 480,
            ModuleKind::Dilemma => 420,
            ModuleKind::Story => 600,
            ModuleKind::Flashcards => 300,
            ModuleKind::Quiz => 90,
        }
    }

    /// Parse an identifier, accepting the plural menu aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "reading" | "readings" => Some(ModuleKind::Reading),
            "dialogue" | "socratic" => Some(ModuleKind::Dialogue),
            "dilemma" | "dilemmas" => Some(ModuleKind::Dilemma),
            "story" | "stories" => Some(ModuleKind::Story),
            "flashcards" | "cards" => Some(ModuleKind::Flashcards),
            "quiz" => Some(ModuleKind::Quiz),
            _ => None,
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::UnknownModule(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_aliases() {
        assert_eq!(ModuleKind::parse("socratic"), Some(ModuleKind::Dialogue));
        assert_eq!(ModuleKind::parse("Cards"), Some(ModuleKind::Flashcards));
        assert_eq!(ModuleKind::parse("stories"), Some(ModuleKind::Story));
        assert_eq!(ModuleKind::parse("chess"), None);
    }

    #[test]
    fn time_budgets() {
        assert_eq!(ModuleKind::Reading.time_budget(), 180);
        assert_eq!(ModuleKind::Dialogue.time_budget(), 480);
        assert_eq!(ModuleKind::Dilemma.time_budget(), 420);
        assert_eq!(ModuleKind::Story.time_budget(), 600);
        assert_eq!(ModuleKind::Flashcards.time_budget(), 300);
        assert_eq!(ModuleKind::Quiz.time_budget(), 90);
    }

    #[test]
    fn round_trips_through_display() {
        for kind in ModuleKind::all() {
            assert_eq!(kind.to_string().parse::<ModuleKind>().unwrap(), *kind);
        }
    }
}
