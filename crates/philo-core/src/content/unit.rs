//! Units and the content items they hold.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::story::Story;
use crate::error::CoreError;

/// Identifier of a lesson unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UnitId {
    /// What philosophy is and why it still matters.
    #[default]
    I,
    /// Conceptions of the human being.
    II,
    /// Ethical frameworks applied to real cases.
    III,
}

impl UnitId {
    /// All units in catalog order.
    pub fn all() -> &'static [UnitId] {
        &[UnitId::I, UnitId::II, UnitId::III]
    }

    /// The unit's roman numeral.
    pub fn as_str(self) -> &'static str {
        match self {
            UnitId::I => "I",
            UnitId::II => "II",
            UnitId::III => "III",
        }
    }

    /// Parse a roman numeral or its arabic equivalent (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "I" | "1" => Some(UnitId::I),
            "II" | "2" => Some(UnitId::II),
            "III" | "3" => Some(UnitId::III),
            _ => None,
        }
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::UnknownUnit(s.to_string()))
    }
}

/// All content for one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentUnit {
    /// Learning objective shown above every activity.
    pub objective: String,
    /// Short readings for reflection.
    pub readings: Vec<Reading>,
    /// Guiding questions for Socratic dialogue.
    pub socratic_topics: Vec<SocraticTopic>,
    /// Quiz items, presented in order.
    pub quiz: Vec<QuizItem>,
    /// Branching stories.
    pub stories: Vec<Story>,
    /// Concept flashcards.
    pub cards: Vec<Card>,
    /// Layered ethical dilemmas.
    pub dilemmas: Vec<Dilemma>,
}

impl ContentUnit {
    /// Find a reading by its identifier.
    pub fn find_reading(&self, id: &str) -> Option<&Reading> {
        self.readings.iter().find(|r| r.id == id)
    }
}

/// A reading with warm-up prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Stable identifier, e.g. `I-1.4`.
    pub id: String,
    /// Title.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Questions to think about before answering.
    #[serde(default)]
    pub warmups: Vec<String>,
}

/// A guiding question for a Socratic dialogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocraticTopic {
    /// The guiding question.
    pub prompt: String,
    /// The objection raised against the learner's position.
    pub counter: String,
    /// Authors and ideas to draw on.
    #[serde(default)]
    pub seed_refs: Vec<String>,
}

/// A multiple-choice quiz item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    /// Stable identifier.
    pub id: String,
    /// The question text.
    pub question: String,
    /// Answer options.
    pub options: Vec<String>,
    /// Index of the correct option.
    pub answer: usize,
    /// Hint shown on request.
    pub hint: String,
    /// Reading to suggest alongside the hint.
    #[serde(default)]
    pub read_id: Option<String>,
}

impl QuizItem {
    /// Whether `index` is the correct option.
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.answer
    }
}

/// A concept flashcard. The term is its identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Front face: the concept.
    pub term: String,
    /// Back face: the explanation.
    pub back: String,
}

/// A three-layer ethical dilemma.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dilemma {
    /// Stable identifier.
    pub id: String,
    /// The situation to decide on.
    pub scenario: String,
    /// Options for the first decision, reused for the re-decision.
    pub layer_a: Vec<String>,
    /// Reframing text shown after the first decision.
    pub layer_b: String,
    /// Ethical framework associated with each option.
    #[serde(default)]
    pub map: Vec<String>,
}
