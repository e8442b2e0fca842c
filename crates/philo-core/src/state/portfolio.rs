//! The append-only log of completed activities.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::module::ModuleKind;
use crate::content::UnitId;

/// One completed activity. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    /// When the activity was completed.
    #[serde(alias = "date")]
    pub timestamp: DateTime<Utc>,
    /// Unit the activity belonged to.
    pub unit: UnitId,
    /// What happened, tagged by module.
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl PortfolioEntry {
    /// Create an entry stamped with the current time.
    pub fn now(unit: UnitId, outcome: Outcome) -> Self {
        Self {
            timestamp: Utc::now(),
            unit,
            outcome,
        }
    }

    /// The module that produced this entry, if it is one this app knows.
    pub fn module(&self) -> Option<ModuleKind> {
        self.outcome.module()
    }

    /// The module name as stored.
    pub fn module_name(&self) -> &str {
        self.outcome.module_name()
    }
}

/// Module-specific result of a completed activity.
///
/// Serialized as `{"module": "<kind>", "data": {...}}`. Module names written
/// by older builds (`socratic`, `dilemmas`, `stories`, `cards`) are read as
/// their current kind. Entries whose module is unknown or whose data does not
/// fit the module's shape are kept verbatim as [`Outcome::Other`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A saved reading reflection.
    Reading(ReadingOutcome),
    /// A registered Socratic dialogue.
    Dialogue(DialogueOutcome),
    /// A saved dilemma re-decision.
    Dilemma(DilemmaOutcome),
    /// A story ending that was registered.
    Story(StoryOutcome),
    /// A flashcard practice.
    Flashcards(FlashcardOutcome),
    /// A finished quiz.
    Quiz(QuizOutcome),
    /// An entry this build cannot read, written back unchanged.
    Other {
        /// Module name as stored.
        module: String,
        /// Raw payload.
        data: Value,
    },
}

impl Outcome {
    /// The module that produced this outcome. `None` for [`Outcome::Other`].
    pub fn module(&self) -> Option<ModuleKind> {
        match self {
            Outcome::Reading(_) => Some(ModuleKind::Reading),
            Outcome::Dialogue(_) => Some(ModuleKind::Dialogue),
            Outcome::Dilemma(_) => Some(ModuleKind::Dilemma),
            Outcome::Story(_) => Some(ModuleKind::Story),
            Outcome::Flashcards(_) => Some(ModuleKind::Flashcards),
            Outcome::Quiz(_) => Some(ModuleKind::Quiz),
            Outcome::Other { .. } => None,
        }
    }

    /// The module name written to the `module` key.
    pub fn module_name(&self) -> &str {
        match self {
            Outcome::Other { module, .. } => module.as_str(),
            known => known.module().map_or("", ModuleKind::as_str),
        }
    }

    fn from_raw(module: String, data: Value) -> Self {
        let typed = match ModuleKind::parse(&module) {
            Some(ModuleKind::Reading) => payload(&data).map(Outcome::Reading),
            Some(ModuleKind::Dialogue) => payload(&data).map(Outcome::Dialogue),
            Some(ModuleKind::Dilemma) => payload(&data).map(Outcome::Dilemma),
            Some(ModuleKind::Story) => payload(&data).map(Outcome::Story),
            Some(ModuleKind::Flashcards) => payload(&data).map(Outcome::Flashcards),
            Some(ModuleKind::Quiz) => payload(&data).map(Outcome::Quiz),
            None => None,
        };
        typed.unwrap_or(Outcome::Other { module, data })
    }

    /// One-line summary for listings.
    pub fn summary(&self) -> String {
        match self {
            Outcome::Reading(r) => format!("{} ({})", r.title, r.id),
            Outcome::Dialogue(d) => {
                let verb = if d.changed { "revised" } else { "kept" };
                format!("{} [{verb}]", d.prompt)
            }
            Outcome::Dilemma(d) => {
                let fmt = |c: Option<usize>| c.map_or("-".to_string(), |i| (i + 1).to_string());
                format!(
                    "{}: {} -> {}{}",
                    d.id,
                    fmt(d.first),
                    fmt(d.last),
                    if d.changed { " (changed)" } else { "" }
                )
            }
            Outcome::Story(s) => format!("{} ending '{}'", s.id, s.end),
            Outcome::Flashcards(f) => format!("{} cards, {} flipped", f.count, f.flipped),
            Outcome::Quiz(q) => {
                let correct = q.items.iter().filter(|i| i.correct).count();
                format!("{correct}/{} correct, {} points", q.items.len(), q.points)
            }
            Outcome::Other { data, .. } => format!("unrecognized: {data}"),
        }
    }
}

fn payload<T: DeserializeOwned>(data: &Value) -> Option<T> {
    T::deserialize(data).ok()
}

#[derive(Deserialize)]
struct RawOutcome {
    module: String,
    #[serde(default)]
    data: Value,
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_struct("Outcome", 2)?;
        out.serialize_field("module", self.module_name())?;
        match self {
            Outcome::Reading(d) => out.serialize_field("data", d)?,
            Outcome::Dialogue(d) => out.serialize_field("data", d)?,
            Outcome::Dilemma(d) => out.serialize_field("data", d)?,
            Outcome::Story(d) => out.serialize_field("data", d)?,
            Outcome::Flashcards(d) => out.serialize_field("data", d)?,
            Outcome::Quiz(d) => out.serialize_field("data", d)?,
            Outcome::Other { data, .. } => out.serialize_field("data", data)?,
        }
        out.end()
    }
}

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawOutcome { module, data } = RawOutcome::deserialize(deserializer)?;
        Ok(Outcome::from_raw(module, data))
    }
}

/// Reads a choice index, treating negative numbers as "no choice".
fn choice_index<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.and_then(|i| usize::try_from(i).ok()))
}

/// Data recorded for a reading reflection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadingOutcome {
    /// Reading identifier.
    pub id: String,
    /// Reading title.
    pub title: String,
    /// Key ideas noted by the learner.
    #[serde(default)]
    pub ideas: Vec<String>,
    /// The learner's open question.
    #[serde(default)]
    pub question: String,
}

/// Data recorded for a Socratic dialogue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogueOutcome {
    /// The guiding question.
    pub prompt: String,
    /// Whether the learner revised their position.
    pub changed: bool,
    /// Initial position.
    #[serde(default)]
    pub hypothesis: String,
    /// Answers to the four Socratic questions.
    #[serde(default)]
    pub answers: String,
    /// Revised position.
    #[serde(default)]
    pub revision: String,
}

/// Data recorded for a dilemma.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DilemmaOutcome {
    /// Dilemma identifier.
    pub id: String,
    /// Layer A choice, if one was made.
    #[serde(default, deserialize_with = "choice_index")]
    pub first: Option<usize>,
    /// Layer C choice, if one was made.
    #[serde(rename = "final", default, deserialize_with = "choice_index")]
    pub last: Option<usize>,
    /// Whether the final choice differs from the first.
    pub changed: bool,
    /// Written justification.
    #[serde(default)]
    pub why: String,
}

/// Data recorded for a story.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryOutcome {
    /// Story identifier.
    pub id: String,
    /// Name of the terminal node reached.
    pub end: String,
    /// Node names visited, starting with `start`.
    #[serde(default)]
    pub path: Vec<String>,
}

/// Data recorded for a flashcard practice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlashcardOutcome {
    /// Number of cards in the sample.
    pub count: usize,
    /// Number of distinct cards flipped at least once.
    #[serde(default)]
    pub flipped: usize,
}

/// Data recorded for a quiz.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizOutcome {
    /// Per-item results in presentation order.
    pub items: Vec<QuizItemResult>,
    /// Sum of points over all items.
    pub points: u32,
}

/// Result of a single quiz item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItemResult {
    /// Quiz item identifier.
    pub id: String,
    /// Chosen option, or `None` when time ran out.
    pub answer: Option<usize>,
    /// Whether the answer was correct.
    pub correct: bool,
    /// Whether the hint was revealed before answering.
    pub used_hint: bool,
    /// Points awarded.
    pub points: u32,
}

/// Chronological, append-only list of portfolio entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Portfolio {
    entries: Vec<PortfolioEntry>,
}

impl Portfolio {
    /// Create an empty portfolio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end.
    pub fn append(&mut self, entry: PortfolioEntry) {
        self.entries.push(entry);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[PortfolioEntry] {
        &self.entries
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&PortfolioEntry> {
        self.entries.last()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the portfolio is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wholesale replacement, used only by import.
    pub(crate) fn replace(&mut self, entries: Vec<PortfolioEntry>) {
        self.entries = entries;
    }
}

impl From<Vec<PortfolioEntry>> for Portfolio {
    fn from(entries: Vec<PortfolioEntry>) -> Self {
        Self { entries }
    }
}
