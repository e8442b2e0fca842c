//! The controller contract shared by all six activities.

use std::fmt;
use std::str::FromStr;

use philo_core::{ModuleKind, Outcome};

use crate::error::{GameError, GameResult};

/// A free-text input slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// One of the three key ideas of a reading (1-based).
    Idea(usize),
    /// Open question about a reading.
    Question,
    /// Initial position in a dialogue.
    Hypothesis,
    /// Answers to the Socratic questions.
    Answers,
    /// Revised position in a dialogue.
    Revision,
    /// Justification of a dilemma re-decision.
    Justification,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Idea(n) => write!(f, "idea{n}"),
            Field::Question => f.write_str("question"),
            Field::Hypothesis => f.write_str("hypothesis"),
            Field::Answers => f.write_str("answers"),
            Field::Revision => f.write_str("revision"),
            Field::Justification => f.write_str("why"),
        }
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idea1" => Ok(Field::Idea(1)),
            "idea2" => Ok(Field::Idea(2)),
            "idea3" => Ok(Field::Idea(3)),
            "question" => Ok(Field::Question),
            "hypothesis" => Ok(Field::Hypothesis),
            "answers" => Ok(Field::Answers),
            "revision" => Ok(Field::Revision),
            "why" | "justification" => Ok(Field::Justification),
            other => Err(format!("unknown field '{other}'")),
        }
    }
}

/// Input to a controller: a user action or a timer signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The module timer reported the seconds left.
    Tick {
        /// Seconds left.
        remaining: u32,
    },
    /// The module timer ran out.
    TimeUp,
    /// Pick an option (0-based).
    Choose(usize),
    /// Move on to the next layer.
    Continue,
    /// Reveal the hint of the current quiz item.
    RequestHint,
    /// Turn a flashcard over (0-based).
    Flip(usize),
    /// Fill in a text field.
    Write {
        /// Target field.
        field: Field,
        /// Entered text.
        text: String,
    },
    /// Save / register the activity.
    Submit,
}

impl Event {
    /// Short name for messages.
    pub fn name(&self) -> &'static str {
        match self {
            Event::Tick { .. } => "tick",
            Event::TimeUp => "time-up",
            Event::Choose(_) => "choose",
            Event::Continue => "continue",
            Event::RequestHint => "hint",
            Event::Flip(_) => "flip",
            Event::Write { .. } => "write",
            Event::Submit => "save",
        }
    }
}

/// Work a controller asks the runner to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start (or restart) the module timer.
    StartTimer(u32),
    /// Stop the module timer.
    StopTimer,
    /// Add points to the total score.
    AddScore(u32),
    /// Award a badge.
    Achievement(&'static str),
    /// Count one completed activity.
    CompleteActivity,
    /// Append a portfolio entry.
    Record(Outcome),
    /// Show a toast.
    Toast(String),
    /// The activity reached its terminal state.
    Finish,
}

/// What the shell should display for the current state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panel {
    /// Heading.
    pub title: String,
    /// Paragraphs.
    pub body: Vec<String>,
    /// Numbered options the user can choose from.
    pub options: Vec<String>,
    /// Commands that apply right now.
    pub actions: Vec<&'static str>,
    /// Progress percent, for activities that show a progress bar.
    pub progress: Option<u8>,
}

/// A single activity instance.
pub trait Activity {
    /// Which module this is.
    fn kind(&self) -> ModuleKind;

    /// Effects to run when the activity is shown.
    fn start(&mut self) -> Vec<Effect>;

    /// Apply one event and return the effects it causes.
    fn reduce(&mut self, event: Event) -> GameResult<Vec<Effect>>;

    /// Current view.
    fn panel(&self) -> Panel;

    /// Whether the terminal state was reached.
    fn is_finished(&self) -> bool;
}

/// Common handling once an activity is finished: timer signals are dropped,
/// everything else is refused.
pub(crate) fn after_finish(event: &Event) -> GameResult<Vec<Effect>> {
    match event {
        Event::Tick { .. } | Event::TimeUp => Ok(Vec::new()),
        _ => Err(GameError::Finished),
    }
}

/// Rejection for an event the current state has no use for.
pub(crate) fn not_here(kind: ModuleKind, event: &Event) -> GameError {
    GameError::unexpected(kind, format!("'{}' is not available here", event.name()))
}
