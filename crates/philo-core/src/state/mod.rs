//! Session state and the portfolio log.

mod module;
mod portfolio;
mod session_state;

pub use module::ModuleKind;
pub use portfolio::{
    DialogueOutcome, DilemmaOutcome, FlashcardOutcome, Outcome, Portfolio, PortfolioEntry,
    QuizItemResult, QuizOutcome, ReadingOutcome, StoryOutcome,
};
pub use session_state::{CurrentActivity, SessionState};

pub use crate::content::UnitId;
