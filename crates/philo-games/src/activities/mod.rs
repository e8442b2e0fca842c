//! Activity controllers and the factory that builds them from a unit.

mod dialogue;
mod dilemma;
mod flashcards;
mod quiz;
mod reading;
mod story;

pub use dialogue::DialogueActivity;
pub use dilemma::{DilemmaActivity, DilemmaLayer};
pub use flashcards::FlashcardActivity;
pub use quiz::{Answer, ItemPhase, QuizActivity};
pub use reading::ReadingActivity;
pub use story::StoryActivity;

use philo_core::{AppConfig, ContentUnit, ModuleKind, UnitId};
use rand::Rng;
use tracing::debug;

use crate::activity::Activity;
use crate::error::{GameError, GameResult};
use crate::pick::{pick, sample_indices};

/// Build a fresh controller for `kind` from the unit's content.
///
/// Random choices go through `rng`. A module whose collection is empty in
/// this unit yields [`GameError::NoContent`].
pub fn build<R: Rng + ?Sized>(
    kind: ModuleKind,
    unit_id: UnitId,
    unit: &ContentUnit,
    config: &AppConfig,
    rng: &mut R,
) -> GameResult<Box<dyn Activity>> {
    let empty = || GameError::NoContent {
        module: kind,
        unit: unit_id,
    };
    let activity: Box<dyn Activity> = match kind {
        ModuleKind::Reading => {
            let reading = pick(&unit.readings, rng).ok_or_else(empty)?;
            debug!(id = %reading.id, "reading picked");
            Box::new(ReadingActivity::new(reading.clone()))
        }
        ModuleKind::Dialogue => {
            let topic = pick(&unit.socratic_topics, rng).ok_or_else(empty)?;
            Box::new(DialogueActivity::new(topic.clone()))
        }
        ModuleKind::Dilemma => {
            let dilemma = pick(&unit.dilemmas, rng).ok_or_else(empty)?;
            debug!(id = %dilemma.id, "dilemma picked");
            Box::new(DilemmaActivity::new(dilemma.clone()))
        }
        ModuleKind::Story => {
            let story = pick(&unit.stories, rng).ok_or_else(empty)?;
            debug!(id = %story.id, "story picked");
            Box::new(StoryActivity::new(story.clone())?)
        }
        ModuleKind::Flashcards => {
            if unit.cards.is_empty() {
                return Err(empty());
            }
            let cards = sample_indices(unit.cards.len(), config.flashcard_sample, rng)
                .into_iter()
                .map(|i| unit.cards[i].clone())
                .collect();
            Box::new(FlashcardActivity::new(cards))
        }
        ModuleKind::Quiz => {
            if unit.quiz.is_empty() {
                return Err(empty());
            }
            Box::new(QuizActivity::new(unit_id, unit))
        }
    };
    Ok(activity)
}
