//! Concept cards: explain each term aloud, then flip to check.

use philo_core::content::Card;
use philo_core::state::FlashcardOutcome;
use philo_core::{ModuleKind, Outcome};

use crate::activity::{Activity, Effect, Event, Panel, after_finish, not_here};
use crate::error::{GameError, GameResult};

const KIND: ModuleKind = ModuleKind::Flashcards;
const POINTS: u32 = 70;

#[derive(Debug, Clone)]
struct Slot {
    card: Card,
    showing_back: bool,
    seen_back: bool,
}

/// Controller for one practice round over a sample of cards.
#[derive(Debug, Clone)]
pub struct FlashcardActivity {
    slots: Vec<Slot>,
    finished: bool,
}

impl FlashcardActivity {
    /// Practice with `cards`, all face up.
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            slots: cards
                .into_iter()
                .map(|card| Slot {
                    card,
                    showing_back: false,
                    seen_back: false,
                })
                .collect(),
            finished: false,
        }
    }

    /// Number of cards in the round.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the round has no cards.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Cards whose back has been shown at least once.
    pub fn flipped(&self) -> usize {
        self.slots.iter().filter(|s| s.seen_back).count()
    }
}

impl Activity for FlashcardActivity {
    fn kind(&self) -> ModuleKind {
        KIND
    }

    fn start(&mut self) -> Vec<Effect> {
        vec![Effect::StartTimer(KIND.time_budget())]
    }

    fn reduce(&mut self, event: Event) -> GameResult<Vec<Effect>> {
        if self.finished {
            return after_finish(&event);
        }
        match event {
            Event::Tick { .. } => Ok(Vec::new()),
            Event::TimeUp => Ok(vec![Effect::Toast("Card time is up".to_string())]),
            Event::Flip(i) => {
                let slot = self.slots.get_mut(i).ok_or(GameError::InvalidChoice(i))?;
                slot.showing_back = !slot.showing_back;
                slot.seen_back |= slot.showing_back;
                Ok(Vec::new())
            }
            Event::Submit => {
                self.finished = true;
                Ok(vec![
                    Effect::StopTimer,
                    Effect::AddScore(POINTS),
                    Effect::CompleteActivity,
                    Effect::Record(Outcome::Flashcards(FlashcardOutcome {
                        count: self.len(),
                        flipped: self.flipped(),
                    })),
                    Effect::Toast("Practice registered".to_string()),
                    Effect::Finish,
                ])
            }
            other => Err(not_here(KIND, &other)),
        }
    }

    fn panel(&self) -> Panel {
        let mut body = vec!["Tip: explain each concept out loud before flipping.".to_string()];
        body.extend(self.slots.iter().enumerate().map(|(i, s)| {
            if s.showing_back {
                format!("[{}] {}: {}", i + 1, s.card.term, s.card.back)
            } else {
                format!("[{}] {} (say what it means in your own words)", i + 1, s.card.term)
            }
        }));
        let actions = if self.finished {
            body.push("Practice registered.".to_string());
            Vec::new()
        } else {
            vec!["flip <number>", "save"]
        };
        Panel {
            title: KIND.title().to_string(),
            body,
            options: Vec::new(),
            actions,
            progress: None,
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
