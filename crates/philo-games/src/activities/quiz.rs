//! Timed quiz with hints. Each item gets its own countdown.

use philo_core::content::{QuizItem, Reading};
use philo_core::state::{QuizItemResult, QuizOutcome};
use philo_core::timer::progress_percent;
use philo_core::{ContentUnit, ModuleKind, Outcome, UnitId};
use tracing::debug;

use crate::activity::{Activity, Effect, Event, Panel, after_finish, not_here};
use crate::error::{GameError, GameResult};

const KIND: ModuleKind = ModuleKind::Quiz;
const POINTS_WRONG: u32 = 10;
const POINTS_CORRECT: u32 = 70;
const POINTS_WITH_HINT: u32 = 40;
const ACHIEVEMENT_PRECISE: &str = "Accurate answer without hint";
const ACHIEVEMENT_DONE: &str = "Quiz completed";

/// How an item was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// The learner picked this option.
    Selected(usize),
    /// The item's time ran out first.
    NoAnswer,
}

/// Per-item state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPhase {
    /// Question shown, hint hidden.
    Presenting,
    /// Hint and related reading shown.
    HintRevealed,
    /// Terminal for the item.
    Answered(Answer),
}

#[derive(Debug, Clone)]
struct Slot {
    item: QuizItem,
    reading: Option<Reading>,
    phase: ItemPhase,
}

/// Controller for a quiz over all items of a unit, in order.
#[derive(Debug, Clone)]
pub struct QuizActivity {
    unit: UnitId,
    slots: Vec<Slot>,
    results: Vec<QuizItemResult>,
    index: usize,
    remaining: u32,
    finished: bool,
}

impl QuizActivity {
    /// Quiz over the unit's items. Related readings are resolved up front;
    /// an unknown reading id just leaves the hint without one.
    pub fn new(unit_id: UnitId, unit: &ContentUnit) -> Self {
        let slots = unit
            .quiz
            .iter()
            .map(|item| Slot {
                reading: item
                    .read_id
                    .as_deref()
                    .and_then(|id| unit.find_reading(id))
                    .cloned(),
                item: item.clone(),
                phase: ItemPhase::Presenting,
            })
            .collect();
        Self {
            unit: unit_id,
            slots,
            results: Vec::new(),
            index: 0,
            remaining: KIND.time_budget(),
            finished: false,
        }
    }

    /// Zero-based index of the item on display.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Phase of item `index`.
    pub fn phase(&self, index: usize) -> Option<ItemPhase> {
        self.slots.get(index).map(|s| s.phase)
    }

    /// Results of the items answered so far.
    pub fn results(&self) -> &[QuizItemResult] {
        &self.results
    }

    fn current(&mut self) -> GameResult<&mut Slot> {
        self.slots.get_mut(self.index).ok_or(GameError::Finished)
    }

    fn answer(&mut self, answer: Answer) -> GameResult<Vec<Effect>> {
        let slot = self.current()?;
        let used_hint = slot.phase == ItemPhase::HintRevealed;
        slot.phase = ItemPhase::Answered(answer);
        let correct = matches!(answer, Answer::Selected(i) if slot.item.is_correct(i));
        let points = match (correct, used_hint) {
            (false, _) => POINTS_WRONG,
            (true, false) => POINTS_CORRECT,
            (true, true) => POINTS_WITH_HINT,
        };
        debug!(id = %slot.item.id, ?answer, correct, used_hint, points, "quiz item answered");
        let result = QuizItemResult {
            id: slot.item.id.clone(),
            answer: match answer {
                Answer::Selected(i) => Some(i),
                Answer::NoAnswer => None,
            },
            correct,
            used_hint,
            points,
        };
        self.results.push(result);

        let mut effects = vec![Effect::StopTimer, Effect::AddScore(points)];
        if correct && !used_hint {
            effects.push(Effect::Achievement(ACHIEVEMENT_PRECISE));
        }
        let verdict = if correct { "Correct!" } else { "Worth reviewing" };
        effects.push(Effect::Toast(verdict.to_string()));

        self.index += 1;
        if self.index < self.slots.len() {
            self.remaining = KIND.time_budget();
            effects.push(Effect::StartTimer(KIND.time_budget()));
            return Ok(effects);
        }

        self.finished = true;
        let total = self.results.iter().map(|r| r.points).sum();
        effects.extend([
            Effect::Achievement(ACHIEVEMENT_DONE),
            Effect::CompleteActivity,
            Effect::Record(Outcome::Quiz(QuizOutcome {
                items: self.results.clone(),
                points: total,
            })),
            Effect::Finish,
        ]);
        Ok(effects)
    }
}

impl Activity for QuizActivity {
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
            Event::Tick { remaining } => {
                self.remaining = remaining;
                Ok(Vec::new())
            }
            Event::TimeUp => self.answer(Answer::NoAnswer),
            Event::Choose(i) => {
                if i >= self.current()?.item.options.len() {
                    return Err(GameError::InvalidChoice(i));
                }
                self.answer(Answer::Selected(i))
            }
            Event::RequestHint => {
                let slot = self.current()?;
                if slot.phase == ItemPhase::Presenting {
                    slot.phase = ItemPhase::HintRevealed;
                }
                Ok(Vec::new())
            }
            other => Err(not_here(KIND, &other)),
        }
    }

    fn panel(&self) -> Panel {
        let Some(slot) = self.slots.get(self.index).filter(|_| !self.finished) else {
            let total: u32 = self.results.iter().map(|r| r.points).sum();
            return Panel {
                title: "Done!".to_string(),
                body: vec![
                    format!("You completed the unit {} quiz.", self.unit),
                    format!("Points earned: {total}"),
                ],
                ..Panel::default()
            };
        };
        let mut body = vec![slot.item.question.clone()];
        let mut actions = vec!["<number>"];
        if slot.phase == ItemPhase::HintRevealed {
            body.push(format!("Hint: {}", slot.item.hint));
            if let Some(reading) = &slot.reading {
                body.push(format!("Related reading: {}", reading.title));
                body.push(reading.text.clone());
            }
        } else {
            actions.push("hint");
        }
        Panel {
            title: format!("Question {} of {}", self.index + 1, self.slots.len()),
            body,
            options: slot.item.options.clone(),
            actions,
            progress: Some(progress_percent(KIND.time_budget(), self.remaining)),
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
