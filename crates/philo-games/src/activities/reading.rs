//! Reading & reflection: read a short text, note three ideas and a question.

use philo_core::content::Reading;
use philo_core::state::ReadingOutcome;
use philo_core::timer::progress_percent;
use philo_core::{ModuleKind, Outcome};
use tracing::debug;

use crate::activity::{Activity, Effect, Event, Field, Panel, after_finish, not_here};
use crate::error::{GameError, GameResult};

const KIND: ModuleKind = ModuleKind::Reading;
const POINTS: u32 = 60;
const ACHIEVEMENT: &str = "Reading completed";

/// Controller for one reading.
#[derive(Debug, Clone)]
pub struct ReadingActivity {
    reading: Reading,
    ideas: [String; 3],
    question: String,
    remaining: u32,
    finished: bool,
}

impl ReadingActivity {
    /// Start reflecting on `reading`.
    pub fn new(reading: Reading) -> Self {
        Self {
            reading,
            ideas: Default::default(),
            question: String::new(),
            remaining: KIND.time_budget(),
            finished: false,
        }
    }

    /// The reading on display.
    pub fn reading(&self) -> &Reading {
        &self.reading
    }

    fn outcome(&self) -> Outcome {
        Outcome::Reading(ReadingOutcome {
            id: self.reading.id.clone(),
            title: self.reading.title.clone(),
            ideas: self
                .ideas
                .iter()
                .map(|i| i.trim())
                .filter(|i| !i.is_empty())
                .map(str::to_string)
                .collect(),
            question: self.question.trim().to_string(),
        })
    }
}

impl Activity for ReadingActivity {
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
            Event::TimeUp => Ok(vec![Effect::Toast("Reading time is up".to_string())]),
            Event::Write {
                field: Field::Idea(n),
                text,
            } => {
                let slot = n
                    .checked_sub(1)
                    .and_then(|i| self.ideas.get_mut(i))
                    .ok_or(GameError::InvalidChoice(n))?;
                *slot = text;
                Ok(Vec::new())
            }
            Event::Write {
                field: Field::Question,
                text,
            } => {
                self.question = text;
                Ok(Vec::new())
            }
            Event::Submit => {
                self.finished = true;
                debug!(id = %self.reading.id, "reflection saved");
                Ok(vec![
                    Effect::StopTimer,
                    Effect::AddScore(POINTS),
                    Effect::CompleteActivity,
                    Effect::Achievement(ACHIEVEMENT),
                    Effect::Record(self.outcome()),
                    Effect::Toast("Reflection saved".to_string()),
                    Effect::Finish,
                ])
            }
            other => Err(not_here(KIND, &other)),
        }
    }

    fn panel(&self) -> Panel {
        let mut body = vec![self.reading.text.clone()];
        body.extend(self.reading.warmups.iter().map(|w| format!("Warm-up: {w}")));
        if self.finished {
            body.push("Reflection saved.".to_string());
            return Panel {
                title: self.reading.title.clone(),
                body,
                ..Panel::default()
            };
        }
        body.push("Before answering: note 3 key ideas and leave 1 open question.".to_string());
        for (i, idea) in self.ideas.iter().enumerate() {
            if !idea.is_empty() {
                body.push(format!("Idea {}: {idea}", i + 1));
            }
        }
        if !self.question.is_empty() {
            body.push(format!("Question: {}", self.question));
        }
        Panel {
            title: self.reading.title.clone(),
            body,
            options: Vec::new(),
            actions: vec!["set idea1|idea2|idea3 <text>", "set question <text>", "save"],
            progress: Some(progress_percent(KIND.time_budget(), self.remaining)),
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
