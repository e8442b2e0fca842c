//! Socratic dialogue: state a position, test it, face an objection, revise.

use philo_core::content::SocraticTopic;
use philo_core::state::DialogueOutcome;
use philo_core::{ModuleKind, Outcome};

use crate::activity::{Activity, Effect, Event, Field, Panel, after_finish, not_here};
use crate::error::GameResult;

const KIND: ModuleKind = ModuleKind::Dialogue;
const POINTS_REVISED: u32 = 120;
const POINTS_KEPT: u32 = 90;
const ACHIEVEMENT: &str = "Reasoned change";

/// The four questions asked of every hypothesis.
pub const SOCRATIC_QUESTIONS: [&str; 4] = [
    "Clarify: what do you mean by the key terms?",
    "Evidence: which examples or data support your idea?",
    "Counterexamples: are there cases where your position fails?",
    "Consequences: if this were true, what would follow?",
];

/// Controller for one dialogue.
#[derive(Debug, Clone)]
pub struct DialogueActivity {
    topic: SocraticTopic,
    hypothesis: String,
    answers: String,
    revision: String,
    finished: bool,
}

impl DialogueActivity {
    /// Open a dialogue on `topic`.
    pub fn new(topic: SocraticTopic) -> Self {
        Self {
            topic,
            hypothesis: String::new(),
            answers: String::new(),
            revision: String::new(),
            finished: false,
        }
    }

    /// A position counts as revised once the revision field has content.
    pub fn revised(&self) -> bool {
        !self.revision.trim().is_empty()
    }
}

impl Activity for DialogueActivity {
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
            Event::TimeUp => Ok(vec![Effect::Toast("Debate time is up".to_string())]),
            Event::Write {
                field: field @ (Field::Hypothesis | Field::Answers | Field::Revision),
                text,
            } => {
                let slot = match field {
                    Field::Hypothesis => &mut self.hypothesis,
                    Field::Answers => &mut self.answers,
                    _ => &mut self.revision,
                };
                *slot = text;
                Ok(Vec::new())
            }
            Event::Submit => {
                self.finished = true;
                let changed = self.revised();
                let mut effects = vec![Effect::StopTimer];
                if changed {
                    effects.push(Effect::AddScore(POINTS_REVISED));
                    effects.push(Effect::Achievement(ACHIEVEMENT));
                } else {
                    effects.push(Effect::AddScore(POINTS_KEPT));
                }
                effects.push(Effect::CompleteActivity);
                effects.push(Effect::Record(Outcome::Dialogue(DialogueOutcome {
                    prompt: self.topic.prompt.clone(),
                    changed,
                    hypothesis: self.hypothesis.trim().to_string(),
                    answers: self.answers.trim().to_string(),
                    revision: self.revision.trim().to_string(),
                })));
                effects.push(Effect::Toast("Debate registered".to_string()));
                effects.push(Effect::Finish);
                Ok(effects)
            }
            other => Err(not_here(KIND, &other)),
        }
    }

    fn panel(&self) -> Panel {
        let mut body = vec![format!("Guiding question: {}", self.topic.prompt)];
        if self.finished {
            body.push("Debate registered.".to_string());
            return Panel {
                title: KIND.title().to_string(),
                body,
                ..Panel::default()
            };
        }
        body.push(format!(
            "Initial hypothesis: {}",
            placeholder(&self.hypothesis, "state your position in 2-3 sentences")
        ));
        body.extend(
            SOCRATIC_QUESTIONS
                .iter()
                .enumerate()
                .map(|(i, q)| format!("{}. {q}", i + 1)),
        );
        body.push(format!(
            "Answers: {}",
            placeholder(&self.answers, "answer the four questions briefly")
        ));
        body.push(format!("Socrates objects: {}", self.topic.counter));
        body.push(format!(
            "Revised position: {}",
            placeholder(&self.revision, "do you change anything? why?")
        ));
        if !self.topic.seed_refs.is_empty() {
            body.push(format!("Seeds: {}", self.topic.seed_refs.join(" · ")));
        }
        Panel {
            title: KIND.title().to_string(),
            body,
            options: Vec::new(),
            actions: vec![
                "set hypothesis <text>",
                "set answers <text>",
                "set revision <text>",
                "save",
            ],
            progress: None,
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

fn placeholder(value: &str, hint: &str) -> String {
    if value.trim().is_empty() {
        format!("({hint})")
    } else {
        value.to_string()
    }
}
