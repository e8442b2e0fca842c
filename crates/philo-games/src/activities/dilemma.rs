//! Layered ethical dilemma: decide, reread, decide again and justify.

use philo_core::content::Dilemma;
use philo_core::state::DilemmaOutcome;
use philo_core::timer::progress_percent;
use philo_core::{ModuleKind, Outcome};
use tracing::debug;

use crate::activity::{Activity, Effect, Event, Field, Panel, after_finish, not_here};
use crate::error::{GameError, GameResult};

const KIND: ModuleKind = ModuleKind::Dilemma;
const LAYER_POINTS: u32 = 20;
const POINTS_CHANGED: u32 = 120;
const POINTS_KEPT: u32 = 90;
const ACHIEVEMENT: &str = "Critical openness";

/// Which layer is on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DilemmaLayer {
    /// Immediate decision.
    A,
    /// Guided rereading.
    B,
    /// Re-decision and justification.
    C,
}

/// Controller for one dilemma.
#[derive(Debug, Clone)]
pub struct DilemmaActivity {
    dilemma: Dilemma,
    layer: DilemmaLayer,
    first: Option<usize>,
    last: Option<usize>,
    why: String,
    remaining: u32,
    finished: bool,
}

impl DilemmaActivity {
    /// Present `dilemma` at layer A.
    pub fn new(dilemma: Dilemma) -> Self {
        Self {
            dilemma,
            layer: DilemmaLayer::A,
            first: None,
            last: None,
            why: String::new(),
            remaining: KIND.time_budget(),
            finished: false,
        }
    }

    /// Current layer.
    pub fn layer(&self) -> DilemmaLayer {
        self.layer
    }

    /// The re-decision, falling back to the first decision when layer C
    /// was never answered.
    fn final_choice(&self) -> Option<usize> {
        self.last.or(self.first)
    }

    fn check_option(&self, index: usize) -> GameResult<()> {
        if index < self.dilemma.layer_a.len() {
            Ok(())
        } else {
            Err(GameError::InvalidChoice(index))
        }
    }

    fn save(&mut self) -> Vec<Effect> {
        self.finished = true;
        let last = self.final_choice();
        let changed = self.first.is_some() && last != self.first;
        debug!(id = %self.dilemma.id, first = ?self.first, last = ?last, changed, "dilemma saved");
        let mut effects = vec![Effect::StopTimer];
        if changed {
            effects.push(Effect::AddScore(POINTS_CHANGED));
            effects.push(Effect::Achievement(ACHIEVEMENT));
        } else {
            effects.push(Effect::AddScore(POINTS_KEPT));
        }
        effects.push(Effect::CompleteActivity);
        effects.push(Effect::Record(Outcome::Dilemma(DilemmaOutcome {
            id: self.dilemma.id.clone(),
            first: self.first,
            last,
            changed,
            why: self.why.trim().to_string(),
        })));
        effects.push(Effect::Toast("Dilemma saved".to_string()));
        effects.push(Effect::Finish);
        effects
    }
}

impl Activity for DilemmaActivity {
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
        match (self.layer, event) {
            (_, Event::Tick { remaining }) => {
                self.remaining = remaining;
                Ok(Vec::new())
            }
            (_, Event::TimeUp) => Ok(vec![Effect::Toast("Dilemma time is up".to_string())]),
            (DilemmaLayer::A, Event::Choose(i)) => {
                self.check_option(i)?;
                self.first = Some(i);
                self.layer = DilemmaLayer::B;
                Ok(vec![Effect::AddScore(LAYER_POINTS)])
            }
            (DilemmaLayer::B, Event::Continue) => {
                self.layer = DilemmaLayer::C;
                Ok(vec![Effect::AddScore(LAYER_POINTS)])
            }
            (DilemmaLayer::C, Event::Choose(i)) => {
                self.check_option(i)?;
                self.last = Some(i);
                Ok(Vec::new())
            }
            (
                DilemmaLayer::C,
                Event::Write {
                    field: Field::Justification,
                    text,
                },
            ) => {
                self.why = text;
                Ok(Vec::new())
            }
            (_, Event::Submit) => Ok(self.save()),
            (DilemmaLayer::B, Event::Choose(_)) => Err(GameError::unexpected(
                KIND,
                "the first decision is already locked",
            )),
            (_, other) => Err(not_here(KIND, &other)),
        }
    }

    fn panel(&self) -> Panel {
        let d = &self.dilemma;
        let mut body = vec![d.scenario.clone()];
        let mut options = Vec::new();
        let mut actions = Vec::new();
        if let Some(first) = self.first.and_then(|i| d.layer_a.get(i)) {
            body.push(format!("Layer A, your decision: {first}"));
        }
        if self.finished {
            body.push("Dilemma saved.".to_string());
            return Panel {
                title: KIND.title().to_string(),
                body,
                ..Panel::default()
            };
        }
        match self.layer {
            DilemmaLayer::A => {
                body.push("Layer A: immediate decision.".to_string());
                options = d.layer_a.clone();
                actions.push("<number>");
            }
            DilemmaLayer::B => {
                body.push(format!("Layer B: guided rereading. {}", d.layer_b));
                actions.push("continue");
            }
            DilemmaLayer::C => {
                body.push(
                    "Layer C: decide again (you may change) and justify in 2-3 sentences."
                        .to_string(),
                );
                if let Some(last) = self.final_choice().and_then(|i| d.layer_a.get(i)) {
                    body.push(format!("Current choice: {last}"));
                }
                if !self.why.is_empty() {
                    body.push(format!("Justification: {}", self.why));
                }
                if !d.map.is_empty() {
                    body.push(format!("Suggested map: {}", d.map.join(" · ")));
                }
                options = d.layer_a.clone();
                actions.extend(["<number>", "set why <text>"]);
            }
        }
        actions.push("save");
        Panel {
            title: KIND.title().to_string(),
            body,
            options,
            actions,
            progress: Some(progress_percent(KIND.time_budget(), self.remaining)),
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dilemma() -> Dilemma {
        Dilemma {
            id: "III-Trolley".to_string(),
            scenario: "A trolley heads toward five people.".to_string(),
            layer_a: vec![
                "Pull the lever".to_string(),
                "Do nothing".to_string(),
                "Warn them".to_string(),
            ],
            layer_b: "Would your answer hold if you were one of the five?".to_string(),
            map: vec![
                "Utilitarianism".to_string(),
                "Deontology".to_string(),
                "Virtue ethics".to_string(),
            ],
        }
    }

    fn recorded(effects: &[Effect]) -> DilemmaOutcome {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Record(Outcome::Dilemma(d)) => Some(d.clone()),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn full_path_with_change() {
        let mut a = DilemmaActivity::new(dilemma());
        assert_eq!(a.reduce(Event::Choose(0)).unwrap(), vec![Effect::AddScore(20)]);
        assert_eq!(a.layer(), DilemmaLayer::B);
        assert_eq!(a.reduce(Event::Continue).unwrap(), vec![Effect::AddScore(20)]);
        a.reduce(Event::Choose(2)).unwrap();
        a.reduce(Event::Write {
            field: Field::Justification,
            text: "Warning respects everyone.".to_string(),
        })
        .unwrap();
        let effects = a.reduce(Event::Submit).unwrap();
        assert!(effects.contains(&Effect::AddScore(120)));
        assert!(effects.contains(&Effect::Achievement("Critical openness")));
        let d = recorded(&effects);
        assert_eq!((d.first, d.last, d.changed), (Some(0), Some(2), true));
        assert_eq!(d.why, "Warning respects everyone.");
    }

    #[test]
    fn first_decision_is_locked() {
        let mut a = DilemmaActivity::new(dilemma());
        a.reduce(Event::Choose(1)).unwrap();
        assert!(a.reduce(Event::Choose(0)).is_err());
    }

    #[test]
    fn unanswered_layer_c_keeps_first_choice() {
        let mut a = DilemmaActivity::new(dilemma());
        a.reduce(Event::Choose(1)).unwrap();
        a.reduce(Event::Continue).unwrap();
        let effects = a.reduce(Event::Submit).unwrap();
        assert!(effects.contains(&Effect::AddScore(90)));
        let d = recorded(&effects);
        assert_eq!((d.first, d.last, d.changed), (Some(1), Some(1), false));
    }

    #[test]
    fn save_before_deciding_records_nothing_chosen() {
        let mut a = DilemmaActivity::new(dilemma());
        let d = recorded(&a.reduce(Event::Submit).unwrap());
        assert_eq!((d.first, d.last, d.changed), (None, None, false));
    }

    #[test]
    fn out_of_range_option() {
        let mut a = DilemmaActivity::new(dilemma());
        assert!(matches!(
            a.reduce(Event::Choose(3)),
            Err(GameError::InvalidChoice(3))
        ));
        assert_eq!(a.layer(), DilemmaLayer::A);
    }

    #[test]
    fn continue_only_from_layer_b() {
        let mut a = DilemmaActivity::new(dilemma());
        assert!(a.reduce(Event::Continue).is_err());
    }

    #[test]
    fn layer_c_panel_shows_map() {
        let mut a = DilemmaActivity::new(dilemma());
        a.reduce(Event::Choose(0)).unwrap();
        a.reduce(Event::Continue).unwrap();
        let panel = a.panel();
        assert_eq!(panel.options.len(), 3);
        assert!(panel.body.iter().any(|l| l.contains("Deontology")));
        assert!(panel.actions.contains(&"save"));
    }
}
