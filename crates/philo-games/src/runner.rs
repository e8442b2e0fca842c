//! Carries out controller effects against the session and the timer.
//!
//! The runner is the only owner of the [`TimerService`] and of the active
//! controller. Timer signals reach the controller only if they carry the
//! handle of the countdown that controller started, so a replaced or stopped
//! countdown can never fire into the wrong activity.

use std::collections::VecDeque;
use std::sync::Arc;

use philo_core::{
    AppConfig, ContentStore, ModuleKind, PortfolioEntry, Session, TimerHandle, TimerService,
    TimerSignal, UnitId,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::activities;
use crate::activity::{Activity, Effect, Event, Panel};
use crate::error::{GameError, GameResult};

struct Active {
    activity: Box<dyn Activity>,
    unit: UnitId,
    timer: Option<TimerHandle>,
}

/// Drives one activity at a time.
pub struct Runner<R = StdRng> {
    session: Session,
    content: Arc<ContentStore>,
    config: AppConfig,
    timer: TimerService,
    rng: R,
    active: Option<Active>,
}

impl Runner<StdRng> {
    /// A runner whose RNG is seeded from `config.seed`, or from OS entropy.
    pub fn new(session: Session, content: Arc<ContentStore>, config: AppConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(session, content, config, rng)
    }
}

impl<R: Rng> Runner<R> {
    /// A runner with an explicit random source.
    pub fn with_rng(
        session: Session,
        content: Arc<ContentStore>,
        config: AppConfig,
        rng: R,
    ) -> Self {
        Self {
            session,
            content,
            config,
            timer: TimerService::new(),
            rng,
            active: None,
        }
    }

    /// The session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access to the session, e.g. for unit selection.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// The content catalog.
    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    /// Module of the activity on display, finished or not.
    pub fn active_kind(&self) -> Option<ModuleKind> {
        self.active.as_ref().map(|a| a.activity.kind())
    }

    /// Whether the activity on display has reached its terminal state.
    pub fn is_finished(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.activity.is_finished())
    }

    /// Current view of the activity.
    pub fn panel(&self) -> Option<Panel> {
        self.active.as_ref().map(|a| a.activity.panel())
    }

    /// Seconds left on the running countdown.
    pub fn remaining(&self) -> Option<u32> {
        self.timer.remaining()
    }

    /// Start a module on the selected unit. Whatever was running is left
    /// first.
    pub fn launch(&mut self, kind: ModuleKind) -> GameResult<()> {
        self.leave();
        let unit_id = self.session.unit();
        let unit = self.content.unit(unit_id)?;
        let mut activity = activities::build(kind, unit_id, unit, &self.config, &mut self.rng)?;
        info!(module = %kind, unit = %unit_id, "activity launched");
        self.session.set_current(Some(kind), kind.time_budget());
        let effects = activity.start();
        self.active = Some(Active {
            activity,
            unit: unit_id,
            timer: None,
        });
        self.run(effects, VecDeque::new())
    }

    /// Feed a user event to the active controller.
    pub fn dispatch(&mut self, event: Event) -> GameResult<()> {
        let active = self.active.as_mut().ok_or(GameError::NoActivity)?;
        debug!(module = %active.activity.kind(), event = event.name(), "dispatch");
        let effects = active.activity.reduce(event)?;
        self.run(effects, VecDeque::new())
    }

    /// One second has elapsed.
    pub fn on_second(&mut self) -> GameResult<()> {
        let mut queue = VecDeque::new();
        for signal in self.timer.advance() {
            self.route(signal, &mut queue);
        }
        self.run(Vec::new(), queue)
    }

    /// Navigate away: stop the timer and drop the controller. Effects that
    /// were already applied stay applied.
    pub fn leave(&mut self) {
        if let Some(active) = self.active.take() {
            if let Some(handle) = active.timer {
                self.timer.cancel(handle);
            }
            debug!(module = %active.activity.kind(), "activity left");
        }
        self.session.set_current(None, 0);
    }

    fn run(&mut self, mut effects: Vec<Effect>, mut queue: VecDeque<Event>) -> GameResult<()> {
        loop {
            for effect in effects.drain(..) {
                self.apply(effect, &mut queue);
            }
            let Some(event) = queue.pop_front() else {
                return Ok(());
            };
            let Some(active) = self.active.as_mut() else {
                return Ok(());
            };
            effects = active.activity.reduce(event)?;
        }
    }

    fn apply(&mut self, effect: Effect, queue: &mut VecDeque<Event>) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let kind = active.activity.kind();
        let unit = active.unit;
        match effect {
            Effect::StartTimer(seconds) => {
                let (handle, signals) = self.timer.start(seconds);
                active.timer = Some(handle);
                for signal in signals {
                    self.route(signal, queue);
                }
            }
            Effect::StopTimer => {
                if let Some(handle) = active.timer.take() {
                    self.timer.cancel(handle);
                }
            }
            Effect::AddScore(points) => self.session.add_score(points),
            Effect::Achievement(label) => self.session.record_achievement(label),
            Effect::CompleteActivity => self.session.complete_activity(),
            Effect::Record(outcome) => self
                .session
                .append_portfolio_entry(PortfolioEntry::now(unit, outcome)),
            Effect::Toast(text) => self.session.toast(text),
            Effect::Finish => {
                if let Some(handle) = active.timer.take() {
                    self.timer.cancel(handle);
                }
                self.session.set_current(None, 0);
                info!(
                    module = %kind,
                    unit = %unit,
                    score = self.session.state().total_score,
                    "activity completed"
                );
            }
        }
    }

    fn route(&mut self, signal: TimerSignal, queue: &mut VecDeque<Event>) {
        let Some(active) = self.active.as_ref() else {
            return;
        };
        if active.timer != Some(signal.handle()) {
            debug!(handle = ?signal.handle(), "dropping stale timer signal");
            return;
        }
        let kind = active.activity.kind();
        match signal {
            TimerSignal::Tick { remaining, .. } => {
                self.session.set_current(Some(kind), remaining);
                queue.push_back(Event::Tick { remaining });
            }
            TimerSignal::Expired { .. } => {
                if let Some(active) = self.active.as_mut() {
                    active.timer = None;
                }
                queue.push_back(Event::TimeUp);
            }
        }
    }
}
