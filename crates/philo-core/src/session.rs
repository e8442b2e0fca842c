//! The single owner of session state.
//!
//! Every mutating call persists the full state through the [`StateStore`]
//! and then runs the change hook, so the durable copy catches up after each
//! discrete action.

use std::fmt;

use tracing::{info, warn};

use crate::config::{APP_NAME, AppConfig};
use crate::content::UnitId;
use crate::error::CoreResult;
use crate::notify::{Notification, Notifier};
use crate::persist::{ExportDocument, ImportPatch, StateStore};
use crate::state::{ModuleKind, PortfolioEntry, SessionState};

type ChangeHook = Box<dyn FnMut(&SessionState)>;

/// Owns the [`SessionState`], its store, and pending notifications.
pub struct Session {
    state: SessionState,
    store: Box<dyn StateStore>,
    notifier: Notifier,
    on_change: Option<ChangeHook>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// A session with default state. Nothing is read from the store.
    pub fn new(store: impl StateStore + 'static, config: &AppConfig) -> Self {
        Self {
            state: SessionState::default(),
            store: Box::new(store),
            notifier: Notifier::new(config.toast_duration, config.achievement_duration),
            on_change: None,
        }
    }

    /// A session restored from the store, greeting first-time users.
    pub fn open(store: impl StateStore + 'static, config: &AppConfig) -> Self {
        let mut session = Self::new(store, config);
        session.load();
        if session.state.total_score == 0 {
            session.notifier.toast(format!("Welcome to {APP_NAME}"));
        }
        session
    }

    /// Merge the stored document into the defaults. Missing or malformed
    /// documents leave the defaults in place. Returns whether a document was
    /// restored.
    pub fn load(&mut self) -> bool {
        let raw = match self.store.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                warn!(error = %e, "could not read stored state");
                return false;
            }
        };
        match SessionState::restore(&raw) {
            Some(state) => {
                self.state = state;
                true
            }
            None => {
                warn!("discarding malformed stored state");
                false
            }
        }
    }

    /// Write the full state to the store.
    pub fn save(&mut self) -> CoreResult<()> {
        let raw = serde_json::to_string(&self.state)?;
        self.store.write(&raw)
    }

    /// Register a hook that runs after every persisted change.
    pub fn set_on_change(&mut self, hook: impl FnMut(&SessionState) + 'static) {
        self.on_change = Some(Box::new(hook));
    }

    /// Read-only view of the state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The selected unit.
    pub fn unit(&self) -> UnitId {
        self.state.unit
    }

    /// Select a unit.
    pub fn select_unit(&mut self, unit: UnitId) {
        self.state.unit = unit;
        self.changed();
        self.notifier.toast(format!("Unit {unit} selected"));
    }

    /// Add points to the total score.
    pub fn add_score(&mut self, points: u32) {
        self.state.total_score = self.state.total_score.saturating_add(u64::from(points));
        self.changed();
    }

    /// Count a badge and show its banner. Labels are not deduplicated.
    pub fn record_achievement(&mut self, label: &str) {
        self.state.achievements += 1;
        self.notifier.achievement(label);
        self.changed();
    }

    /// Count one completed activity.
    pub fn complete_activity(&mut self) {
        self.state.games_completed += 1;
        self.changed();
    }

    /// Append to the portfolio. Earlier entries are never touched.
    pub fn append_portfolio_entry(&mut self, entry: PortfolioEntry) {
        info!(module = entry.module_name(), unit = %entry.unit, "portfolio entry recorded");
        self.state.portfolio.append(entry);
        self.changed();
    }

    /// Track the activity in progress. Not persisted on its own.
    pub fn set_current(&mut self, module: Option<ModuleKind>, time_left: u32) {
        self.state.current.module = module;
        self.state.current.time_left = time_left;
    }

    /// Queue a toast.
    pub fn toast(&mut self, text: impl Into<String>) {
        self.notifier.toast(text);
    }

    /// Take all pending notifications, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifier.drain()
    }

    /// Snapshot counters and portfolio for backup.
    pub fn export(&self) -> ExportDocument {
        info!(entries = self.state.portfolio.len(), "portfolio exported");
        ExportDocument::from_state(&self.state)
    }

    /// Import a document with the partial-merge rule. On failure the state is
    /// unchanged and an error toast is queued.
    pub fn import(&mut self, text: &str) -> CoreResult<()> {
        match ImportPatch::parse(text) {
            Ok(patch) => {
                patch.apply(&mut self.state);
                self.changed();
                info!(entries = self.state.portfolio.len(), "portfolio imported");
                self.notifier.toast("Portfolio imported");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "import rejected");
                self.notifier.toast("Invalid file");
                Err(e)
            }
        }
    }

    fn changed(&mut self) {
        if let Err(e) = self.save() {
            warn!(error = %e, "could not persist state");
        }
        if let Some(hook) = self.on_change.as_mut() {
            hook(&self.state);
        }
    }
}
