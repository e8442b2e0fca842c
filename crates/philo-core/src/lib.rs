//! Core types for PhilosoApp: lesson content, session state, and persistence.
//!
//! The [`ContentStore`] is a read-only catalog of lesson units. A [`Session`]
//! owns the mutable [`SessionState`] and persists it through a
//! [`StateStore`] after every mutation. The [`TimerService`] is the single
//! countdown clock shared by all activities.

/// Application configuration.
pub mod config;
/// Lesson content: units, readings, stories, dilemmas, cards and quiz items.
pub mod content;
/// Error types used throughout the crate.
pub mod error;
/// Transient notifications for the presentation shell.
pub mod notify;
/// Durable storage, export and import documents.
pub mod persist;
/// The session owner that mutates and persists state.
pub mod session;
/// Session state and the portfolio log.
pub mod state;
/// The shared countdown timer.
pub mod timer;

/// Re-export configuration.
pub use config::AppConfig;
/// Re-export content types.
pub use content::{ContentStore, ContentUnit};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export notification types.
pub use notify::{Notification, NotificationKind};
/// Re-export persistence types.
pub use persist::{ExportDocument, FileStore, MemoryStore, StateStore};
/// Re-export the session owner.
pub use session::Session;
/// Re-export state types.
pub use state::{ModuleKind, Outcome, PortfolioEntry, SessionState, UnitId};
/// Re-export timer types.
pub use timer::{TimerHandle, TimerService, TimerSignal};
