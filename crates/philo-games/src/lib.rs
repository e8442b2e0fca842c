//! Activity controllers for PhilosoApp.
//!
//! Each of the six activities is a small state machine implementing
//! [`Activity`]: it consumes [`Event`]s and returns [`Effect`]s as data. The
//! [`Runner`] owns the session, the timer and the active controller, and is
//! the only place where effects are carried out.

/// The six activity controllers.
pub mod activities;
/// Events, effects, views and the controller trait.
pub mod activity;
/// Error types for activity handling.
pub mod error;
/// Seedable content selection.
pub mod pick;
/// Effect execution and timer routing.
pub mod runner;

pub use activity::{Activity, Effect, Event, Field, Panel};
pub use error::{GameError, GameResult};
pub use runner::Runner;
