//! Read-only lesson content.
//!
//! A [`ContentStore`] maps each [`UnitId`] to a [`ContentUnit`]. The built-in
//! catalog is embedded in the binary and validated when it is parsed.

mod store;
mod story;
mod unit;

pub use store::ContentStore;
pub use story::{Story, StoryChoice, StoryNode, START_NODE};
pub use unit::{Card, ContentUnit, Dilemma, QuizItem, Reading, SocraticTopic, UnitId};
