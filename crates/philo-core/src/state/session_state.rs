//! The mutable record owned by a session.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::module::ModuleKind;
use super::portfolio::{Portfolio, PortfolioEntry};
use crate::content::UnitId;

/// Everything the app remembers between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    /// Selected lesson unit.
    pub unit: UnitId,
    /// Cumulative score.
    pub total_score: u64,
    /// Number of completed activities.
    pub games_completed: u64,
    /// Number of awarded badges.
    pub achievements: u64,
    /// Completed-activity log.
    pub portfolio: Portfolio,
    /// The activity in progress. Written out but ignored on restore.
    pub current: CurrentActivity,
}

/// The activity in progress and its countdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentActivity {
    /// Active module, if any.
    pub module: Option<ModuleKind>,
    /// Seconds left on the module timer.
    pub time_left: u32,
}

impl SessionState {
    /// Rebuild state from a stored document, field by field.
    ///
    /// Returns `None` when the text is not a JSON object. Fields that are
    /// missing or have the wrong type keep their defaults. Portfolio entries
    /// from unknown modules are kept as opaque entries; only items lacking a
    /// timestamp, unit or module name are dropped.
    pub fn restore(raw: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(raw).ok()?;
        let Value::Object(map) = value else {
            return None;
        };

        let mut state = Self {
            unit: field_or_default(&map, "unit"),
            total_score: field_or_default(&map, "totalScore"),
            games_completed: field_or_default(&map, "gamesCompleted"),
            achievements: field_or_default(&map, "achievements"),
            ..Self::default()
        };

        if let Some(Value::Array(items)) = map.get("portfolio") {
            let mut dropped = 0usize;
            for item in items {
                match serde_json::from_value::<PortfolioEntry>(item.clone()) {
                    Ok(entry) => state.portfolio.append(entry),
                    Err(_) => dropped += 1,
                }
            }
            if dropped > 0 {
                warn!(dropped, "skipped malformed portfolio entries in stored state");
            }
        }

        Some(state)
    }
}

fn field_or_default<T: DeserializeOwned + Default>(map: &Map<String, Value>, key: &str) -> T {
    map.get(key)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default()
}
