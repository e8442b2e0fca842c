//! Export and import documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::APP_NAME;
use crate::error::{CoreError, CoreResult};
use crate::state::{PortfolioEntry, SessionState};

/// Version written into export metadata.
pub const FORMAT_VERSION: &str = "1.0";

/// Portable backup of the counters and the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Who wrote the document and when.
    pub meta: ExportMeta,
    /// Scalar counters.
    pub state: ExportCounters,
    /// Full portfolio, oldest first.
    pub portfolio: Vec<PortfolioEntry>,
}

/// Export metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMeta {
    /// Application name.
    pub app_name: String,
    /// Document format version.
    pub format_version: String,
    /// Export time.
    pub exported_at: DateTime<Utc>,
}

/// Counters carried by an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportCounters {
    /// Cumulative score.
    pub total_score: u64,
    /// Completed activities.
    pub games_completed: u64,
    /// Awarded badges.
    pub achievements: u64,
}

impl ExportDocument {
    /// Snapshot the given state.
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            meta: ExportMeta {
                app_name: APP_NAME.to_string(),
                format_version: FORMAT_VERSION.to_string(),
                exported_at: Utc::now(),
            },
            state: ExportCounters {
                total_score: state.total_score,
                games_completed: state.games_completed,
                achievements: state.achievements,
            },
            portfolio: state.portfolio.entries().to_vec(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The changes an import document asks for. Absent fields mean "no change".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportPatch {
    /// Replacement portfolio, when the document carries a `portfolio` array.
    pub portfolio: Option<Vec<PortfolioEntry>>,
    /// New total score.
    pub total_score: Option<u64>,
    /// New completed-activity count.
    pub games_completed: Option<u64>,
    /// New achievement count.
    pub achievements: Option<u64>,
}

impl ImportPatch {
    /// Parse an import document.
    ///
    /// The document must be a JSON object carrying a `portfolio` array or a
    /// `state` object. Every portfolio item must be an entry with a timestamp,
    /// unit and module name; entries from unknown modules are carried over as
    /// opaque entries. Counters that are present and not `null` must be
    /// non-negative whole numbers; otherwise the whole document is rejected.
    pub fn parse(text: &str) -> CoreResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(doc) = value else {
            return Err(CoreError::InvalidDocument(
                "expected a JSON object".to_string(),
            ));
        };

        let portfolio = match doc.get("portfolio") {
            Some(Value::Array(items)) => {
                let entries = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        serde_json::from_value::<PortfolioEntry>(item.clone()).map_err(|e| {
                            CoreError::InvalidDocument(format!("portfolio entry {i}: {e}"))
                        })
                    })
                    .collect::<CoreResult<Vec<_>>>()?;
                Some(entries)
            }
            _ => None,
        };

        let counters = match doc.get("state") {
            Some(Value::Object(state)) => Some(state),
            _ => None,
        };

        if portfolio.is_none() && counters.is_none() {
            return Err(CoreError::InvalidDocument(
                "expected a 'portfolio' array or a 'state' object".to_string(),
            ));
        }

        let mut patch = Self {
            portfolio,
            ..Self::default()
        };
        if let Some(state) = counters {
            patch.total_score = counter(state, "totalScore")?;
            patch.games_completed = counter(state, "gamesCompleted")?;
            patch.achievements = counter(state, "achievements")?;
        }
        Ok(patch)
    }

    /// Apply the patch: replace the portfolio wholesale if given and
    /// overwrite only the counters that are present.
    pub fn apply(self, state: &mut SessionState) {
        if let Some(entries) = self.portfolio {
            state.portfolio.replace(entries);
        }
        if let Some(v) = self.total_score {
            state.total_score = v;
        }
        if let Some(v) = self.games_completed {
            state.games_completed = v;
        }
        if let Some(v) = self.achievements {
            state.achievements = v;
        }
    }
}

fn counter(state: &Map<String, Value>, key: &str) -> CoreResult<Option<u64>> {
    match state.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => whole_number(v)
            .map(Some)
            .ok_or_else(|| CoreError::InvalidDocument(format!("'{key}' must be a non-negative integer"))),
    }
}

fn whole_number(v: &Value) -> Option<u64> {
    v.as_u64().or_else(|| {
        v.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f < u64::MAX as f64)
            .map(|f| f as u64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::UnitId;
    use crate::state::{FlashcardOutcome, Outcome};
    use serde_json::json;

    fn sample_state() -> SessionState {
        let mut state = SessionState {
            total_score: 300,
            games_completed: 4,
            achievements: 3,
            ..SessionState::default()
        };
        state.portfolio.append(PortfolioEntry::now(
            UnitId::I,
            Outcome::Flashcards(FlashcardOutcome {
                count: 6,
                flipped: 1,
            }),
        ));
        state
    }

    #[test]
    fn export_shape() {
        let doc = ExportDocument::from_state(&sample_state());
        let value: Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["meta"]["appName"], json!("PhilosoApp"));
        assert_eq!(value["meta"]["formatVersion"], json!("1.0"));
        assert!(value["meta"]["exportedAt"].is_string());
        assert_eq!(value["state"]["totalScore"], json!(300));
        assert_eq!(value["state"]["gamesCompleted"], json!(4));
        assert_eq!(value["state"]["achievements"], json!(3));
        assert_eq!(value["portfolio"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn export_then_import_restores_counters() {
        let original = sample_state();
        let text = ExportDocument::from_state(&original)
            .to_json_pretty()
            .unwrap();
        let mut fresh = SessionState::default();
        ImportPatch::parse(&text).unwrap().apply(&mut fresh);
        assert_eq!(fresh.total_score, 300);
        assert_eq!(fresh.portfolio, original.portfolio);
    }

    #[test]
    fn partial_merge_leaves_absent_counters() {
        let mut state = sample_state();
        let text = json!({"portfolio": [], "state": {"totalScore": 50}}).to_string();
        ImportPatch::parse(&text).unwrap().apply(&mut state);
        assert_eq!(state.total_score, 50);
        assert_eq!(state.games_completed, 4);
        assert_eq!(state.achievements, 3);
        assert!(state.portfolio.is_empty());
    }

    #[test]
    fn null_counter_means_no_change() {
        let mut state = sample_state();
        let text = json!({"state": {"achievements": null, "gamesCompleted": 9}}).to_string();
        ImportPatch::parse(&text).unwrap().apply(&mut state);
        assert_eq!(state.achievements, 3);
        assert_eq!(state.games_completed, 9);
        assert_eq!(state.portfolio.len(), 1);
    }

    #[test]
    fn whole_float_counters_are_accepted() {
        let mut state = sample_state();
        let text = json!({"state": {"totalScore": 50.0, "achievements": 2.5}}).to_string();
        assert!(ImportPatch::parse(&text).is_err());

        let text = json!({"state": {"totalScore": 50.0, "gamesCompleted": 7}}).to_string();
        ImportPatch::parse(&text).unwrap().apply(&mut state);
        assert_eq!(state.total_score, 50);
        assert_eq!(state.games_completed, 7);
    }

    #[test]
    fn legacy_export_replaces_portfolio() {
        let mut state = sample_state();
        let text = json!({
            "meta": {"app": "PhilosoApp", "version": "1.0", "exportedAt": "2025-04-01T12:00:00.000Z"},
            "state": {"totalScore": 50},
            "portfolio": [
                {"date": "2025-03-01T10:00:00.000Z", "unit": "I", "module": "cards", "data": {"count": 6}},
                {"date": "2025-03-02T10:00:00.000Z", "unit": "II", "module": "stories", "data": {"id": "II-Robot", "end": "free"}},
                {"date": "2025-03-03T10:00:00.000Z", "unit": "II", "module": "debate", "data": {}}
            ]
        })
        .to_string();
        ImportPatch::parse(&text).unwrap().apply(&mut state);
        assert_eq!(state.total_score, 50);
        assert_eq!(state.games_completed, 4);
        assert_eq!(state.portfolio.len(), 3);
        assert_eq!(
            state.portfolio.entries()[0].outcome,
            Outcome::Flashcards(FlashcardOutcome {
                count: 6,
                flipped: 0
            })
        );
        assert_eq!(state.portfolio.entries()[2].module_name(), "debate");
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(ImportPatch::parse("{oops"), Err(CoreError::Json(_))));
    }

    #[test]
    fn rejects_wrong_shapes() {
        for text in ["[]", "42", "\"text\"", "{}", r#"{"portfolio": "none"}"#] {
            assert!(
                matches!(ImportPatch::parse(text), Err(CoreError::InvalidDocument(_))),
                "accepted {text}"
            );
        }
    }

    #[test]
    fn rejects_bad_counter_and_bad_entry() {
        let bad_counter = json!({"state": {"totalScore": -1}}).to_string();
        assert!(ImportPatch::parse(&bad_counter).is_err());
        let bad_entry = json!({"portfolio": [{"unit": "I"}]}).to_string();
        assert!(ImportPatch::parse(&bad_entry).is_err());
    }
}
