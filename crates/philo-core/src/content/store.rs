//! The content catalog.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use super::unit::{ContentUnit, UnitId};
use crate::error::{CoreError, CoreResult};

const BUILTIN_CATALOG: &str = include_str!("catalog.json");

#[derive(Deserialize)]
struct Catalog {
    units: BTreeMap<UnitId, ContentUnit>,
}

/// Read-only catalog of lesson units, shared by every activity.
#[derive(Debug, Clone)]
pub struct ContentStore {
    units: BTreeMap<UnitId, ContentUnit>,
}

impl ContentStore {
    /// Parse and validate the catalog embedded in the binary.
    pub fn builtin() -> CoreResult<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog of the form `{"units": {"I": {...}}}`.
    pub fn from_json(text: &str) -> CoreResult<Self> {
        let catalog: Catalog = serde_json::from_str(text)?;
        let store = Self {
            units: catalog.units,
        };
        store.validate()?;
        debug!(units = store.units.len(), "content catalog loaded");
        Ok(store)
    }

    /// Content for a unit.
    pub fn unit(&self, id: UnitId) -> CoreResult<&ContentUnit> {
        self.units
            .get(&id)
            .ok_or_else(|| CoreError::UnknownUnit(id.to_string()))
    }

    /// Iterate over all units in order.
    pub fn units(&self) -> impl Iterator<Item = (UnitId, &ContentUnit)> {
        self.units.iter().map(|(id, unit)| (*id, unit))
    }

    fn validate(&self) -> CoreResult<()> {
        for (id, unit) in &self.units {
            for story in &unit.stories {
                story.validate()?;
            }
            for item in &unit.quiz {
                if item.answer >= item.options.len() {
                    return Err(CoreError::InvalidContent(format!(
                        "unit {id}: quiz item '{}' answer {} out of range",
                        item.id, item.answer
                    )));
                }
            }
            for dilemma in &unit.dilemmas {
                if dilemma.layer_a.len() < 2 {
                    return Err(CoreError::InvalidContent(format!(
                        "unit {id}: dilemma '{}' needs at least two options",
                        dilemma.id
                    )));
                }
                if !dilemma.map.is_empty() && dilemma.map.len() != dilemma.layer_a.len() {
                    return Err(CoreError::InvalidContent(format!(
                        "unit {id}: dilemma '{}' framework map does not match its options",
                        dilemma.id
                    )));
                }
            }
        }
        Ok(())
    }
}
