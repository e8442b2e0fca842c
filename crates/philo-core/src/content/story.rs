//! Branching stories: named node graphs with a `start` entry point.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Name of the entry node of every story.
pub const START_NODE: &str = "start";

/// A branching story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// Stable identifier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Nodes by name.
    pub nodes: BTreeMap<String, StoryNode>,
}

/// A single story node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryNode {
    /// Text shown when the node is reached.
    pub text: String,
    /// Outgoing choices. Empty on terminal nodes.
    #[serde(default)]
    pub choices: Vec<StoryChoice>,
    /// Whether this node is an ending.
    #[serde(default)]
    pub end: bool,
}

/// A labeled edge to another node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryChoice {
    /// Label shown to the reader.
    pub label: String,
    /// Name of the target node.
    pub goto: String,
}

impl Story {
    /// Look up a node by name.
    pub fn node(&self, name: &str) -> Option<&StoryNode> {
        self.nodes.get(name)
    }

    /// Names of all terminal nodes.
    pub fn endings(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.end)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Check the graph: a `start` node exists, every choice target exists,
    /// non-terminal nodes offer at least one choice and terminal nodes none.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.nodes.contains_key(START_NODE) {
            return Err(CoreError::InvalidContent(format!(
                "story '{}' has no '{START_NODE}' node",
                self.id
            )));
        }
        for (name, node) in &self.nodes {
            if node.end {
                if !node.choices.is_empty() {
                    return Err(CoreError::InvalidContent(format!(
                        "story '{}': ending '{name}' has choices",
                        self.id
                    )));
                }
                continue;
            }
            if node.choices.is_empty() {
                return Err(CoreError::InvalidContent(format!(
                    "story '{}': node '{name}' is neither an ending nor has choices",
                    self.id
                )));
            }
            for choice in &node.choices {
                if !self.nodes.contains_key(&choice.goto) {
                    return Err(CoreError::InvalidContent(format!(
                        "story '{}': node '{name}' points to missing node '{}'",
                        self.id, choice.goto
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(text: &str, choices: &[(&str, &str)]) -> StoryNode {
        StoryNode {
            text: text.to_string(),
            choices: choices
                .iter()
                .map(|(label, goto)| StoryChoice {
                    label: label.to_string(),
                    goto: goto.to_string(),
                })
                .collect(),
            end: choices.is_empty(),
        }
    }

    fn story(nodes: Vec<(&str, StoryNode)>) -> Story {
        Story {
            id: "s".to_string(),
            title: "S".to_string(),
            nodes: nodes
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    #[test]
    fn valid_story() {
        let s = story(vec![
            ("start", node("Go?", &[("yes", "end")])),
            ("end", node("Done.", &[])),
        ]);
        assert!(s.validate().is_ok());
        assert_eq!(s.endings(), vec!["end"]);
    }

    #[test]
    fn missing_start() {
        let s = story(vec![("end", node("Done.", &[]))]);
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("no 'start' node"));
    }

    #[test]
    fn dangling_choice() {
        let s = story(vec![("start", node("Go?", &[("yes", "nowhere")]))]);
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("missing node 'nowhere'"));
    }

    #[test]
    fn dead_end_without_flag() {
        let mut stuck = node("Stuck.", &[]);
        stuck.end = false;
        let s = story(vec![("start", stuck)]);
        assert!(s.validate().is_err());
    }

    #[test]
    fn cycles_are_allowed() {
        let s = story(vec![
            ("start", node("Loop?", &[("again", "start"), ("stop", "end")])),
            ("end", node("Done.", &[])),
        ]);
        assert!(s.validate().is_ok());
    }
}
