//! Branching story: follow choices from `start` until an ending.

use philo_core::content::{START_NODE, Story, StoryNode};
use philo_core::state::StoryOutcome;
use philo_core::{ModuleKind, Outcome};
use tracing::debug;

use crate::activity::{Activity, Effect, Event, Panel, after_finish, not_here};
use crate::error::{GameError, GameResult};

const KIND: ModuleKind = ModuleKind::Story;
const CHOICE_POINTS: u32 = 15;
const ENDING_POINTS: u32 = 100;
const ACHIEVEMENT: &str = "Story completed";

/// Controller for one story. Holds a single cursor; there is no way back.
#[derive(Debug, Clone)]
pub struct StoryActivity {
    story: Story,
    cursor: String,
    path: Vec<String>,
    finished: bool,
}

impl StoryActivity {
    /// Place the cursor on the `start` node.
    pub fn new(story: Story) -> GameResult<Self> {
        if story.node(START_NODE).is_none() {
            return Err(GameError::MissingNode(format!("{}/{START_NODE}", story.id)));
        }
        Ok(Self {
            story,
            cursor: START_NODE.to_string(),
            path: vec![START_NODE.to_string()],
            finished: false,
        })
    }

    /// Name of the node under the cursor.
    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    fn node(&self) -> GameResult<&StoryNode> {
        self.story
            .node(&self.cursor)
            .ok_or_else(|| GameError::MissingNode(self.cursor.clone()))
    }

    fn choose(&mut self, index: usize) -> GameResult<Vec<Effect>> {
        let node = self.node()?;
        if node.end {
            return Err(GameError::unexpected(KIND, "the story has ended; save it"));
        }
        let goto = node
            .choices
            .get(index)
            .map(|c| c.goto.clone())
            .ok_or(GameError::InvalidChoice(index))?;
        if self.story.node(&goto).is_none() {
            return Err(GameError::MissingNode(goto));
        }
        debug!(from = %self.cursor, to = %goto, "story advanced");
        self.path.push(goto.clone());
        self.cursor = goto;
        Ok(vec![Effect::AddScore(CHOICE_POINTS)])
    }

    fn register(&mut self) -> GameResult<Vec<Effect>> {
        if !self.node()?.end {
            return Err(GameError::unexpected(KIND, "no ending reached yet"));
        }
        self.finished = true;
        Ok(vec![
            Effect::StopTimer,
            Effect::AddScore(ENDING_POINTS),
            Effect::CompleteActivity,
            Effect::Achievement(ACHIEVEMENT),
            Effect::Record(Outcome::Story(StoryOutcome {
                id: self.story.id.clone(),
                end: self.cursor.clone(),
                path: self.path.clone(),
            })),
            Effect::Toast("Path registered".to_string()),
            Effect::Finish,
        ])
    }
}

impl Activity for StoryActivity {
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
        match event {
            Event::Tick { .. } => Ok(Vec::new()),
            Event::TimeUp => Ok(vec![Effect::Toast("Story time is up".to_string())]),
            Event::Choose(i) => self.choose(i),
            Event::Submit => self.register(),
            other => Err(not_here(KIND, &other)),
        }
    }

    fn panel(&self) -> Panel {
        let Ok(node) = self.node() else {
            return Panel {
                title: self.story.title.clone(),
                ..Panel::default()
            };
        };
        let mut panel = Panel {
            title: self.story.title.clone(),
            body: vec![node.text.clone()],
            ..Panel::default()
        };
        if self.finished {
            panel.body.push("Path registered.".to_string());
        } else if node.end {
            panel.actions.push("save");
        } else {
            panel.options = node.choices.iter().map(|c| c.label.clone()).collect();
            panel.actions.push("<number>");
        }
        panel
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
