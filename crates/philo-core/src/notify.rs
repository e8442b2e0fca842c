//! Short-lived messages the shell shows and dismisses on its own.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// What kind of banner to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// A status toast.
    Toast,
    /// An achievement badge.
    Achievement,
}

/// A display request with its auto-dismiss duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Banner kind.
    pub kind: NotificationKind,
    /// Text to show.
    pub text: String,
    /// How long to keep it on screen.
    pub duration: Duration,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NotificationKind::Toast => f.write_str(&self.text),
            NotificationKind::Achievement => write!(f, "Achievement: {}", self.text),
        }
    }
}

/// FIFO of pending notifications.
#[derive(Debug, Clone)]
pub(crate) struct Notifier {
    queue: VecDeque<Notification>,
    toast_duration: Duration,
    achievement_duration: Duration,
}

impl Notifier {
    pub(crate) fn new(toast_duration: Duration, achievement_duration: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            toast_duration,
            achievement_duration,
        }
    }

    pub(crate) fn toast(&mut self, text: impl Into<String>) {
        self.queue.push_back(Notification {
            kind: NotificationKind::Toast,
            text: text.into(),
            duration: self.toast_duration,
        });
    }

    pub(crate) fn achievement(&mut self, text: impl Into<String>) {
        self.queue.push_back(Notification {
            kind: NotificationKind::Achievement,
            text: text.into(),
            duration: self.achievement_duration,
        });
    }

    pub(crate) fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_order_with_durations() {
        let mut n = Notifier::new(Duration::from_millis(10), Duration::from_millis(20));
        n.toast("saved");
        n.achievement("Story completed");
        let all = n.drain();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].kind, NotificationKind::Toast);
        assert_eq!(all[0].duration, Duration::from_millis(10));
        assert_eq!(all[1].to_string(), "Achievement: Story completed");
        assert_eq!(all[1].duration, Duration::from_millis(20));
        assert!(n.drain().is_empty());
    }
}
