//! The single countdown clock shared by all activities.
//!
//! The service does not own a thread. Whoever drives it calls
//! [`TimerService::advance`] once per elapsed second and routes the returned
//! [`TimerSignal`]s. Each start hands out a fresh [`TimerHandle`]; signals
//! carry the handle so stale ones can be told apart after a restart.

use tracing::debug;

/// Seconds at or below which the display should warn.
pub const LOW_TIME_THRESHOLD: u32 = 10;

/// Identifies one started countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Output of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    /// Seconds remaining, reported once at start and once per second.
    Tick {
        /// Countdown that produced the tick.
        handle: TimerHandle,
        /// Seconds left.
        remaining: u32,
    },
    /// The countdown ran out. Sent once, right after the tick reporting zero.
    Expired {
        /// Countdown that expired.
        handle: TimerHandle,
    },
}

impl TimerSignal {
    /// The countdown this signal belongs to.
    pub fn handle(&self) -> TimerHandle {
        match self {
            TimerSignal::Tick { handle, .. } | TimerSignal::Expired { handle } => *handle,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Countdown {
    handle: TimerHandle,
    // Value reported by the next tick.
    next: u32,
}

/// At most one countdown at a time. Starting a new one cancels the old one.
#[derive(Debug, Default)]
pub struct TimerService {
    active: Option<Countdown>,
    last_reported: Option<u32>,
    next_id: u64,
}

impl TimerService {
    /// An idle timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any running countdown and start a new one. Returns the handle
    /// and the signals of the immediate first tick, which reports `seconds`
    /// (and also expires when `seconds` is zero).
    pub fn start(&mut self, seconds: u32) -> (TimerHandle, Vec<TimerSignal>) {
        self.stop();
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.active = Some(Countdown {
            handle,
            next: seconds,
        });
        debug!(seconds, ?handle, "timer started");
        (handle, self.advance())
    }

    /// Cancel the running countdown. Safe to call when idle. Returns whether
    /// something was cancelled.
    pub fn stop(&mut self) -> bool {
        self.last_reported = None;
        match self.active.take() {
            Some(c) => {
                debug!(handle = ?c.handle, "timer stopped");
                true
            }
            None => false,
        }
    }

    /// Cancel only if `handle` is the running countdown.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        if self.current() == Some(handle) {
            self.stop()
        } else {
            false
        }
    }

    /// One second has elapsed. Idle timers produce nothing. Otherwise the
    /// tick is reported; the tick that reports zero is followed by the
    /// expiry, after which the timer is idle.
    pub fn advance(&mut self) -> Vec<TimerSignal> {
        let Some(countdown) = self.active.as_mut() else {
            return Vec::new();
        };
        let handle = countdown.handle;
        let remaining = countdown.next;
        let mut signals = vec![TimerSignal::Tick { handle, remaining }];
        self.last_reported = Some(remaining);
        match remaining.checked_sub(1) {
            Some(next) => countdown.next = next,
            None => {
                self.active = None;
                self.last_reported = None;
                debug!(?handle, "timer expired");
                signals.push(TimerSignal::Expired { handle });
            }
        }
        signals
    }

    /// Whether a countdown is running.
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Handle of the running countdown.
    pub fn current(&self) -> Option<TimerHandle> {
        self.active.map(|c| c.handle)
    }

    /// Seconds left on the running countdown, as last reported.
    pub fn remaining(&self) -> Option<u32> {
        self.active.and(self.last_reported)
    }
}

/// Format seconds as `mm:ss`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Whether the display should show the low-time warning.
pub fn is_low_time(seconds: u32) -> bool {
    seconds <= LOW_TIME_THRESHOLD
}

/// Percent of `budget` already used when `remaining` seconds are left.
pub fn progress_percent(budget: u32, remaining: u32) -> u8 {
    if budget == 0 {
        return 100;
    }
    let used = f64::from(budget.saturating_sub(remaining));
    let pct = (used / f64::from(budget) * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks(signals: &[TimerSignal]) -> Vec<u32> {
        signals
            .iter()
            .filter_map(|s| match s {
                TimerSignal::Tick { remaining, .. } => Some(*remaining),
                TimerSignal::Expired { .. } => None,
            })
            .collect()
    }

    fn expiries(signals: &[TimerSignal]) -> usize {
        signals
            .iter()
            .filter(|s| matches!(s, TimerSignal::Expired { .. }))
            .count()
    }

    #[test]
    fn first_tick_reports_full_duration() {
        let mut t = TimerService::new();
        let (_, first) = t.start(3);
        assert_eq!(ticks(&first), vec![3]);
        assert_eq!(expiries(&first), 0);
        assert!(t.is_running());
    }

    #[test]
    fn expires_once_on_tick_d_plus_one() {
        let mut t = TimerService::new();
        let (handle, mut all) = t.start(3);
        for _ in 0..3 {
            all.extend(t.advance());
        }
        // Tick d+1 (reporting zero) carries the expiry.
        assert_eq!(ticks(&all), vec![3, 2, 1, 0]);
        assert_eq!(expiries(&all), 1);
        assert_eq!(all.last().map(|s| s.handle()), Some(handle));
        assert!(!t.is_running());
        for _ in 0..5 {
            assert!(t.advance().is_empty());
        }
    }

    #[test]
    fn zero_second_timer_expires_at_start() {
        let mut t = TimerService::new();
        let (_, first) = t.start(0);
        assert_eq!(ticks(&first), vec![0]);
        assert_eq!(expiries(&first), 1);
        assert!(t.advance().is_empty());
    }

    #[test]
    fn restart_cancels_previous() {
        let mut t = TimerService::new();
        let (old, _) = t.start(1);
        let (new, _) = t.start(5);
        assert_ne!(old, new);
        for _ in 0..5 {
            let signals = t.advance();
            assert!(signals.iter().all(|s| s.handle() == new));
            assert_eq!(expiries(&signals), 0);
        }
    }

    #[test]
    fn stop_is_idempotent() {
        let mut t = TimerService::new();
        assert!(!t.stop());
        t.start(10);
        assert!(t.stop());
        assert!(!t.stop());
        assert!(t.advance().is_empty());
    }

    #[test]
    fn cancel_ignores_stale_handle() {
        let mut t = TimerService::new();
        let (old, _) = t.start(10);
        let (new, _) = t.start(10);
        assert!(!t.cancel(old));
        assert_eq!(t.current(), Some(new));
        assert!(t.cancel(new));
    }

    #[test]
    fn remaining_tracks_last_tick() {
        let mut t = TimerService::new();
        assert_eq!(t.remaining(), None);
        t.start(90);
        assert_eq!(t.remaining(), Some(90));
        t.advance();
        assert_eq!(t.remaining(), Some(89));
        t.stop();
        assert_eq!(t.remaining(), None);
    }

    #[test]
    fn clock_formatting() {
        insta::assert_snapshot!(format_clock(90), @"01:30");
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(5), "00:05");
    }

    #[test]
    fn low_time_threshold() {
        assert!(is_low_time(10));
        assert!(is_low_time(0));
        assert!(!is_low_time(11));
    }

    #[test]
    fn progress() {
        assert_eq!(progress_percent(180, 180), 0);
        assert_eq!(progress_percent(180, 90), 50);
        assert_eq!(progress_percent(180, 0), 100);
        assert_eq!(progress_percent(0, 0), 100);
    }
}
