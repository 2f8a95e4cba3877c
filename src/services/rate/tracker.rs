use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::debug;

use super::{ActionKind, Clock, RateKey, RateWindows};

/// Sliding-window occurrence counter keyed by (guild, user, action).
///
/// Expiry is lazy: every `track`/`get_count` drops timestamps that have left
/// the window for that action kind before counting. Each key is updated under
/// its DashMap shard lock, so a prune+append is never interleaved with another
/// update of the same key.
#[derive(Debug)]
pub struct RateTracker {
    /// key -> occurrence timestamps (ms), oldest first
    logs: DashMap<RateKey, VecDeque<u64>>,
    windows: RateWindows,
    clock: Arc<dyn Clock>,
}

impl RateTracker {
    pub fn new(windows: RateWindows, clock: Arc<dyn Clock>) -> Self {
        Self {
            logs: DashMap::new(),
            windows,
            clock,
        }
    }

    /// Record one occurrence now and return the count inside the window,
    /// including this one
    pub fn track(&self, scope: u64, subject: u64, kind: ActionKind) -> u32 {
        let now = self.clock.now_ms();
        let window = self.windows.window_for(kind);

        let mut log = self
            .logs
            .entry(RateKey::new(scope, subject, kind))
            .or_default();

        prune(&mut log, now, window);
        // Same-millisecond occurrences are kept as separate entries
        log.push_back(now);

        log.len() as u32
    }

    /// Count occurrences inside the window without recording a new one
    pub fn get_count(&self, scope: u64, subject: u64, kind: ActionKind) -> u32 {
        let now = self.clock.now_ms();
        let window = self.windows.window_for(kind);

        match self.logs.get_mut(&RateKey::new(scope, subject, kind)) {
            Some(mut log) => {
                prune(&mut log, now, window);
                log.len() as u32
            }
            None => 0,
        }
    }

    /// Record a message and report whether the author reached the spam threshold
    pub fn is_spamming(&self, scope: u64, subject: u64, threshold: u32) -> bool {
        self.track(scope, subject, ActionKind::MessageSpam) >= threshold
    }

    /// Drop keys whose occurrences have all expired. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now_ms();
        let before = self.logs.len();

        self.logs.retain(|key, log| {
            prune(log, now, self.windows.window_for(key.kind));
            !log.is_empty()
        });

        before.saturating_sub(self.logs.len())
    }

    /// Number of keys currently held in memory
    pub fn key_count(&self) -> usize {
        self.logs.len()
    }
}

/// Remove timestamps with `now - t >= window` from the front of the log
fn prune(log: &mut VecDeque<u64>, now: u64, window: u64) {
    while let Some(&oldest) = log.front() {
        if now.saturating_sub(oldest) >= window {
            log.pop_front();
        } else {
            break;
        }
    }
}

/// Start the background task that periodically sweeps empty keys
pub fn spawn_sweeper(tracker: Arc<RateTracker>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);

        loop {
            ticker.tick().await;

            let removed = tracker.sweep();
            if removed > 0 {
                debug!(
                    "Rate tracker sweep removed {} idle keys ({} remaining)",
                    removed,
                    tracker.key_count()
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::rate::ManualClock;

    const WINDOWS: RateWindows = RateWindows {
        antinuke_ms: 60_000,
        spam_ms: 5_000,
    };

    fn tracker_at(start: u64) -> (RateTracker, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start));
        (RateTracker::new(WINDOWS, clock.clone()), clock)
    }

    #[test]
    fn test_track_counts_up_then_expires() {
        let (tracker, clock) = tracker_at(1_000_000);

        assert_eq!(tracker.track(1, 10, ActionKind::Ban), 1);
        clock.advance(4_000);
        assert_eq!(tracker.track(1, 10, ActionKind::Ban), 2);
        clock.advance(4_000);
        assert_eq!(tracker.track(1, 10, ActionKind::Ban), 3);

        // 70s after the first call, all three are outside the 60s window
        clock.set(1_000_000 + 70_000);
        assert_eq!(tracker.track(1, 10, ActionKind::Ban), 1);
    }

    #[test]
    fn test_window_boundary_is_exclusive() {
        let (tracker, clock) = tracker_at(0);

        tracker.track(1, 1, ActionKind::Kick);
        clock.advance(59_999);
        assert_eq!(tracker.get_count(1, 1, ActionKind::Kick), 1);
        clock.advance(1);
        assert_eq!(tracker.get_count(1, 1, ActionKind::Kick), 0);
    }

    #[test]
    fn test_same_millisecond_occurrences_all_count() {
        let (tracker, _clock) = tracker_at(500);

        for expected in 1..=4 {
            assert_eq!(tracker.track(7, 8, ActionKind::RoleDelete), expected);
        }
    }

    #[test]
    fn test_keys_are_independent() {
        let (tracker, _clock) = tracker_at(0);

        tracker.track(1, 100, ActionKind::Ban);
        tracker.track(1, 100, ActionKind::Ban);

        assert_eq!(tracker.get_count(1, 100, ActionKind::Ban), 2);
        assert_eq!(tracker.get_count(1, 200, ActionKind::Ban), 0);
        assert_eq!(tracker.get_count(2, 100, ActionKind::Ban), 0);
        assert_eq!(tracker.get_count(1, 100, ActionKind::Kick), 0);
    }

    #[test]
    fn test_get_count_has_no_side_effect() {
        let (tracker, _clock) = tracker_at(0);
        tracker.track(3, 3, ActionKind::ChannelDelete);

        for _ in 0..10 {
            assert_eq!(tracker.get_count(3, 3, ActionKind::ChannelDelete), 1);
        }
        // Peeking an unknown key does not create it
        assert_eq!(tracker.get_count(9, 9, ActionKind::Ban), 0);
        assert_eq!(tracker.key_count(), 1);
    }

    #[test]
    fn test_spam_uses_its_own_window() {
        let (tracker, clock) = tracker_at(0);

        for _ in 0..4 {
            assert!(!tracker.is_spamming(1, 1, 5));
        }
        assert!(tracker.is_spamming(1, 1, 5));

        clock.advance(5_000);
        assert!(!tracker.is_spamming(1, 1, 5));
        assert_eq!(tracker.get_count(1, 1, ActionKind::MessageSpam), 1);
    }

    #[test]
    fn test_sweep_drops_only_expired_keys() {
        let (tracker, clock) = tracker_at(0);

        tracker.track(1, 1, ActionKind::MessageSpam);
        tracker.track(1, 2, ActionKind::Ban);
        clock.advance(10_000);

        assert_eq!(tracker.sweep(), 1);
        assert_eq!(tracker.key_count(), 1);
        assert_eq!(tracker.get_count(1, 2, ActionKind::Ban), 1);
    }
}
