use crate::config::ModerationConfig;
use crate::services::moderation::decision::{ModerationDecision, Severity, ViolationReason};
use crate::services::rate::{ActionKind, RateTracker};

/// A destructive administrative action seen through the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminAction {
    pub guild_id: u64,
    pub kind: ActionKind,
    /// Who did it, as resolved from the audit log
    pub actor_id: Option<u64>,
    /// The banned/kicked user, deleted channel or deleted role
    pub target_id: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No audit log entry could be matched to the event
    Unattributed,
    /// The bot did it; never counted
    SelfAction,
    WithinLimit {
        count: u32,
        threshold: u32,
    },
    Violation {
        decision: ModerationDecision,
        actor_id: u64,
        count: u32,
        threshold: u32,
        /// Ban floods also undo the ban that tripped the threshold
        revert_ban_of: Option<u64>,
    },
}

impl Verdict {
    pub fn is_violation(&self) -> bool {
        matches!(self, Verdict::Violation { .. })
    }
}

/// Count the action against its actor and decide whether it crossed the
/// per-kind threshold
pub fn assess(
    tracker: &RateTracker,
    config: &ModerationConfig,
    action: &AdminAction,
    bot_id: u64,
) -> Verdict {
    let Some(actor_id) = action.actor_id else {
        return Verdict::Unattributed;
    };

    if actor_id == bot_id {
        return Verdict::SelfAction;
    }

    let count = tracker.track(action.guild_id, actor_id, action.kind);
    let threshold = config.threshold(action.kind);

    if count < threshold {
        return Verdict::WithinLimit { count, threshold };
    }

    let revert_ban_of = match action.kind {
        ActionKind::Ban => action.target_id,
        _ => None,
    };

    Verdict::Violation {
        decision: ModerationDecision::violation(
            ViolationReason::for_action(action.kind),
            Severity::Critical,
        ),
        actor_id,
        count,
        threshold,
        revert_ban_of,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::services::rate::ManualClock;

    const BOT: u64 = 999;

    fn setup() -> (RateTracker, ModerationConfig, Arc<ManualClock>) {
        let config = ModerationConfig::default();
        let clock = Arc::new(ManualClock::new(1_000_000));
        let tracker = RateTracker::new(config.windows(), clock.clone());
        (tracker, config, clock)
    }

    fn ban_by(actor: Option<u64>, victim: u64) -> AdminAction {
        AdminAction {
            guild_id: 1,
            kind: ActionKind::Ban,
            actor_id: actor,
            target_id: Some(victim),
        }
    }

    #[test]
    fn test_ban_flood_trips_on_third_ban() {
        let (tracker, config, clock) = setup();

        assert_eq!(
            assess(&tracker, &config, &ban_by(Some(5), 100), BOT),
            Verdict::WithinLimit { count: 1, threshold: 3 }
        );
        clock.advance(3_000);
        assert_eq!(
            assess(&tracker, &config, &ban_by(Some(5), 101), BOT),
            Verdict::WithinLimit { count: 2, threshold: 3 }
        );
        clock.advance(3_000);

        match assess(&tracker, &config, &ban_by(Some(5), 102), BOT) {
            Verdict::Violation {
                decision,
                actor_id,
                count,
                revert_ban_of,
                ..
            } => {
                assert_eq!(decision.reason, ViolationReason::MassBan);
                assert_eq!(decision.severity, Severity::Critical);
                assert_eq!(actor_id, 5);
                assert_eq!(count, 3);
                assert_eq!(revert_ban_of, Some(102));
            }
            other => panic!("expected violation, got {:?}", other),
        }
    }

    #[test]
    fn test_bot_is_never_a_violator() {
        let (tracker, config, _clock) = setup();

        for victim in 0..20 {
            assert_eq!(
                assess(&tracker, &config, &ban_by(Some(BOT), victim), BOT),
                Verdict::SelfAction
            );
        }
        assert_eq!(tracker.get_count(1, BOT, ActionKind::Ban), 0);
    }

    #[test]
    fn test_unattributed_events_are_ignored() {
        let (tracker, config, _clock) = setup();

        assert_eq!(
            assess(&tracker, &config, &ban_by(None, 100), BOT),
            Verdict::Unattributed
        );
        assert_eq!(tracker.key_count(), 0);
    }

    #[test]
    fn test_channel_deletes_do_not_revert_anything() {
        let (tracker, config, _clock) = setup();
        let action = AdminAction {
            guild_id: 1,
            kind: ActionKind::ChannelDelete,
            actor_id: Some(7),
            target_id: Some(555),
        };

        assert!(!assess(&tracker, &config, &action, BOT).is_violation());
        match assess(&tracker, &config, &action, BOT) {
            Verdict::Violation {
                decision,
                revert_ban_of,
                threshold,
                ..
            } => {
                assert_eq!(decision.reason, ViolationReason::MassChannelDelete);
                assert_eq!(threshold, 2);
                assert_eq!(revert_ban_of, None);
            }
            other => panic!("expected violation, got {:?}", other),
        }
    }

    #[test]
    fn test_window_expiry_resets_the_actor() {
        let (tracker, config, clock) = setup();
        let action = AdminAction {
            guild_id: 1,
            kind: ActionKind::RoleDelete,
            actor_id: Some(8),
            target_id: None,
        };

        assess(&tracker, &config, &action, BOT);
        clock.advance(61_000);
        assert_eq!(
            assess(&tracker, &config, &action, BOT),
            Verdict::WithinLimit { count: 1, threshold: 2 }
        );
    }
}
