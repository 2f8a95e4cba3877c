use std::sync::Arc;
use std::time::Duration;

use warden::config::ModerationConfig;
use warden::services::antinuke::{assess, AdminAction, Verdict};
use warden::services::automod::{evaluate, MessageFacts, RuleEnv};
use warden::services::moderation::decision::{Severity, ViolationReason};
use warden::services::rate::{spawn_sweeper, ActionKind, ManualClock, RateTracker};

const GUILD: u64 = 1_000;
const BOT: u64 = 42;

fn setup() -> (Arc<ManualClock>, Arc<RateTracker>, ModerationConfig) {
    let config = ModerationConfig::default();
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let tracker = Arc::new(RateTracker::new(config.windows(), clock.clone()));
    (clock, tracker, config)
}

fn ban_by(actor: u64, target: u64) -> AdminAction {
    AdminAction {
        guild_id: GUILD,
        kind: ActionKind::Ban,
        actor_id: Some(actor),
        target_id: Some(target),
    }
}

fn message(author: u64, content: &str) -> MessageFacts<'_> {
    MessageFacts {
        guild_id: GUILD,
        author_id: author,
        content,
        user_mentions: 0,
        role_mentions: 0,
        is_admin: false,
        can_manage_messages: false,
    }
}

#[test]
fn ban_flood_trips_on_third_ban_and_reverts_it() {
    let (clock, tracker, config) = setup();

    assert!(matches!(
        assess(&tracker, &config, &ban_by(7, 100), BOT),
        Verdict::WithinLimit { count: 1, threshold: 3 }
    ));
    clock.advance(1_000);
    assert!(!assess(&tracker, &config, &ban_by(7, 101), BOT).is_violation());
    clock.advance(1_000);

    match assess(&tracker, &config, &ban_by(7, 102), BOT) {
        Verdict::Violation {
            decision,
            actor_id,
            count,
            revert_ban_of,
            ..
        } => {
            assert_eq!(actor_id, 7);
            assert_eq!(count, 3);
            assert_eq!(revert_ban_of, Some(102));
            assert_eq!(decision.reason, ViolationReason::MassBan);
            assert_eq!(decision.severity, Severity::Critical);
        }
        other => panic!("expected a violation, got {:?}", other),
    }
}

#[test]
fn slow_bans_never_accumulate() {
    let (clock, tracker, config) = setup();

    for target in 0..10 {
        let verdict = assess(&tracker, &config, &ban_by(7, target), BOT);
        assert!(!verdict.is_violation(), "ban {} flagged", target);
        clock.advance(config.antinuke_window_ms);
    }
}

#[test]
fn different_actors_are_counted_separately() {
    let (_clock, tracker, config) = setup();

    for actor in [7, 8] {
        assess(&tracker, &config, &ban_by(actor, 1), BOT);
        assess(&tracker, &config, &ban_by(actor, 2), BOT);
    }

    assert_eq!(tracker.get_count(GUILD, 7, ActionKind::Ban), 2);
    assert_eq!(tracker.get_count(GUILD, 8, ActionKind::Ban), 2);
    assert_eq!(tracker.get_count(GUILD + 1, 7, ActionKind::Ban), 0);
}

#[test]
fn kick_does_not_count_toward_ban_threshold() {
    let (_clock, tracker, config) = setup();

    assess(&tracker, &config, &ban_by(7, 1), BOT);
    assess(&tracker, &config, &ban_by(7, 2), BOT);
    let kick = AdminAction {
        guild_id: GUILD,
        kind: ActionKind::Kick,
        actor_id: Some(7),
        target_id: Some(3),
    };

    assert!(!assess(&tracker, &config, &kick, BOT).is_violation());
    assert_eq!(tracker.get_count(GUILD, 7, ActionKind::Ban), 2);
}

#[test]
fn fifth_quick_message_is_spam() {
    let (clock, tracker, config) = setup();
    let env = RuleEnv {
        tracker: &tracker,
        config: &config,
    };

    for _ in 0..4 {
        assert!(!evaluate(&message(9, "hello there"), &env).violating);
        clock.advance(500);
    }

    let decision = evaluate(&message(9, "hello there"), &env);
    assert!(decision.violating);
    assert_eq!(decision.reason, ViolationReason::MessageSpam);

    // Another member chatting at the same time is unaffected
    assert!(!evaluate(&message(10, "hello there"), &env).violating);
}

#[test]
fn spam_window_resets_after_interval() {
    let (clock, tracker, config) = setup();
    let env = RuleEnv {
        tracker: &tracker,
        config: &config,
    };

    for _ in 0..4 {
        evaluate(&message(9, "ok"), &env);
    }
    clock.advance(config.spam_interval_ms);

    assert!(!evaluate(&message(9, "ok"), &env).violating);
    assert_eq!(tracker.get_count(GUILD, 9, ActionKind::MessageSpam), 1);
}

#[test]
fn sweeper_drops_expired_keys() {
    let (clock, tracker, config) = setup();

    tracker.track(GUILD, 7, ActionKind::Ban);
    tracker.track(GUILD, 8, ActionKind::MessageSpam);
    assert_eq!(tracker.key_count(), 2);

    clock.advance(config.antinuke_window_ms);

    tokio_test::block_on(async {
        let handle = spawn_sweeper(tracker.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();
    });

    assert_eq!(tracker.key_count(), 0);
}
