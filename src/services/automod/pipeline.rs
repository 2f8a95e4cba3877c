use crate::config::ModerationConfig;
use crate::services::automod::rules;
use crate::services::moderation::decision::{ModerationDecision, Severity, ViolationReason};
use crate::services::rate::RateTracker;
use crate::utils::profanity;

/// What the content rules need to know about one message
#[derive(Debug, Clone)]
pub struct MessageFacts<'a> {
    pub guild_id: u64,
    pub author_id: u64,
    pub content: &'a str,
    pub user_mentions: usize,
    pub role_mentions: usize,
    pub is_admin: bool,
    pub can_manage_messages: bool,
}

/// Shared state and thresholds available to every rule
pub struct RuleEnv<'a> {
    pub tracker: &'a RateTracker,
    pub config: &'a ModerationConfig,
}

/// One entry of the ordered rule list
pub struct ContentRule {
    pub reason: ViolationReason,
    pub severity: Severity,
    pub matches: fn(&MessageFacts<'_>, &RuleEnv<'_>) -> bool,
}

/// Evaluated top to bottom; the first match decides the message.
/// The spam rule stays first so every message is counted.
pub static CONTENT_RULES: &[ContentRule] = &[
    ContentRule {
        reason: ViolationReason::MessageSpam,
        severity: Severity::Medium,
        matches: is_spamming,
    },
    ContentRule {
        reason: ViolationReason::Profanity,
        severity: Severity::Medium,
        matches: has_profanity,
    },
    ContentRule {
        reason: ViolationReason::MentionSpam,
        severity: Severity::High,
        matches: has_mention_flood,
    },
    ContentRule {
        reason: ViolationReason::CapsSpam,
        severity: Severity::Low,
        matches: has_excess_caps,
    },
    ContentRule {
        reason: ViolationReason::RepeatSpam,
        severity: Severity::Low,
        matches: has_repeated_characters,
    },
    ContentRule {
        reason: ViolationReason::InviteLink,
        severity: Severity::Medium,
        matches: has_invite_link,
    },
    ContentRule {
        reason: ViolationReason::EmojiSpam,
        severity: Severity::Low,
        matches: has_emoji_flood,
    },
];

/// Run the content rules against a message
pub fn evaluate(facts: &MessageFacts<'_>, env: &RuleEnv<'_>) -> ModerationDecision {
    if facts.is_admin {
        return ModerationDecision::clean();
    }

    CONTENT_RULES
        .iter()
        .find(|rule| (rule.matches)(facts, env))
        .map(|rule| ModerationDecision::violation(rule.reason, rule.severity))
        .unwrap_or_else(ModerationDecision::clean)
}

fn is_spamming(facts: &MessageFacts<'_>, env: &RuleEnv<'_>) -> bool {
    env.tracker
        .is_spamming(facts.guild_id, facts.author_id, env.config.spam_threshold)
}

fn has_profanity(facts: &MessageFacts<'_>, env: &RuleEnv<'_>) -> bool {
    profanity::find_blocked_word(facts.content, &env.config.blocked_words).is_some()
}

fn has_mention_flood(facts: &MessageFacts<'_>, env: &RuleEnv<'_>) -> bool {
    facts.user_mentions + facts.role_mentions > env.config.max_mentions
}

fn has_excess_caps(facts: &MessageFacts<'_>, env: &RuleEnv<'_>) -> bool {
    rules::exceeds_caps_ratio(
        facts.content,
        env.config.caps_min_length,
        env.config.caps_percent,
    )
}

fn has_repeated_characters(facts: &MessageFacts<'_>, env: &RuleEnv<'_>) -> bool {
    rules::has_repeated_run(facts.content, env.config.repeat_run)
}

fn has_invite_link(facts: &MessageFacts<'_>, _env: &RuleEnv<'_>) -> bool {
    !facts.can_manage_messages && rules::contains_invite(facts.content)
}

fn has_emoji_flood(facts: &MessageFacts<'_>, env: &RuleEnv<'_>) -> bool {
    rules::emoji_count(facts.content) > env.config.max_emojis
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::services::rate::{ActionKind, ManualClock};

    fn setup() -> (RateTracker, ModerationConfig) {
        let config = ModerationConfig::default();
        let tracker = RateTracker::new(config.windows(), Arc::new(ManualClock::new(0)));
        (tracker, config)
    }

    fn facts(content: &str) -> MessageFacts<'_> {
        MessageFacts {
            guild_id: 1,
            author_id: 42,
            content,
            user_mentions: 0,
            role_mentions: 0,
            is_admin: false,
            can_manage_messages: false,
        }
    }

    #[test]
    fn test_clean_message() {
        let (tracker, config) = setup();
        let env = RuleEnv { tracker: &tracker, config: &config };

        let decision = evaluate(&facts("hey, how is everyone doing?"), &env);
        assert_eq!(decision, ModerationDecision::clean());
        // Clean messages still count toward the spam window
        assert_eq!(tracker.get_count(1, 42, ActionKind::MessageSpam), 1);
    }

    #[test]
    fn test_first_match_wins() {
        let (tracker, config) = setup();
        let env = RuleEnv { tracker: &tracker, config: &config };

        let mut message = facts("shit @a @b @c @d @e @f");
        message.user_mentions = 6;

        let decision = evaluate(&message, &env);
        assert!(decision.violating);
        assert_eq!(decision.reason, ViolationReason::Profanity);
    }

    #[test]
    fn test_mention_flood_boundary() {
        let (tracker, config) = setup();
        let env = RuleEnv { tracker: &tracker, config: &config };

        let mut message = facts("hello friends");
        message.user_mentions = 3;
        message.role_mentions = 2;
        assert!(!evaluate(&message, &env).violating);

        message.role_mentions = 3;
        assert_eq!(evaluate(&message, &env).reason, ViolationReason::MentionSpam);
    }

    #[test]
    fn test_spam_trips_on_threshold() {
        let (tracker, config) = setup();
        let env = RuleEnv { tracker: &tracker, config: &config };

        for _ in 1..config.spam_threshold {
            assert!(!evaluate(&facts("hi"), &env).violating);
        }
        let decision = evaluate(&facts("hi"), &env);
        assert_eq!(decision.reason, ViolationReason::MessageSpam);
        assert_eq!(decision.severity, Severity::Medium);
    }

    #[test]
    fn test_repeat_and_caps() {
        let (tracker, config) = setup();
        let env = RuleEnv { tracker: &tracker, config: &config };

        assert_eq!(evaluate(&facts("hmmmmmm"), &env).reason, ViolationReason::RepeatSpam);
        assert!(!evaluate(&facts("hmmmmm"), &env).violating);
        assert_eq!(
            evaluate(&facts("WHY IS NOBODY ANSWERING"), &env).reason,
            ViolationReason::CapsSpam
        );
    }

    #[test]
    fn test_invite_exempt_for_message_managers() {
        let (tracker, config) = setup();
        let env = RuleEnv { tracker: &tracker, config: &config };

        let mut message = facts("come to discord.gg/raid");
        assert_eq!(evaluate(&message, &env).reason, ViolationReason::InviteLink);

        message.author_id = 43;
        message.can_manage_messages = true;
        assert!(!evaluate(&message, &env).violating);
    }

    #[test]
    fn test_emoji_flood() {
        let (tracker, config) = setup();
        let env = RuleEnv { tracker: &tracker, config: &config };

        let many = "🎉 ".repeat(config.max_emojis + 1);
        assert_eq!(evaluate(&facts(&many), &env).reason, ViolationReason::EmojiSpam);

        let few = "🎉 ".repeat(config.max_emojis);
        assert!(!evaluate(&facts(&few), &env).violating);
    }

    #[test]
    fn test_admins_are_skipped() {
        let (tracker, config) = setup();
        let env = RuleEnv { tracker: &tracker, config: &config };

        let mut message = facts("fuck discord.gg/abc AAAAAAAA");
        message.is_admin = true;
        assert!(!evaluate(&message, &env).violating);
        assert_eq!(tracker.get_count(1, 42, ActionKind::MessageSpam), 0);
    }
}
