use std::fmt;

use crate::services::rate::ActionKind;

/// Why an event was judged a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationReason {
    None,
    MessageSpam,
    Profanity,
    MentionSpam,
    CapsSpam,
    RepeatSpam,
    InviteLink,
    EmojiSpam,
    MassBan,
    MassKick,
    MassChannelDelete,
    MassRoleDelete,
    /// Issued by a moderator through a command
    Manual,
}

impl ViolationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationReason::None => "none",
            ViolationReason::MessageSpam => "Message Spam",
            ViolationReason::Profanity => "Profanity",
            ViolationReason::MentionSpam => "Mention Spam",
            ViolationReason::CapsSpam => "caps_spam",
            ViolationReason::RepeatSpam => "repeat_spam",
            ViolationReason::InviteLink => "invite_link",
            ViolationReason::EmojiSpam => "emoji_spam",
            ViolationReason::MassBan => "Mass Ban",
            ViolationReason::MassKick => "Mass Kick",
            ViolationReason::MassChannelDelete => "Mass Channel Delete",
            ViolationReason::MassRoleDelete => "Mass Role Delete",
            ViolationReason::Manual => "Manual",
        }
    }

    /// Sentence shown to the author in the transient channel notice
    pub fn notice(&self) -> &'static str {
        match self {
            ViolationReason::MessageSpam => "please slow down, you are sending messages too fast",
            ViolationReason::Profanity => "watch your language",
            ViolationReason::MentionSpam => "too many mentions in one message",
            ViolationReason::CapsSpam => "please don't shout (excessive caps)",
            ViolationReason::RepeatSpam => "please don't spam repeated characters",
            ViolationReason::InviteLink => "invite links are not allowed here",
            ViolationReason::EmojiSpam => "too many emojis in one message",
            _ => "your message broke the server rules",
        }
    }

    /// Reason recorded when a destructive action floods past its threshold
    pub fn for_action(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Ban => ViolationReason::MassBan,
            ActionKind::Kick => ViolationReason::MassKick,
            ActionKind::ChannelDelete => ViolationReason::MassChannelDelete,
            ActionKind::RoleDelete => ViolationReason::MassRoleDelete,
            ActionKind::MessageSpam => ViolationReason::MessageSpam,
        }
    }
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

/// Outcome of evaluating one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModerationDecision {
    pub violating: bool,
    pub reason: ViolationReason,
    pub severity: Severity,
}

impl ModerationDecision {
    pub fn clean() -> Self {
        Self {
            violating: false,
            reason: ViolationReason::None,
            severity: Severity::None,
        }
    }

    pub fn violation(reason: ViolationReason, severity: Severity) -> Self {
        Self {
            violating: true,
            reason,
            severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_labels() {
        assert_eq!(ViolationReason::MessageSpam.to_string(), "Message Spam");
        assert_eq!(ViolationReason::CapsSpam.to_string(), "caps_spam");
        assert_eq!(ViolationReason::for_action(ActionKind::Ban), ViolationReason::MassBan);
        assert_eq!(
            ViolationReason::for_action(ActionKind::RoleDelete),
            ViolationReason::MassRoleDelete
        );
    }

    #[test]
    fn test_clean_decision() {
        let decision = ModerationDecision::clean();
        assert!(!decision.violating);
        assert_eq!(decision.reason, ViolationReason::None);
        assert!(Severity::Critical > Severity::Low);
    }
}
