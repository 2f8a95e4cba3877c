use once_cell::sync::Lazy;
use regex::Regex;

static INVITE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:https?://)?(?:www\.)?(?:discord\.(?:gg|io|me|li)|discord(?:app)?\.com/invite|dsc\.gg)/[a-z0-9-]+",
    )
    .expect("invite link regex")
});

/// One rendered emoji: a flag pair, a keycap, or a pictograph with its
/// optional skin tone, VS16 and tag suffix, chained by ZWJ
static UNICODE_EMOJI: Lazy<Regex> = Lazy::new(|| {
    let pictograph = r"(?:\p{Emoji_Presentation}|\p{Extended_Pictographic}\x{FE0F})\p{Emoji_Modifier}?\x{FE0F}?";
    let joined = r"\x{200D}\p{Extended_Pictographic}\p{Emoji_Modifier}?\x{FE0F}?";
    Regex::new(&format!(
        r"[\x{{1F1E6}}-\x{{1F1FF}}]{{2}}|[0-9#*]\x{{FE0F}}?\x{{20E3}}|{pictograph}(?:{joined})*(?:[\x{{E0020}}-\x{{E007E}}]+\x{{E007F}})?"
    ))
    .expect("emoji regex")
});

static CUSTOM_EMOJI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<a?:\w{2,32}:\d{15,21}>").expect("custom emoji regex"));

/// Uppercase share of the message is above `percent`.
/// Messages of `min_length` characters or fewer are never flagged.
pub fn exceeds_caps_ratio(content: &str, min_length: usize, percent: u32) -> bool {
    let total = content.chars().count();
    if total <= min_length {
        return false;
    }

    let upper = content.chars().filter(|c| c.is_uppercase()).count();
    upper * 100 > percent as usize * total
}

/// Length of the longest run of one repeated character
pub fn longest_run(content: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous = None;

    for c in content.chars() {
        if Some(c) == previous {
            current += 1;
        } else {
            current = 1;
            previous = Some(c);
        }
        longest = longest.max(current);
    }

    longest
}

pub fn has_repeated_run(content: &str, run: usize) -> bool {
    run > 0 && longest_run(content) >= run
}

pub fn contains_invite(content: &str) -> bool {
    INVITE_LINK.is_match(content)
}

/// Unicode emoji plus custom `<:name:id>` emoji. Multi-codepoint emoji
/// (skin tones, flags, families) count once.
pub fn emoji_count(content: &str) -> usize {
    let custom = CUSTOM_EMOJI.find_iter(content).count();
    let unicode = UNICODE_EMOJI.find_iter(content).count();
    custom + unicode
}
