/// Profanity matching for chat messages
/// Whole-word matches for every entry, substring matches for longer entries

/// Entries shorter than this only match as whole words ("ass" must not hit "class")
const SUBSTRING_MIN_LEN: usize = 4;

/// Default blocklist. Words that commonly appear inside harmless words
/// ("hell" in "hello", "arse" in "parse") are left out on purpose.
const DEFAULT_BLOCKLIST: &[&str] = &[
    // Common profanity
    "fuck", "fucking", "fucker", "fucked", "motherfucker",
    "shit", "shitty", "bullshit",
    "ass", "asshole", "dumbass", "jackass",
    "bitch", "bitches",
    "dick", "dickhead",
    "cunt", "cunts",
    "pussy",
    "bastard",
    "whore", "whores",
    "slut", "sluts",
    "twat", "wanker",
    "bollocks",
    // Slurs and hate speech
    "nigger", "nigga", "niggers", "niggas",
    "faggot", "fag", "fags", "faggots",
    "retard", "retarded",
    "chink", "kike", "gook",
    "wetback", "beaner",
    "tranny", "trannies",
    "raghead", "towelhead",
    // Leetspeak variants
    "f4ck", "fvck", "phuck",
    "sh1t", "b1tch", "d1ck",
    "n1gger", "n1gga", "f4gg0t", "r3tard",
];

/// The built-in blocklist as owned, lowercase strings
pub fn default_blocklist() -> Vec<String> {
    DEFAULT_BLOCKLIST.iter().map(|w| w.to_string()).collect()
}

/// Check text against a lowercase blocklist.
/// Returns the first blocked word found, if any.
pub fn find_blocked_word<'a>(text: &str, blocklist: &'a [String]) -> Option<&'a str> {
    let text_lower = text.to_lowercase();

    // Whole words first so the reported word is the one the user typed
    for word in text_lower.split_whitespace() {
        let clean_word = word.trim_matches(|c: char| !c.is_alphanumeric());
        if clean_word.is_empty() {
            continue;
        }
        if let Some(hit) = blocklist.iter().find(|bad| bad.as_str() == clean_word) {
            return Some(hit.as_str());
        }
    }

    // Compound words and words glued to punctuation
    blocklist
        .iter()
        .filter(|bad| bad.chars().count() >= SUBSTRING_MIN_LEN)
        .find(|bad| text_lower.contains(bad.as_str()))
        .map(|bad| bad.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_messages() {
        let list = default_blocklist();
        assert!(find_blocked_word("hello there, nice class today", &list).is_none());
        assert!(find_blocked_word("I need to parse this file", &list).is_none());
        assert!(find_blocked_word("", &list).is_none());
    }

    #[test]
    fn test_whole_word_is_case_insensitive() {
        let list = default_blocklist();
        assert_eq!(find_blocked_word("what the FUCK", &list), Some("fuck"));
        assert_eq!(find_blocked_word("you ass!", &list), Some("ass"));
    }

    #[test]
    fn test_substring_only_for_long_entries() {
        let list = default_blocklist();
        assert_eq!(find_blocked_word("absolutefuckingmess", &list), Some("fuck"));
        // "ass" is too short for substring matching
        assert!(find_blocked_word("massive grass", &list).is_none());
    }

    #[test]
    fn test_custom_list() {
        let list = vec!["badword".to_string(), "no".to_string()];
        assert_eq!(find_blocked_word("that is a BadWord.", &list), Some("badword"));
        assert_eq!(find_blocked_word("No way", &list), Some("no"));
        assert!(find_blocked_word("nothing here", &list).is_none());
    }
}
