use chrono::{DateTime, Utc};

/// Discord relative timestamp ("3 hours ago")
pub fn relative_time(at: DateTime<Utc>) -> String {
    format!("<t:{}:R>", at.timestamp())
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("this is far too long", 10), "this is...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_relative_time() {
        let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(relative_time(at), "<t:1700000000:R>");
    }
}
