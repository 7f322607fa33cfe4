use crate::error::internal::InternalError;

/// Parses a Discord snowflake stored as a string column.
pub fn parse_snowflake(value: &str) -> Result<u64, InternalError> {
    value
        .parse::<u64>()
        .map_err(|source| InternalError::ParseStringId {
            value: value.to_string(),
            source,
        })
}

/// Truncates `text` to at most `max` characters, appending an ellipsis when
/// anything was cut. Embed field values cap out at 1024 characters.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_snowflake() {
        assert_eq!(parse_snowflake("123456789012345678").unwrap(), 123456789012345678);
    }

    #[test]
    fn rejects_non_numeric_snowflake() {
        assert!(parse_snowflake("abc").is_err());
    }

    #[test]
    fn truncate_keeps_short_text_intact() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn truncate_cuts_long_text_with_marker() {
        let out = truncate("abcdefgh", 4);
        assert_eq!(out, "abcd…");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let out = truncate("한국어텍스트", 3);
        assert_eq!(out, "한국어…");
    }
}
