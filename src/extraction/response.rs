use crate::timecard::TimecardEntry;
use thiserror::Error;

const JSON_FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Model output that did not parse as a list of timecard entries
#[derive(Debug, Error)]
#[error("Failed to parse JSON: {source}")]
pub struct ParseError {
    /// The cleaned text that failed to parse
    pub raw_response: String,
    #[source]
    pub source: serde_json::Error,
}

/// Strip a leading "```json" and trailing "```" fence, trimming whitespace
/// next to each removed marker. Text without fences comes back unchanged.
pub fn clean_response(raw_text: &str) -> String {
    let mut text = raw_text;

    if let Some(rest) = text.strip_prefix(JSON_FENCE_OPEN) {
        text = rest.trim();
    }
    if let Some(rest) = text.strip_suffix(FENCE_CLOSE) {
        text = rest.trim();
    }

    text.to_string()
}

/// Parse cleaned model output into entries.
pub fn parse_entries(cleaned: &str) -> Result<Vec<TimecardEntry>, ParseError> {
    serde_json::from_str(cleaned).map_err(|source| ParseError {
        raw_response: cleaned.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_fenced_json() {
        assert_eq!(
            clean_response("```json\n[{\"day\":\"Monday\"}]\n```"),
            "[{\"day\":\"Monday\"}]"
        );
    }

    #[test]
    fn test_clean_plain_json_untouched() {
        assert_eq!(clean_response("[]"), "[]");
        assert_eq!(clean_response("  [] "), "  [] ");
    }

    #[test]
    fn test_clean_closing_fence_only() {
        assert_eq!(clean_response("[1]\n```"), "[1]");
    }

    #[test]
    fn test_clean_other_language_fence_kept() {
        assert_eq!(clean_response("```python\nx\n```"), "```python\nx");
    }

    #[test]
    fn test_parse_entries() {
        let entries = parse_entries(
            r#"[{"day":"Monday","time_in":"08:00 AM","time_out":"04:30 PM"},
                {"day":"Tuesday","time_in":"09:00 AM","time_out":"05:00 PM"}]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], TimecardEntry::new("Tuesday", "09:00 AM", "05:00 PM"));
    }

    #[test]
    fn test_parse_failure_keeps_raw_text() {
        let err = parse_entries("Sorry, I can't read this image.").unwrap_err();
        assert_eq!(err.raw_response, "Sorry, I can't read this image.");
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_entries(r#"{"day":"Monday"}"#).is_err());
        assert!(parse_entries(r#"["Monday"]"#).is_err());
    }
}
