//! Reserved keyword matching.

use regex::Regex;

/// A reserved keyword and its whole-word matcher.
///
/// Matching is case-insensitive. A multi-word keyword (`ORDER BY`) matches
/// its words separated by any run of whitespace, never the words glued
/// together.
#[derive(Debug, Clone)]
pub struct ReservedKeyword {
    spelling: String,
    pattern: Regex,
}

impl ReservedKeyword {
    /// Builds a keyword from its configured spelling.
    ///
    /// Returns `Ok(None)` for a blank entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the escaped pattern exceeds the regex size limits.
    pub fn new(raw: &str) -> Result<Option<Self>, regex::Error> {
        let words: Vec<&str> = raw.split_whitespace().collect();
        let (Some(first), Some(last)) = (words.first(), words.last()) else {
            return Ok(None);
        };

        let body = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join(r"\s+");
        // \b only holds next to a word character
        let lead = if first.starts_with(is_word_char) { r"\b" } else { "" };
        let trail = if last.ends_with(is_word_char) { r"\b" } else { "" };
        let pattern = Regex::new(&format!("(?i){lead}{body}{trail}"))?;

        Ok(Some(Self {
            spelling: words.join(" "),
            pattern,
        }))
    }

    /// The keyword as configured, with whitespace collapsed.
    #[must_use]
    pub fn spelling(&self) -> &str {
        &self.spelling
    }

    /// Sort and deduplication key: the lowercased spelling.
    pub(super) fn key(&self) -> String {
        self.spelling.to_lowercase()
    }

    /// Returns true if `text` contains this keyword as whole words.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword(raw: &str) -> ReservedKeyword {
        ReservedKeyword::new(raw).unwrap().unwrap()
    }

    #[test]
    fn single_word_is_whole_word_and_case_insensitive() {
        let kw = keyword("SELECT");
        assert!(kw.is_match("select rows"));
        assert!(kw.is_match("then Select."));
        assert!(kw.is_match("re-select"));
        assert!(!kw.is_match("selection changes"));
        assert!(!kw.is_match("select_all"));
    }

    #[test]
    fn multi_word_spans_whitespace_only() {
        let kw = keyword("ORDER  BY");
        assert_eq!(kw.spelling(), "ORDER BY");
        assert!(kw.is_match("loans order by status"));
        assert!(kw.is_match("loans ORDER\n  BY status"));
        assert!(!kw.is_match("orderby is one token"));
        assert!(!kw.is_match("order-by"));
    }

    #[test]
    fn punctuation_is_literal() {
        let kw = keyword("$where");
        assert!(kw.is_match("use $where here"));
        assert!(!kw.is_match("use where here"));
    }

    #[test]
    fn blank_entry_is_skipped() {
        assert!(ReservedKeyword::new("   ").unwrap().is_none());
    }
}
