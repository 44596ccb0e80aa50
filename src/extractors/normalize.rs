// src/extractors/normalize.rs
use unicode_normalization::UnicodeNormalization;

/// Unicode compatibility decomposition (NFKD) of `text`.
///
/// Non-breaking spaces become plain spaces and precomposed letters are split
/// into base letter plus combining mark, which keeps label matching stable
/// across the various ways filings encode the same characters.
pub fn normalize_text(text: &str) -> String {
    text.nfkd().collect()
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decomposed_input_is_unchanged() {
        let input = "a\u{301}";
        let normalized = normalize_text(input);
        assert_eq!(normalized, input);
        assert_eq!(normalized.chars().count(), 2);
    }

    #[test]
    fn test_precomposed_letter_is_decomposed() {
        assert_eq!(normalize_text("caf\u{e9}"), "cafe\u{301}");
    }

    #[test]
    fn test_non_breaking_space_becomes_space() {
        assert_eq!(normalize_text("Item\u{a0}1A"), "Item 1A");
    }

    #[test]
    fn test_compatibility_forms_are_folded() {
        // Ligature and full-width digit
        assert_eq!(normalize_text("\u{fb01}nancial"), "financial");
        assert_eq!(normalize_text("Item \u{ff11}A"), "Item 1A");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_word_count_handles_unicode_whitespace() {
        assert_eq!(word_count("  Item\u{a0}1A.\n Risk\tFactors "), 4);
        assert_eq!(word_count(""), 0);
    }
}
