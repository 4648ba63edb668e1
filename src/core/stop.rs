//! Stop-sequence truncation applied to generated text.

/// Cut `text` right before the earliest occurrence of any stop sequence.
///
/// Returns the text unchanged when no stop sequence occurs or the list is
/// empty. Empty stop strings never match.
pub fn enforce_stop_tokens<S: AsRef<str>>(text: &str, stop: &[S]) -> String {
    let cut = stop
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| !s.is_empty())
        .filter_map(|s| text.find(s))
        .min();

    match cut {
        Some(idx) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_at_single_stop_sequence() {
        assert_eq!(enforce_stop_tokens("Hello, world!", &["world"]), "Hello, ");
    }

    #[test]
    fn earliest_occurrence_wins_regardless_of_list_order() {
        let text = "one two three four";
        assert_eq!(enforce_stop_tokens(text, &["four", "two"]), "one ");
        assert_eq!(enforce_stop_tokens(text, &["two", "four"]), "one ");
    }

    #[test]
    fn overlapping_matches_at_same_offset() {
        assert_eq!(enforce_stop_tokens("abcdef", &["cde", "cd"]), "ab");
    }

    #[test]
    fn no_match_returns_text_unchanged() {
        assert_eq!(
            enforce_stop_tokens("Hello, world!", &["\n\n", "Human:"]),
            "Hello, world!"
        );
    }

    #[test]
    fn empty_stop_list_is_noop() {
        let stop: [&str; 0] = [];
        assert_eq!(enforce_stop_tokens("Hello", &stop), "Hello");
    }

    #[test]
    fn empty_stop_string_is_ignored() {
        assert_eq!(enforce_stop_tokens("Hello", &["", "l"]), "He");
    }

    #[test]
    fn stop_at_start_yields_empty_text() {
        assert_eq!(enforce_stop_tokens("STOP here", &["STOP"]), "");
    }

    #[test]
    fn truncation_is_idempotent() {
        let stop = vec!["world".to_string(), "!".to_string()];
        let once = enforce_stop_tokens("Hello, world! Bye!", &stop);
        let twice = enforce_stop_tokens(&once, &stop);
        assert_eq!(once, "Hello, ");
        assert_eq!(once, twice);
    }

    #[test]
    fn handles_multibyte_text() {
        assert_eq!(enforce_stop_tokens("héllo wörld", &["wö"]), "héllo ");
    }
}
