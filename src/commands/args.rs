/// Splits raw slash command text into its non-empty tokens.
///
/// Splits on single spaces only, so repeated, leading or trailing spaces
/// never produce empty tokens. Length checks are left to each handler.
///
/// # Examples
///
/// ```
/// use slackbot::commands::args::parse_args;
///
/// assert_eq!(parse_args("  a@x.com   b@y.com hi "), vec!["a@x.com", "b@y.com", "hi"]);
/// assert!(parse_args("").is_empty());
/// ```
#[must_use]
pub fn parse_args(raw_text: &str) -> Vec<String> {
    raw_text
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Joins `tokens[from..]` back with single spaces, or "" if there are none.
#[must_use]
pub fn rest(tokens: &[String], from: usize) -> String {
    tokens.get(from..).map(|t| t.join(" ")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args_drops_empty_tokens() {
        let tokens = parse_args("   one  two   three   ");
        assert_eq!(tokens, vec!["one", "two", "three"]);
        assert!(tokens.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn test_parse_args_is_idempotent() {
        for input in ["a b c", "  a   b ", "", "   ", "single", "x\ty  z"] {
            let once = parse_args(input);
            let twice = parse_args(&once.join(" "));
            assert_eq!(once, twice, "input {input:?}");
        }
    }

    #[test]
    fn test_parse_args_only_splits_on_spaces() {
        // Tabs and newlines stay inside tokens, as the platform delivers them.
        assert_eq!(parse_args("a\tb c"), vec!["a\tb", "c"]);
    }

    #[test]
    fn test_rest_joins_remaining_tokens() {
        let tokens = parse_args("a b c d e");
        assert_eq!(rest(&tokens, 2), "c d e");
        assert_eq!(rest(&tokens, 5), "");
        assert_eq!(rest(&tokens, 9), "");
    }
}
