//! Splits one raw input line into an argument vector on whitespace.

/// Maximum number of tokens kept per line, program name included.
pub const MAX_ARGS: usize = 10;

/// Maximum length of the raw line and of each individual token, in characters.
pub const MAX_COMMAND_SIZE: usize = 255;

/// One slot of the argument vector.
///
/// Consecutive delimiters produce empty split results, which are kept as
/// `None` holes rather than empty strings. A hole still occupies a slot and
/// counts toward [`MAX_ARGS`].
pub type Token = Option<String>;

/// Splits `line` on spaces, tabs and newlines into at most [`MAX_ARGS`]
/// tokens.
///
/// Each token is an independently owned copy, truncated to
/// [`MAX_COMMAND_SIZE`] characters. Pure function; there are no error cases.
pub fn tokenize(line: &str) -> Vec<Token> {
    line.split([' ', '\t', '\n'])
        .take(MAX_ARGS)
        .map(|piece| {
            if piece.is_empty() {
                None
            } else {
                Some(piece.chars().take(MAX_COMMAND_SIZE).collect())
            }
        })
        .collect()
}

/// Collects the present tokens of `tokens` up to the first hole.
///
/// Mirrors how a null-terminated argv reads: everything after a hole is
/// invisible to the command being built.
pub fn leading_args(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map_while(|t| t.as_deref()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(tokens: &[Token]) -> Vec<Option<&str>> {
        tokens.iter().map(|t| t.as_deref()).collect()
    }

    #[test]
    fn splits_on_single_spaces() {
        let tokens = tokenize("ls -l /tmp");
        assert_eq!(owned(&tokens), vec![Some("ls"), Some("-l"), Some("/tmp")]);
    }

    #[test]
    fn consecutive_delimiters_leave_holes() {
        let tokens = tokenize("ls  -l");
        assert_eq!(owned(&tokens), vec![Some("ls"), None, Some("-l")]);
    }

    #[test]
    fn tabs_and_newlines_are_delimiters() {
        let tokens = tokenize("ps\taux\n");
        assert_eq!(owned(&tokens), vec![Some("ps"), Some("aux"), None]);
    }

    #[test]
    fn empty_line_is_a_single_hole() {
        assert_eq!(owned(&tokenize("")), vec![None]);
    }

    #[test]
    fn whitespace_only_line_is_all_holes() {
        assert_eq!(owned(&tokenize("  ")), vec![None, None, None]);
    }

    #[test]
    fn excess_tokens_are_dropped() {
        let line = "a b c d e f g h i j k l m";
        let tokens = tokenize(line);
        assert_eq!(tokens.len(), MAX_ARGS);
        assert_eq!(tokens[0].as_deref(), Some("a"));
        assert_eq!(tokens[MAX_ARGS - 1].as_deref(), Some("j"));
    }

    #[test]
    fn long_tokens_are_truncated() {
        let long = "x".repeat(MAX_COMMAND_SIZE + 50);
        let tokens = tokenize(&long);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].as_ref().unwrap().chars().count(), MAX_COMMAND_SIZE);
    }

    #[test]
    fn leading_args_stops_at_first_hole() {
        let tokens = tokenize("ls -l  -a");
        assert_eq!(leading_args(&tokens), vec!["ls", "-l"]);
        assert_eq!(leading_args(&tokenize("")), Vec::<&str>::new());
    }
}
