//! Splits a submitted line into a command token and an argument token.

/// Token delimiter
fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Split `line` into `(command, argument)`.
///
/// The command is the first run of non-blank characters. The argument is
/// everything after the blank run that follows the command, taken verbatim:
/// embedded and trailing blanks are kept. Either token may be empty.
pub fn tokenize(line: &str) -> (&str, &str) {
    let rest = line.trim_start_matches(is_blank);
    let command_end = rest.find(is_blank).unwrap_or(rest.len());
    let (command, rest) = rest.split_at(command_end);
    let argument = rest.trim_start_matches(is_blank);
    (command, argument)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word() {
        assert_eq!(tokenize("help"), ("help", ""));
    }

    #[test]
    fn test_argument_keeps_embedded_spaces() {
        assert_eq!(tokenize("echo hello world"), ("echo", "hello world"));
        assert_eq!(tokenize("echo a   b"), ("echo", "a   b"));
    }

    #[test]
    fn test_leading_and_interior_runs_are_skipped() {
        assert_eq!(tokenize("  ps   -d"), ("ps", "-d"));
        assert_eq!(tokenize("\tps\t-d"), ("ps", "-d"));
    }

    #[test]
    fn test_trailing_spaces_stay_in_argument() {
        assert_eq!(tokenize("echo hi  "), ("echo", "hi  "));
    }

    #[test]
    fn test_command_with_only_trailing_blanks() {
        assert_eq!(tokenize("clear   "), ("clear", ""));
    }

    #[test]
    fn test_empty_and_blank_lines() {
        assert_eq!(tokenize(""), ("", ""));
        assert_eq!(tokenize("    "), ("", ""));
    }

    #[test]
    fn test_argument_never_starts_with_delimiter() {
        for line in ["echo  x", "echo \t x y", "  a b", "ps -d ", "x\t\t\ty"] {
            let (_, argument) = tokenize(line);
            assert!(!argument.starts_with(is_blank), "line {:?}", line);
        }
    }
}
