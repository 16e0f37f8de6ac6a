//! The inverse transform: encoding decoded tokens back into a single
//! command line that the splitter turns into the same tokens again.

/// Whether `token` must be wrapped in double-quotes to survive re-parsing.
///
/// Empty tokens and tokens holding a separator clearly need it. Tokens
/// holding a backslash are wrapped too — more than the splitting grammar
/// strictly requires, but it confines the backslash-run parity reasoning
/// to one place, the closing quote.
pub fn needs_quoting(token: &str) -> bool {
    token.is_empty() || token.chars().any(|c| matches!(c, ' ' | '\t' | '\\'))
}

/// Encodes one token so the splitter decodes it back unchanged.
///
/// Tokens that need no quoting are emitted verbatim. Quoted tokens get
/// their trailing backslash run doubled, so the closing quote cannot be
/// read as escaped by an odd-length run. Interior double-quotes are left
/// alone; a token containing one does not survive the round trip (see the
/// module tests).
pub fn quotify(token: &str) -> String {
    if !needs_quoting(token) {
        return token.to_string();
    }
    let trailing = token.len() - token.trim_end_matches('\\').len();
    let mut quoted = String::with_capacity(token.len() + trailing + 2);
    quoted.push('"');
    quoted.push_str(token);
    for _ in 0..trailing {
        quoted.push('\\');
    }
    quoted.push('"');
    quoted
}

/// Joins encoded arguments with single spaces into one command line.
pub fn join_args<S: AsRef<str>>(arguments: &[S]) -> String {
    arguments
        .iter()
        .map(|argument| quotify(argument.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Joins an executable name and encoded arguments into one command line.
pub fn join_exe_and_args<S: AsRef<str>>(executable: &str, arguments: &[S]) -> String {
    let mut line = quotify(executable);
    for argument in arguments {
        line.push(' ');
        line.push_str(&quotify(argument.as_ref()));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotify_vectors() {
        let cases = [
            ("a", "a"),
            ("abc", "abc"),
            ("a c", r#""a c""#),
            ("a  c", r#""a  c""#),
            ("a\tc", "\"a\tc\""),
            (r"\abc", r#""\abc""#),
            (r"a\bc", r#""a\bc""#),
            (r"abc\", r#""abc\\""#),
            (r"abc\\", r#""abc\\\\""#),
            ("", r#""""#),
        ];
        for (token, encoded) in cases {
            assert_eq!(quotify(token), encoded, "token {token:?}");
        }
    }

    #[test]
    fn interior_quotes_are_left_alone() {
        assert_eq!(quotify(r#"call"me"#), r#"call"me"#);
        assert_eq!(quotify(r#"call me""#), r#""call me"""#);
    }

    #[test]
    fn join_args_separates_with_single_spaces() {
        let arguments = ["a", "b c", r"d\"];
        assert_eq!(join_args(&arguments), r#"a "b c" "d\\""#);
        assert_eq!(join_args(&[] as &[&str]), "");
    }

    #[test]
    fn join_exe_and_args_encodes_the_executable_too() {
        assert_eq!(join_exe_and_args("exe", &["a"]), "exe a");
        assert_eq!(join_exe_and_args("my exe", &["a", "b c"]), r#""my exe" a "b c""#);
        assert_eq!(join_exe_and_args("exe", &[] as &[&str]), "exe");
    }

    #[test]
    fn embedded_quote_is_a_known_round_trip_gap() {
        let token = r#"call"me"#;
        let line = join_exe_and_args("x", &[token]);
        assert_eq!(line, r#"x call"me"#);
        // The interior quote opens quoting mode on re-parse and is folded
        // away, so the decoded token differs from the input.
        assert_eq!(crate::split_args(&line).unwrap(), ["callme"]);
    }

    #[test]
    fn terminator_in_a_token_truncates_on_reparse() {
        let line = join_exe_and_args("x", &["a\0b"]);
        assert_eq!(line, "x a\0b");
        assert_eq!(crate::split_args(&line).unwrap(), ["a"]);
    }
}
