//! Token splitting and joining.

/// Split `s` on every occurrence of `sep`.
///
/// Empty tokens are kept, including a trailing one: `"a,b,"` yields
/// `["a", "b", ""]`. An empty input yields no tokens at all.
///
/// ```
/// use qadmin_proto::parse_str;
///
/// assert_eq!(parse_str("say_team,tell", ','), vec!["say_team", "tell"]);
/// assert_eq!(parse_str("a,", ','), vec!["a", ""]);
/// assert!(parse_str("", ',').is_empty());
/// ```
pub fn parse_str(s: &str, sep: char) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    s.split(sep).map(str::to_string).collect()
}

/// Join `tokens[start..]` with single spaces.
///
/// Returns an empty string when `start` is past the end.
pub fn join<S: AsRef<str>>(tokens: &[S], start: usize) -> String {
    join_with(tokens, start, ' ')
}

/// Join `tokens[start..]` with `delim`.
pub fn join_with<S: AsRef<str>>(tokens: &[S], start: usize, delim: char) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().skip(start).enumerate() {
        if i > 0 {
            out.push(delim);
        }
        out.push_str(token.as_ref());
    }
    out
}

/// Split a typed console line into arguments.
///
/// Whitespace separates arguments; a double-quoted span is one argument
/// with the quotes removed. An unterminated quote runs to the end of the
/// line. `//` outside quotes starts a comment.
///
/// ```
/// use qadmin_proto::split_args;
///
/// assert_eq!(split_args(r#"admin_ban "Mr Bob" cheating"#), vec!["admin_ban", "Mr Bob", "cheating"]);
/// assert_eq!(split_args("map q3dm17 // comment"), vec!["map", "q3dm17"]);
/// ```
pub fn split_args(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let Some(&c) = chars.peek() else {
            break;
        };

        if c == '"' {
            chars.next();
            let mut arg = String::new();
            for c in chars.by_ref() {
                if c == '"' {
                    break;
                }
                arg.push(c);
            }
            args.push(arg);
            continue;
        }

        let mut arg = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() || c == '"' {
                break;
            }
            if c == '/' && arg.is_empty() {
                let mut lookahead = chars.clone();
                lookahead.next();
                if lookahead.peek() == Some(&'/') {
                    return args;
                }
            }
            arg.push(c);
            chars.next();
        }
        args.push(arg);
    }

    args
}
