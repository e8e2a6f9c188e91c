//! Classification of a token stream into positional and named arguments.

use std::ffi::OsString;

use crate::set::ArgumentSet;
use crate::tokenize::split;

/// Tokenize `input` and classify the tokens.
///
/// Returns `None` when the input yields no arguments.
pub fn parse_arguments(input: &str) -> Option<ArgumentSet> {
    parse_tokens(&split(input))
}

/// Classify the current process arguments (program name excluded).
///
/// Arguments that are not valid UTF-8 are converted lossily.
pub fn parse_env_args() -> Option<ArgumentSet> {
    parse_os_args(std::env::args_os().skip(1))
}

/// Classify OS-native argument strings, converting invalid UTF-8 lossily.
pub fn parse_os_args<I>(args: I) -> Option<ArgumentSet>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let argv: Vec<String> = args
        .into_iter()
        .map(|arg| match Into::<OsString>::into(arg).into_string() {
            Ok(arg) => arg,
            Err(raw) => {
                tracing::debug!(arg = ?raw, "argument is not valid UTF-8; converting lossily");
                raw.to_string_lossy().into_owned()
            }
        })
        .collect();
    parse_tokens(&argv)
}

/// Classify pre-split tokens.
///
/// - Leading tokens up to the first one starting with `-` are positionals `"0"`, `"1"`, ...
/// - After that, a flag (all leading dashes stripped) takes the next token as its value
///   unless that token is also a flag or there is none, in which case its value is empty.
/// - Non-flag tokens that are not consumed as a value are dropped.
/// - A repeated flag overwrites the earlier value.
///
/// Returns `None` when nothing was classified.
pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> Option<ArgumentSet> {
    let mut set = ArgumentSet::new();

    let positional_count = tokens
        .iter()
        .take_while(|token| !is_flag((*token).as_ref()))
        .count();
    for (index, token) in tokens[..positional_count].iter().enumerate() {
        set.insert(&index.to_string(), token.as_ref().to_string());
    }

    let mut i = positional_count;
    while i < tokens.len() {
        let token = tokens[i].as_ref();
        if !is_flag(token) {
            tracing::debug!(token, position = i, "dropping stray token after flags");
            i += 1;
            continue;
        }

        let name = token.trim_start_matches('-').trim();
        let next: Option<&str> = tokens.get(i + 1).map(|next| next.as_ref());
        let (value, step) = match next {
            Some(next) if !is_flag(next) => (next.trim(), 2),
            _ => ("", 1),
        };

        if let Some(previous) = set.insert(name, value.to_string()) {
            tracing::debug!(flag = name, %previous, "repeated flag overwrites earlier value");
        }
        i += step;
    }

    if set.is_empty() { None } else { Some(set) }
}

fn is_flag(token: &str) -> bool {
    token.starts_with('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(set: &ArgumentSet) -> Vec<(&str, &str)> {
        set.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn empty_input_has_no_result() {
        assert!(parse_arguments("").is_none());
        assert!(parse_arguments("   ").is_none());
        assert!(parse_tokens::<&str>(&[]).is_none());
    }

    #[test]
    fn quoted_named_value() {
        let set = parse_arguments(r#"--names "Tacitus Kilgore""#).unwrap();
        assert_eq!(pairs(&set), vec![("names", "Tacitus Kilgore")]);
        assert_eq!(set.value("NAMES"), Some("Tacitus Kilgore"));
    }

    #[test]
    fn positional_then_short_and_long_flags() {
        let set = parse_arguments("command -p value1 --param2 value2").unwrap();
        assert_eq!(
            pairs(&set),
            vec![("0", "command"), ("p", "value1"), ("param2", "value2")]
        );
    }

    #[test]
    fn switch_followed_by_flag() {
        let set = parse_arguments("command -p -f text.txt").unwrap();
        assert_eq!(pairs(&set), vec![("0", "command"), ("p", ""), ("f", "text.txt")]);
    }

    #[test]
    fn trailing_switch_and_quoted_value() {
        let set = parse_arguments(r#"command -p fast -f "text.txt text2.txt" -v"#).unwrap();
        assert_eq!(
            pairs(&set),
            vec![
                ("0", "command"),
                ("p", "fast"),
                ("f", "text.txt text2.txt"),
                ("v", ""),
            ]
        );
    }

    #[test]
    fn multiple_positionals() {
        let set = parse_arguments("git remote add origin").unwrap();
        assert_eq!(
            pairs(&set),
            vec![("0", "git"), ("1", "remote"), ("2", "add"), ("3", "origin")]
        );
    }

    #[test]
    fn stray_tokens_after_flags_are_dropped() {
        let set = parse_arguments("cmd -a 1 orphan another -b 2").unwrap();
        assert_eq!(pairs(&set), vec![("0", "cmd"), ("a", "1"), ("b", "2")]);
    }

    #[test]
    fn all_leading_dashes_are_stripped() {
        let set = parse_arguments("---deep x -Short y").unwrap();
        assert_eq!(pairs(&set), vec![("deep", "x"), ("short", "y")]);
    }

    #[test]
    fn repeated_flag_last_wins_case_insensitively() {
        let set = parse_arguments("cmd --Mode a --mode b").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.value("mode"), Some("b"));
    }

    #[test]
    fn flag_names_and_values_are_trimmed() {
        let tokens = ["-- name ", "  spaced value  "];
        let set = parse_tokens(&tokens).unwrap();
        assert_eq!(pairs(&set), vec![("name", "spaced value")]);
    }

    #[test]
    fn positional_values_are_verbatim() {
        let tokens = vec![" padded ".to_string()];
        let set = parse_tokens(&tokens).unwrap();
        assert_eq!(set.as_map().get("0").map(String::as_str), Some(" padded "));
    }

    #[test]
    fn bare_dashes_are_flags_with_empty_names() {
        let set = parse_arguments("cmd -- value").unwrap();
        assert_eq!(pairs(&set), vec![("0", "cmd"), ("", "value")]);
    }

    #[test]
    fn os_args_are_classified_like_tokens() {
        let set = parse_os_args(["build", "--target", "x86_64", "-q"]).unwrap();
        assert_eq!(
            pairs(&set),
            vec![("0", "build"), ("target", "x86_64"), ("q", "")]
        );
        assert!(parse_os_args(Vec::<OsString>::new()).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn os_args_with_invalid_utf8_do_not_panic() {
        use std::os::unix::ffi::OsStringExt;

        let args = vec![
            OsString::from("cmd"),
            OsString::from_vec(vec![b'-', b'f']),
            OsString::from_vec(vec![b'a', 0xff, b'b']),
        ];
        let set = parse_os_args(args).unwrap();
        assert_eq!(set.value("0"), Some("cmd"));
        assert_eq!(set.value("f"), Some("a\u{fffd}b"));
    }

    #[test]
    fn env_args_never_panic() {
        // The test harness passes its own flags; only the absence of a panic matters here.
        let _ = parse_env_args();
    }

    #[test]
    fn token_slices_and_strings_agree_with_raw_input() {
        let inputs = [
            "",
            "command -p value1 --param2 value2",
            r#"command -p fast -f "text.txt text2.txt" -v"#,
            r#"a "b c"#,
            "x y -z",
            "-a -b -c",
            "stray -k v dropped",
        ];
        for input in inputs {
            let from_str = parse_arguments(input);
            assert_eq!(parse_tokens(&split(input)), from_str, "input: {input:?}");

            let owned: Vec<String> = split(input).into_iter().map(String::from).collect();
            assert_eq!(parse_tokens(&owned), from_str, "input: {input:?}");
        }
    }
}
