//! Whitespace tokenizer with double-quoted spans.

/// Lazy tokenizer over a command-line string.
///
/// Tokens are verbatim slices of the input:
/// - runs of whitespace separate tokens and are discarded
/// - `"..."` yields everything between the quotes as one token (no escapes)
/// - an unquoted run ends at the next whitespace; quotes inside it are ordinary characters
///
/// An opening quote without a closing one ends tokenization; the unterminated
/// fragment is dropped and everything yielded before it is kept.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokens<'a> {
    /// Start tokenizing at the beginning of `input`.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn finish(&mut self) {
        self.pos = self.input.len();
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let input = self.input;
        let rest = &input[self.pos..];
        let trimmed = rest.trim_start();
        let start = self.pos + (rest.len() - trimmed.len());

        if trimmed.is_empty() {
            self.finish();
            return None;
        }

        if let Some(quoted) = trimmed.strip_prefix('"') {
            let Some(end) = quoted.find('"') else {
                tracing::debug!(offset = start, "unterminated quote; dropping trailing fragment");
                self.finish();
                return None;
            };
            // Resume after the closing quote.
            self.pos = start + 1 + end + 1;
            return Some(&quoted[..end]);
        }

        let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        self.pos = start + end;
        Some(&trimmed[..end])
    }
}

impl std::iter::FusedIterator for Tokens<'_> {}

/// Split a command-line string into tokens.
///
/// Empty or all-whitespace input yields no tokens.
pub fn split(input: &str) -> Vec<&str> {
    Tokens::new(input).collect()
}
