//! Command-line string tokenizer and typed argument lookups.
//!
//! `argkit-parse` turns a raw command line such as
//! `command -p fast -f "text.txt text2.txt" -v` into an [`ArgumentSet`]:
//! - leading tokens become positionals keyed `"0"`, `"1"`, ...
//! - `-x value` / `--name value` pairs become named entries (keys compared case-insensitively)
//! - a flag followed by another flag (or nothing) is a switch with an empty value
//!
//! Parsing never fails. Malformed input degrades to a partial result, and only the
//! accessors report errors, and only when asked to.
//!
//! # Example
//!
//! ```
//! let args = argkit_parse::parse_arguments(r#"copy -f "a b.txt" --retries 3 -v"#).unwrap();
//!
//! assert_eq!(args.value("0"), Some("copy"));
//! assert_eq!(args.value("F"), Some("a b.txt"));
//! assert_eq!(args.get_value_as_integer("retries", true).unwrap(), Some(3));
//! assert!(args.is_present("v"));
//! assert!(args.get_value("missing", true).is_err());
//! ```

mod classify;
mod error;
mod set;
mod tokenize;

pub use classify::{parse_arguments, parse_env_args, parse_os_args, parse_tokens};
pub use error::{ArgError, ErrorKind};
pub use rust_decimal::Decimal;
pub use set::{ArgValue, ArgumentSet};
pub use tokenize::{Tokens, split};
