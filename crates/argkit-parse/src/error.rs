//! Errors raised by [`ArgumentSet`](crate::ArgumentSet) accessors.
//!
//! Tokenizing and classifying never fail. These errors only surface when a caller
//! asks for a strict lookup or calls `validate`.

use thiserror::Error;

/// Broad category of an [`ArgError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The key is not in the set.
    NotFound,
    /// The key is present but its value is blank, unparseable, or rejected.
    InvalidValue,
}

/// Failed lookup or validation of a single argument.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgError {
    // Not found
    /// No positional argument at this index
    #[error("positional argument at position {position} not found")]
    PositionalNotFound { position: String },

    /// No named argument with this name
    #[error("named argument \"{name}\" not found")]
    NamedNotFound { name: String },

    // Invalid value
    /// Value is empty or whitespace only
    #[error("argument \"{key}\" has a blank value")]
    BlankValue { key: String },

    /// Value does not parse as the requested type
    #[error("argument \"{key}\" value \"{value}\" is not a valid {type_name}")]
    Conversion {
        key: String,
        value: String,
        type_name: &'static str,
    },

    /// Value was rejected by a validation predicate
    #[error("argument \"{key}\" is invalid: {message}")]
    Rejected { key: String, message: String },
}

impl ArgError {
    /// Build the not-found error for `key`, positional when `key` is all digits.
    pub(crate) fn not_found(key: &str) -> Self {
        if is_positional_key(key) {
            Self::PositionalNotFound {
                position: key.to_string(),
            }
        } else {
            Self::NamedNotFound {
                name: key.to_string(),
            }
        }
    }

    /// Whether the key was missing or its value unusable.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PositionalNotFound { .. } | Self::NamedNotFound { .. } => ErrorKind::NotFound,
            Self::BlankValue { .. } | Self::Conversion { .. } | Self::Rejected { .. } => {
                ErrorKind::InvalidValue
            }
        }
    }

    /// Shorthand for `kind() == ErrorKind::NotFound`.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// The key (or position) the error is about, as the caller passed it.
    pub fn key(&self) -> &str {
        match self {
            Self::PositionalNotFound { position } => position,
            Self::NamedNotFound { name } => name,
            Self::BlankValue { key } | Self::Conversion { key, .. } | Self::Rejected { key, .. } => {
                key
            }
        }
    }
}

pub(crate) fn is_positional_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_distinguishes_positional_and_named() {
        let positional = ArgError::not_found("2");
        assert_eq!(positional.to_string(), "positional argument at position 2 not found");
        assert!(matches!(positional, ArgError::PositionalNotFound { .. }));

        let named = ArgError::not_found("verbose");
        assert_eq!(named.to_string(), "named argument \"verbose\" not found");
        assert!(matches!(named, ArgError::NamedNotFound { .. }));
    }

    #[test]
    fn mixed_digit_keys_are_named() {
        assert!(matches!(ArgError::not_found("2a"), ArgError::NamedNotFound { .. }));
        assert!(matches!(ArgError::not_found(""), ArgError::NamedNotFound { .. }));
        assert!(matches!(ArgError::not_found("-1"), ArgError::NamedNotFound { .. }));
    }

    #[test]
    fn kinds() {
        assert_eq!(ArgError::not_found("0").kind(), ErrorKind::NotFound);
        assert_eq!(ArgError::not_found("x").kind(), ErrorKind::NotFound);
        let blank = ArgError::BlankValue { key: "p".into() };
        assert_eq!(blank.kind(), ErrorKind::InvalidValue);
        assert!(!blank.is_not_found());
        assert_eq!(blank.key(), "p");
    }

    #[test]
    fn conversion_message_names_key_value_and_type() {
        let err = ArgError::Conversion {
            key: "count".into(),
            value: "ten".into(),
            type_name: "integer",
        };
        let msg = err.to_string();
        assert!(msg.contains("count"));
        assert!(msg.contains("ten"));
        assert!(msg.contains("integer"));
    }
}
