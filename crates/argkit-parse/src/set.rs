//! The classified argument map and its typed accessors.

use std::borrow::Cow;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{ArgError, is_positional_key};

/// Types an argument value can be converted to.
pub trait ArgValue: Sized {
    /// Name used in conversion error messages.
    const TYPE_NAME: &'static str;

    /// Parse a non-blank raw value. `None` means the value is not of this type.
    fn parse_arg(raw: &str) -> Option<Self>;
}

macro_rules! from_str_arg_value {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl ArgValue for $ty {
                const TYPE_NAME: &'static str = $name;

                fn parse_arg(raw: &str) -> Option<Self> {
                    raw.trim().parse().ok()
                }
            }
        )*
    };
}

from_str_arg_value! {
    i32 => "integer",
    i64 => "integer",
    u32 => "unsigned integer",
    u64 => "unsigned integer",
    f32 => "float",
    f64 => "float",
}

impl ArgValue for Decimal {
    const TYPE_NAME: &'static str = "decimal";

    fn parse_arg(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        raw.parse()
            .ok()
            .or_else(|| Decimal::from_scientific(raw).ok())
    }
}

impl ArgValue for String {
    const TYPE_NAME: &'static str = "string";

    fn parse_arg(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

/// Positional and named arguments classified from one command line.
///
/// Positionals are keyed by their index (`"0"`, `"1"`, ...). Named arguments are keyed
/// by the flag name without leading dashes. Keys are compared case-insensitively.
///
/// A set is built once by [`parse_arguments`](crate::parse_arguments) or
/// [`parse_tokens`](crate::parse_tokens) and is never empty. Nothing mutates it afterwards.
///
/// Every typed getter has two modes selected by `throw_if_unable`:
/// - `false`: any failure (missing key, blank value, bad conversion) is `Ok(None)`
/// - `true`: failures are returned as [`ArgError`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArgumentSet {
    values: IndexMap<String, String>,
}

impl ArgumentSet {
    pub(crate) fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    /// Insert during classification. Returns the value this one replaced, if any.
    pub(crate) fn insert(&mut self, key: &str, value: String) -> Option<String> {
        self.values.insert(normalize_key(key).into_owned(), value)
    }

    /// Look up a non-blank value.
    pub fn lookup(&self, key: &str) -> Result<&str, ArgError> {
        let value = self
            .values
            .get(&*normalize_key(key))
            .ok_or_else(|| ArgError::not_found(key))?;
        if value.trim().is_empty() {
            return Err(ArgError::BlankValue {
                key: key.to_string(),
            });
        }
        Ok(value)
    }

    /// Look up a non-blank value and convert it to `T`.
    pub fn parse_value<T: ArgValue>(&self, key: &str) -> Result<T, ArgError> {
        let raw = self.lookup(key)?;
        T::parse_arg(raw).ok_or_else(|| ArgError::Conversion {
            key: key.to_string(),
            value: raw.to_string(),
            type_name: T::TYPE_NAME,
        })
    }

    /// String value of `key`; errors only when `throw_if_unable` is set.
    pub fn get_value(
        &self,
        key: &str,
        throw_if_unable: bool,
    ) -> Result<Option<&str>, ArgError> {
        unless_strict(self.lookup(key), throw_if_unable)
    }

    /// Value of `key` parsed as `i64`; errors only when `throw_if_unable` is set.
    pub fn get_value_as_integer(
        &self,
        key: &str,
        throw_if_unable: bool,
    ) -> Result<Option<i64>, ArgError> {
        unless_strict(self.parse_value(key), throw_if_unable)
    }

    /// Value of `key` parsed as `f64`; errors only when `throw_if_unable` is set.
    pub fn get_value_as_float(
        &self,
        key: &str,
        throw_if_unable: bool,
    ) -> Result<Option<f64>, ArgError> {
        unless_strict(self.parse_value(key), throw_if_unable)
    }

    /// Value of `key` parsed as [`Decimal`]; errors only when `throw_if_unable` is set.
    pub fn get_value_as_decimal(
        &self,
        key: &str,
        throw_if_unable: bool,
    ) -> Result<Option<Decimal>, ArgError> {
        unless_strict(self.parse_value(key), throw_if_unable)
    }

    /// Fail-soft string lookup.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.lookup(key).ok()
    }

    /// Fail-soft typed lookup.
    pub fn value_as<T: ArgValue>(&self, key: &str) -> Option<T> {
        self.parse_value(key).ok()
    }

    /// Check that `key` exists and has a non-blank value.
    pub fn validate(&self, key: &str) -> Result<(), ArgError> {
        self.lookup(key).map(|_| ())
    }

    /// Check that `key` exists, is non-blank, and satisfies `predicate`.
    ///
    /// A predicate returning `false` yields [`ArgError::Rejected`] carrying `message`.
    pub fn validate_with<P>(
        &self,
        key: &str,
        predicate: P,
        message: impl Into<String>,
    ) -> Result<(), ArgError>
    where
        P: FnOnce(&str) -> bool,
    {
        let value = self.lookup(key)?;
        if predicate(value) {
            Ok(())
        } else {
            Err(ArgError::Rejected {
                key: key.to_string(),
                message: message.into(),
            })
        }
    }

    /// Whether `key` was seen, including switch-style flags with an empty value.
    pub fn is_present(&self, key: &str) -> bool {
        self.values.contains_key(&*normalize_key(key))
    }

    /// Read-only view of the underlying map. Named keys are stored lower-cased.
    pub fn as_map(&self) -> &IndexMap<String, String> {
        &self.values
    }

    /// Entries in classification order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.values.iter()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false` for sets returned by the parsers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Positional values in order, stopping at the first missing index.
    pub fn positionals(&self) -> impl Iterator<Item = &str> + '_ {
        (0usize..)
            .map_while(|index| self.values.get(index.to_string().as_str()))
            .map(String::as_str)
    }

    /// Entries whose key is not a positional index.
    pub fn named(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.values
            .iter()
            .filter(|(key, _)| !is_positional_key(key))
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<'a> IntoIterator for &'a ArgumentSet {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Lower-case `key` char by char, without the word-final sigma rule of `str::to_lowercase`.
fn normalize_key(key: &str) -> Cow<'_, str> {
    if key.chars().all(|c| c.to_lowercase().eq([c])) {
        Cow::Borrowed(key)
    } else {
        Cow::Owned(key.chars().flat_map(char::to_lowercase).collect())
    }
}

fn unless_strict<T>(
    result: Result<T, ArgError>,
    throw_if_unable: bool,
) -> Result<Option<T>, ArgError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if throw_if_unable => Err(err),
        Err(err) => {
            tracing::trace!(%err, "argument unavailable; returning no value");
            Ok(None)
        }
    }
}
