//! Composite keys used as PO `msgid`s.
//!
//! PO entries are flat, LANG entries live inside categories. The two levels are joined as
//! `category/entry`, so neither name may contain the separator itself.

use std::{fmt::Display, str::FromStr};

use crate::error::Error;

pub const SEPARATOR: char = '/';

/// A `(category, entry)` pair that can be written as a single `msgid`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeKey {
    category: String,
    entry: String,
}

impl CompositeKey {
    /// Builds a key, rejecting names that contain the separator.
    pub fn new(category: impl Into<String>, entry: impl Into<String>) -> Result<Self, Error> {
        let category = category.into();
        let entry = entry.into();
        validate_name(&category, "category")?;
        validate_name(&entry, "entry")?;
        Ok(Self { category, entry })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }
}

impl Display for CompositeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.category, SEPARATOR, self.entry)
    }
}

/// Splits a `msgid` at its first `/`.
///
/// # Example
/// ```rust
/// use langpo::key::CompositeKey;
/// use std::str::FromStr;
///
/// let key = CompositeKey::from_str("UI/OK_BUTTON").unwrap();
/// assert_eq!(key.category(), "UI");
/// assert_eq!(key.entry(), "OK_BUTTON");
/// assert!(CompositeKey::from_str("OK_BUTTON").is_err());
/// ```
impl FromStr for CompositeKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (category, entry) = s.split_once(SEPARATOR).ok_or_else(|| Error::KeyFormat {
            msgid: s.to_string(),
        })?;
        // The category cannot contain `/` after `split_once`; only the entry can.
        Self::new(category, entry)
    }
}

fn validate_name(name: &str, kind: &str) -> Result<(), Error> {
    if name.contains(SEPARATOR) {
        return Err(Error::invalid_name(
            name,
            format!("{} names must not contain `{}`", kind, SEPARATOR),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let key = CompositeKey::new("UI", "OK_BUTTON").unwrap();
        assert_eq!(key.to_string(), "UI/OK_BUTTON");
    }

    #[test]
    fn test_parse_round_trip() {
        let key = CompositeKey::from_str("Menu/Start Game").unwrap();
        assert_eq!(key.category(), "Menu");
        assert_eq!(key.entry(), "Start Game");
        assert_eq!(key.to_string(), "Menu/Start Game");
    }

    #[test]
    fn test_missing_separator() {
        let err = CompositeKey::from_str("NoSeparator").unwrap_err();
        assert!(matches!(err, Error::KeyFormat { ref msgid } if msgid == "NoSeparator"));
    }

    #[test]
    fn test_second_separator_is_invalid_name() {
        let err = CompositeKey::from_str("A/b/c").unwrap_err();
        assert!(matches!(err, Error::InvalidName { ref name, .. } if name == "b/c"));
    }

    #[test]
    fn test_new_rejects_separator_in_category() {
        assert!(matches!(
            CompositeKey::new("A/B", "c"),
            Err(Error::InvalidName { .. })
        ));
    }

    #[test]
    fn test_empty_parts_are_allowed() {
        let key = CompositeKey::from_str("/").unwrap();
        assert_eq!(key.category(), "");
        assert_eq!(key.entry(), "");
    }
}
