//! All supported localization file formats for langpo.
//!
//! This module re-exports the main types for each format and provides
//! the [`FormatType`] enum for generic format handling across the crate.

pub mod lang;
pub mod po;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

// Reexporting the formats for easier access
pub use lang::Format as LangFormat;
pub use po::Format as PoFormat;

use crate::Error;

/// Represents all supported localization file formats for generic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// LANG XML resource file with `[u<n>]`/`[br]` escapes.
    Lang,
    /// gettext Portable Object file.
    Po,
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// # Example
/// ```rust
/// use langpo::formats::FormatType;
/// assert_eq!(FormatType::Lang.to_string(), "lang");
/// assert_eq!(FormatType::Po.to_string(), "po");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Lang => write!(f, "lang"),
            FormatType::Po => write!(f, "po"),
        }
    }
}

/// Implements [`std::str::FromStr`] for [`FormatType`].
///
/// Accepts `"lang"` and `"po"` (also `"gettext"`), case-insensitive.
/// Returns [`crate::error::Error::UnknownFormat`] for unknown strings.
///
/// # Example
/// ```rust
/// use langpo::formats::FormatType;
/// use std::str::FromStr;
/// assert_eq!(FormatType::from_str("LANG").unwrap(), FormatType::Lang);
/// assert_eq!(FormatType::from_str("po").unwrap(), FormatType::Po);
/// assert!(FormatType::from_str("xliff").is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "lang" => Ok(FormatType::Lang),
            "po" | "gettext" => Ok(FormatType::Po),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl FormatType {
    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Lang => "lang",
            FormatType::Po => "po",
        }
    }
}
