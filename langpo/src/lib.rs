#![forbid(unsafe_code)]
//! LANG ↔ gettext PO conversion toolkit.
//!
//! LANG files are the XML localization resources of the game: categories of named
//! entries whose text is ASCII with `[u<codepoint>]` and `[br]` escapes. This crate
//! parses them into a [`Document`], exports documents to PO files for translators, and
//! imports translated PO files back into LANG.
//!
//! # Quick Start
//!
//! ```rust
//! use langpo::{escape, formats::{lang, po}};
//!
//! let xml = r#"<LANG><CATEGORY Name="UI"><Entry Name="OK">Oui[br]</Entry></CATEGORY></LANG>"#;
//! let document = lang::parse(xml)?;
//!
//! let catalog = po::export(&document)?;
//! assert_eq!(catalog.messages[0].msgid, "UI/OK");
//! assert_eq!(catalog.messages[0].msgstr, "Oui\n");
//!
//! let back = po::import(&catalog)?;
//! assert!(lang::serialize(&back).contains("<Entry Name=\"OK\">Oui[br]</Entry>"));
//! assert_eq!(escape::encode("é"), "[u233]");
//! # Ok::<(), langpo::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`escape`]: the `[u<n>]`/`[br]` codec
//! - [`types`]: the [`Document`] model
//! - [`key`]: `category/entry` msgids
//! - [`formats`]: LANG and PO readers/writers
//! - [`converter`]: file-level conversions

pub mod converter;
pub mod error;
pub mod escape;
pub mod formats;
pub mod key;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    converter::{
        ConversionReport, convert, convert_auto, infer_format_from_extension, lang_to_po,
        po_to_lang,
    },
    error::Error,
    formats::FormatType,
    key::CompositeKey,
    types::{Category, Document, Entry},
};
