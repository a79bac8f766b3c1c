//! All error types for the langpo crate.
//!
//! These are returned from all fallible operations (parsing, escaping, key mapping,
//! serialization and conversion).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A `[u<digits>]` escape that does not name a Unicode scalar value.
    #[error("codepoint out of range: [u{value}]")]
    CodepointRange { value: String },

    /// A PO `msgid` that cannot be split into `category/entry`.
    #[error("msgid `{msgid}` is not of the form `category/entry`")]
    KeyFormat { msgid: String },

    #[error("invalid name `{name}`: {reason}")]
    InvalidName { name: String, reason: String },

    /// Two entries map onto the same PO `msgid`.
    #[error("duplicate key `{key}`")]
    KeyCollision { key: String },

    #[error("invalid language `{0}`")]
    InvalidLanguage(String),

    #[error("conversion error: {message}")]
    Conversion {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Creates a new conversion error with optional source error
    pub fn conversion_error(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Conversion {
            message: message.into(),
            source,
        }
    }

    /// Creates a new invalid name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
