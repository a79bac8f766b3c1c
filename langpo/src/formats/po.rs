//! Support for gettext `.po` files, read and written through `polib`.
//!
//! Only `msgid`/`msgstr` pairs and the metadata header are kept. Comments, flags and
//! contexts are dropped when reading; plural forms are rejected.
//!
//! LANG categories are flattened into composite `category/entry` msgids (see
//! [`crate::key`]); `msgstr` holds the plain Unicode text.

use std::{
    collections::HashSet,
    io::{BufRead, BufReader, BufWriter, Write},
    str::FromStr,
};

use polib::{
    catalog::Catalog,
    message::{Message as CatalogMessage, MessageView},
    metadata::CatalogMetadata,
    po_file,
};
use unic_langid::LanguageIdentifier;

use crate::{error::Error, key::CompositeKey, traits::Parser, types::Document};

/// Language written into the header when none is given.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Maps a [`Document`] to PO messages, one per entry, with the default header.
///
/// Fails when a name contains `/` or two entries produce the same msgid.
pub fn export(document: &Document) -> Result<Format, Error> {
    export_with_language(document, DEFAULT_LANGUAGE)
}

/// Same as [`export`], with the `Language` header set to `language`.
pub fn export_with_language(document: &Document, language: &str) -> Result<Format, Error> {
    let language = language
        .parse::<LanguageIdentifier>()
        .map_err(|_| Error::InvalidLanguage(language.to_string()))?;

    let mut seen = HashSet::new();
    let mut messages = Vec::with_capacity(document.entry_count());
    for (category, entry) in document.entries() {
        let msgid = CompositeKey::new(category.name(), entry.name.as_str())?.to_string();
        if !seen.insert(msgid.clone()) {
            return Err(Error::KeyCollision { key: msgid });
        }
        messages.push(Message {
            msgid,
            msgstr: entry.value.clone(),
        });
    }

    tracing::debug!(messages = messages.len(), %language, "exported PO messages");
    Ok(Format {
        header: Header::for_language(&language.to_string()),
        messages,
    })
}

/// Rebuilds a [`Document`] from PO messages.
///
/// Categories appear in the order their first message appears. Values stay decoded;
/// LANG escaping is applied when the document is serialized.
pub fn import(format: &Format) -> Result<Document, Error> {
    let mut document = Document::new();
    let mut seen = HashSet::new();
    for message in &format.messages {
        let key = CompositeKey::from_str(&message.msgid)?;
        if !seen.insert(key.clone()) {
            return Err(Error::KeyCollision {
                key: message.msgid.clone(),
            });
        }
        document
            .category_mut_or_insert(key.category())
            .add_entry(key.entry(), message.msgstr.as_str());
    }
    Ok(document)
}

/// The header fields this tool reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub language: String,
    pub mime_version: String,
    pub content_type: String,
    pub content_transfer_encoding: String,
}

impl Header {
    fn for_language(language: &str) -> Self {
        Header {
            language: language.to_string(),
            mime_version: "1.0".to_string(),
            content_type: "text/plain".to_string(),
            content_transfer_encoding: "8bit; charset=UTF-8".to_string(),
        }
    }
}

impl From<&CatalogMetadata> for Header {
    fn from(value: &CatalogMetadata) -> Self {
        Header {
            language: value.language.clone(),
            mime_version: value.mime_version.clone(),
            content_type: value.content_type.clone(),
            content_transfer_encoding: value.content_transfer_encoding.clone(),
        }
    }
}

/// A parsed `.po` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    pub header: Header,
    pub messages: Vec<Message>,
}

impl Format {
    /// The `Language` header, if set.
    pub fn language(&self) -> Option<&str> {
        Some(self.header.language.as_str()).filter(|l| !l.is_empty())
    }

    fn to_catalog(&self) -> Catalog {
        let mut metadata = CatalogMetadata::new();
        metadata.language = self.header.language.clone();
        metadata.mime_version = self.header.mime_version.clone();
        metadata.content_type = self.header.content_type.clone();
        metadata.content_transfer_encoding = self.header.content_transfer_encoding.clone();

        let mut catalog = Catalog::new(metadata);
        for message in &self.messages {
            catalog.append_or_update(
                CatalogMessage::build_singular()
                    .with_msgid(message.msgid.clone())
                    .with_msgstr(message.msgstr.clone())
                    .done(),
            );
        }
        catalog
    }
}

impl TryFrom<&Catalog> for Format {
    type Error = Error;

    fn try_from(catalog: &Catalog) -> Result<Self, Self::Error> {
        let mut messages = Vec::new();
        for message in catalog.messages() {
            if message.is_plural() {
                return Err(Error::UnsupportedFormat(format!(
                    "msgid `{}`: PO plural forms are not supported",
                    message.msgid()
                )));
            }
            messages.push(Message {
                msgid: message.msgid().to_string(),
                msgstr: message.msgstr().unwrap_or_default().to_string(),
            });
        }
        Ok(Format {
            header: Header::from(&catalog.metadata),
            messages,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub msgid: String,
    pub msgstr: String,
}

impl TryFrom<&Document> for Format {
    type Error = Error;

    fn try_from(value: &Document) -> Result<Self, Self::Error> {
        export(value)
    }
}

impl TryFrom<&Format> for Document {
    type Error = Error;

    fn try_from(value: &Format) -> Result<Self, Self::Error> {
        import(value)
    }
}

impl Parser for Format {
    /// Parse PO text, skipping a leading byte order mark and decoding UTF-16 files.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .strip_bom(true)
            .build(reader);
        let mut decoded = BufReader::new(decoder);

        let catalog = po_file::parse_from_reader(&mut decoded)
            .map_err(|e| Error::DataMismatch(format!("invalid PO file: {}", e)))?;
        let format = Format::try_from(&catalog)?;
        tracing::debug!(messages = format.messages.len(), "parsed PO catalog");
        Ok(format)
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let catalog = self.to_catalog();
        let mut buffered = BufWriter::new(&mut writer);
        po_file::write(&catalog, &mut buffered)?;
        buffered.flush().map_err(Error::Io)
    }
}
