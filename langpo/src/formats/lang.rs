//! Support for the LANG localization format.
//!
//! A LANG file is XML with a single root element holding `CATEGORY` elements, each holding
//! `Entry` elements:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <LANG>
//!   <CATEGORY Name="UI">
//!     <Entry Name="OK_BUTTON">Yes[br]</Entry>
//!   </CATEGORY>
//! </LANG>
//! ```
//!
//! Entry text is ASCII with `[u<n>]`/`[br]` escapes (see [`crate::escape`]). The format
//! struct keeps that escaped text; conversion to a [`Document`] decodes it.
//!
//! Names and values are written without XML escaping, as the game reads them that way.
//! Characters that make the output invalid XML are reported through
//! [`Format::serialization_warnings`] instead.

use std::{
    fmt::Display,
    fs::File,
    io::{BufRead, Read, Write},
    path::Path,
};

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{
    error::Error,
    escape::{decode, encode},
    traits::Parser,
    types::Document,
};

const CATEGORY_TAG: &[u8] = b"CATEGORY";
const ENTRY_TAG: &[u8] = b"Entry";
const NAME_ATTRIBUTE: &[u8] = b"Name";

/// Depth of `CATEGORY` elements (the root is depth 1).
const CATEGORY_DEPTH: usize = 2;
const ENTRY_DEPTH: usize = 3;

/// Parses LANG text into a decoded [`Document`].
pub fn parse(xml: &str) -> Result<Document, Error> {
    Document::try_from(Format::from_str(xml)?)
}

/// Serializes a [`Document`] into LANG text, escaping every value.
pub fn serialize(document: &Document) -> String {
    Format::from(document).render()
}

/// A LANG file, with entry values in their escaped on-disk form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    pub categories: Vec<CategoryElement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryElement {
    pub name: String,
    pub entries: Vec<EntryElement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryElement {
    pub name: String,
    /// Escaped text, as found between `<Entry>` and `</Entry>`.
    pub value: String,
}

/// A character written verbatim that an XML reader will choke on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializationWarning {
    pub category: String,
    /// `None` when the character sits in the category name itself.
    pub entry: Option<String>,
    pub character: char,
}

impl Display for SerializationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.entry {
            Some(entry) => write!(
                f,
                "unescaped `{}` in {}/{}",
                self.character, self.category, entry
            ),
            None => write!(
                f,
                "unescaped `{}` in category name {}",
                self.character, self.category
            ),
        }
    }
}

impl Format {
    /// Lists every character that is written without XML escaping but is special to XML.
    pub fn serialization_warnings(&self) -> Vec<SerializationWarning> {
        let mut warnings = Vec::new();
        for category in &self.categories {
            for character in hazards(&category.name, true) {
                warnings.push(SerializationWarning {
                    category: category.name.clone(),
                    entry: None,
                    character,
                });
            }
            for entry in &category.entries {
                let found = hazards(&entry.name, true).chain(hazards(&entry.value, false));
                for character in found {
                    warnings.push(SerializationWarning {
                        category: category.name.clone(),
                        entry: Some(entry.name.clone()),
                        character,
                    });
                }
            }
        }
        warnings
    }

    fn render(&self) -> String {
        for warning in self.serialization_warnings() {
            tracing::warn!(%warning, "LANG output will not be well-formed XML");
        }

        let mut content = String::new();
        content.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        content.push_str("<LANG>\n");
        for category in &self.categories {
            content.push_str(&format!("  <CATEGORY Name=\"{}\">\n", category.name));
            for entry in &category.entries {
                content.push_str(&format!(
                    "    <Entry Name=\"{}\">{}</Entry>\n",
                    entry.name, entry.value
                ));
            }
            content.push_str("  </CATEGORY>\n");
        }
        content.push_str("</LANG>\n");
        content
    }
}

fn hazards(text: &str, in_attribute: bool) -> impl Iterator<Item = char> + '_ {
    text.chars()
        .filter(move |&c| matches!(c, '<' | '>' | '&') || (in_attribute && c == '"'))
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);

        let mut buf = Vec::new();
        let mut depth = 0usize;
        let mut seen_root = false;
        let mut categories = Vec::new();
        let mut category: Option<CategoryElement> = None;
        let mut entry: Option<PendingEntry> = None;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    depth += 1;
                    open_element(&e, depth, &mut seen_root, &mut category, &mut entry)?;
                }
                Event::Empty(e) => {
                    // `<Entry Name="x"/>` carries no text and is dropped like an empty entry.
                    let empty_entry = depth + 1 == ENTRY_DEPTH && e.name().as_ref() == ENTRY_TAG;
                    if !empty_entry {
                        open_element(&e, depth + 1, &mut seen_root, &mut category, &mut entry)?;
                        if depth + 1 == CATEGORY_DEPTH {
                            if let Some(done) = category.take() {
                                categories.push(done);
                            }
                        }
                    }
                }
                Event::End(_) => {
                    if depth == 0 {
                        return Err(Error::InvalidResource(
                            "closing tag without a matching opening tag".to_string(),
                        ));
                    }
                    if depth == ENTRY_DEPTH {
                        if let (Some(done), Some(parent)) = (entry.take(), category.as_mut()) {
                            if !done.text.is_empty() {
                                parent.entries.push(EntryElement {
                                    name: done.name,
                                    value: done.text,
                                });
                            }
                        }
                    } else if depth == CATEGORY_DEPTH {
                        if let Some(done) = category.take() {
                            categories.push(done);
                        }
                    }
                    depth -= 1;
                }
                Event::Text(e) => {
                    if let Some(pending) = entry.as_mut().filter(|p| p.collecting) {
                        pending.text.push_str(&e.unescape()?);
                    }
                }
                Event::CData(e) => {
                    if let Some(pending) = entry.as_mut().filter(|p| p.collecting) {
                        let text = std::str::from_utf8(&e)
                            .map_err(|err| Error::DataMismatch(err.to_string()))?;
                        pending.text.push_str(text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !seen_root {
            return Err(Error::InvalidResource(
                "LANG document has no root element".to_string(),
            ));
        }
        if depth != 0 {
            return Err(Error::InvalidResource(
                "unexpected end of LANG document: unclosed element".to_string(),
            ));
        }

        tracing::debug!(categories = categories.len(), "parsed LANG document");
        Ok(Format { categories })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        writer.write_all(self.render().as_bytes()).map_err(Error::Io)
    }

    /// Override default file reading to support BOM-aware decoding (UTF-8 or UTF-16 files).
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .strip_bom(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded)
    }
}

/// An `Entry` element whose end tag has not been read yet.
struct PendingEntry {
    name: String,
    text: String,
    /// Cleared at the first child element: only leading text belongs to the entry.
    collecting: bool,
}

fn open_element(
    e: &BytesStart,
    depth: usize,
    seen_root: &mut bool,
    category: &mut Option<CategoryElement>,
    entry: &mut Option<PendingEntry>,
) -> Result<(), Error> {
    match depth {
        1 => {
            if *seen_root {
                return Err(Error::InvalidResource(
                    "LANG document has more than one root element".to_string(),
                ));
            }
            *seen_root = true;
        }
        CATEGORY_DEPTH if e.name().as_ref() == CATEGORY_TAG => {
            *category = Some(CategoryElement {
                name: name_attribute(e)?,
                entries: Vec::new(),
            });
        }
        ENTRY_DEPTH if category.is_some() && e.name().as_ref() == ENTRY_TAG => {
            *entry = Some(PendingEntry {
                name: name_attribute(e)?,
                text: String::new(),
                collecting: true,
            });
        }
        _ => {
            if let Some(pending) = entry.as_mut() {
                pending.collecting = false;
            }
        }
    }
    Ok(())
}

fn name_attribute(e: &BytesStart) -> Result<String, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::DataMismatch(e.to_string()))?;
        if attr.key.as_ref() == NAME_ATTRIBUTE {
            return Ok(attr.unescape_value()?.to_string());
        }
    }
    Err(Error::InvalidResource(format!(
        "{} tag missing 'Name'",
        String::from_utf8_lossy(e.name().as_ref())
    )))
}

impl TryFrom<Format> for Document {
    type Error = Error;

    fn try_from(value: Format) -> Result<Self, Self::Error> {
        let mut document = Document::new();
        for element in value.categories {
            let category = document.add_category(element.name);
            for entry in element.entries {
                category.add_entry(entry.name, decode(&entry.value)?);
            }
        }
        Ok(document)
    }
}

impl From<&Document> for Format {
    fn from(value: &Document) -> Self {
        Format {
            categories: value
                .categories()
                .iter()
                .map(|category| CategoryElement {
                    name: category.name().to_string(),
                    entries: category
                        .entries
                        .iter()
                        .map(|entry| EntryElement {
                            name: entry.name.clone(),
                            value: encode(&entry.value),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
