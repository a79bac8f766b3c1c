//! Core, format-agnostic types for langpo.
//! Parsers decode into these; encoders serialize these.
//!
//! A [`Document`] always holds fully decoded text: `[u<n>]` escapes resolved and real
//! newlines in place of `[br]`. Escaping only happens at the LANG boundary.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::{error::Error, traits::Parser};

/// A complete localization resource: an ordered list of categories.
///
/// Category order is kept exactly as inserted, since it decides the layout of the written
/// file. Names are not required to be unique here; the PO adapter validates the keys it
/// builds from them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(from = "DocumentData", into = "DocumentData")]
pub struct Document {
    categories: Vec<Category>,
    /// Category name → position of the first category with that name.
    index: HashMap<String, usize>,
}

#[derive(Deserialize, Serialize)]
struct DocumentData {
    #[serde(default)]
    categories: Vec<Category>,
}

impl From<DocumentData> for Document {
    fn from(value: DocumentData) -> Self {
        let mut document = Document::new();
        for category in value.categories {
            document.push_category(category);
        }
        document
    }
}

impl From<Document> for DocumentData {
    fn from(value: Document) -> Self {
        DocumentData {
            categories: value.categories,
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.categories == other.categories
    }
}

impl Eq for Document {}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// All categories, in insertion order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Appends a new category, even if one with the same name already exists.
    pub fn add_category(&mut self, name: impl Into<String>) -> &mut Category {
        self.push_category(Category::new(name))
    }

    /// Returns the first category called `name`, creating it at the end if missing.
    pub fn category_mut_or_insert(&mut self, name: &str) -> &mut Category {
        if let Some(&position) = self.index.get(name) {
            return &mut self.categories[position];
        }
        self.add_category(name)
    }

    pub fn find_category(&self, name: &str) -> Option<&Category> {
        self.index
            .get(name)
            .and_then(|&position| self.categories.get(position))
    }

    /// Every `(category, entry)` pair, categories first, then entries within a category.
    pub fn entries(&self) -> impl Iterator<Item = (&Category, &Entry)> {
        self.categories
            .iter()
            .flat_map(|category| category.entries.iter().map(move |entry| (category, entry)))
    }

    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    /// Collects every distinct character used by any entry value.
    ///
    /// Used to decide which glyphs a bitmap font has to contain.
    pub fn unique_characters(&self) -> BTreeSet<char> {
        self.entries()
            .flat_map(|(_, entry)| entry.value.chars())
            .collect()
    }

    fn push_category(&mut self, category: Category) -> &mut Category {
        let position = self.categories.len();
        self.index.entry(category.name.clone()).or_insert(position);
        self.categories.push(category);
        &mut self.categories[position]
    }
}

impl Parser for Document {
    /// Parse a JSON dump of a document.
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    /// Write the document as pretty JSON.
    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, self).map_err(Error::Parse)
    }
}

/// A named group of entries (`<CATEGORY Name="...">` in a LANG file).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    name: String,

    /// Ordered list of all entries in this category.
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_entry(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Entry {
        self.entries.push(Entry {
            name: name.into(),
            value: value.into(),
        });
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    pub fn find_entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// A single localized string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Entry {
    /// Identifier of the string within its category.
    pub name: String,

    /// Decoded text of the string.
    pub value: String,
}
