//! Format conversion utilities for langpo.
//!
//! This module provides the file-level conversions between LANG and PO, format inference
//! from file extensions, and the default output path rule (input path with its extension
//! swapped). Every conversion reads its input completely and transforms it in memory; the
//! output file is only created once that succeeded.

use std::path::{Path, PathBuf};

use crate::{
    error::Error,
    formats::{FormatType, LangFormat, PoFormat, lang::SerializationWarning, po},
    traits::Parser,
    types::Document,
};

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// Path of the written file.
    pub output: PathBuf,
    /// Category names with their entry counts, in document order.
    pub categories: Vec<(String, usize)>,
    /// Characters written without XML escaping (LANG output only).
    pub warnings: Vec<SerializationWarning>,
}

impl ConversionReport {
    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(|(_, count)| count).sum()
    }
}

/// Convert a LANG file to PO.
///
/// When `output` is `None` the PO file is written next to the input, e.g.
/// `english.lang` → `english.po`.
///
/// # Example
///
/// ```rust,no_run
/// use langpo::converter::lang_to_po;
/// use std::path::Path;
///
/// let report = lang_to_po(Path::new("english.lang"), None, "en")?;
/// assert!(report.output.ends_with("english.po"));
/// # Ok::<(), langpo::Error>(())
/// ```
pub fn lang_to_po(
    input: &Path,
    output: Option<&Path>,
    language: &str,
) -> Result<ConversionReport, Error> {
    let document = read_document(input, FormatType::Lang)?;
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, FormatType::Po));
    let format = po::export_with_language(&document, language)?;
    format.write_to(&output).map_err(|e| {
        Error::conversion_error(format!("Error writing PO output: {}", e), Some(Box::new(e)))
    })?;
    Ok(report(&document, output, Vec::new()))
}

/// Convert a PO file to LANG.
///
/// When `output` is `None` the LANG file is written next to the input, e.g.
/// `english.po` → `english.lang`.
pub fn po_to_lang(input: &Path, output: Option<&Path>) -> Result<ConversionReport, Error> {
    let document = read_document(input, FormatType::Po)?;
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, FormatType::Lang));
    let warnings = write_document(&document, &output, FormatType::Lang)?;
    Ok(report(&document, output, warnings))
}

/// Convert a localization file from one format to another.
///
/// # Errors
///
/// Returns an `Error` if reading, parsing, converting, or writing fails.
///
/// # Example
///
/// ```rust,no_run
/// use langpo::{converter::convert, formats::FormatType};
/// convert(
///     "english.po",
///     FormatType::Po,
///     "english.lang",
///     FormatType::Lang,
/// )?;
/// # Ok::<(), langpo::Error>(())
/// ```
pub fn convert<P: AsRef<Path>>(
    input: P,
    input_format: FormatType,
    output: P,
    output_format: FormatType,
) -> Result<ConversionReport, Error> {
    let document = read_document(input, input_format)?;
    let output = output.as_ref().to_path_buf();
    let warnings = write_document(&document, &output, output_format)?;
    Ok(report(&document, output, warnings))
}

/// Convert a localization file, inferring both formats from the file extensions.
pub fn convert_auto<P: AsRef<Path>>(input: P, output: P) -> Result<ConversionReport, Error> {
    let input_format = infer_format_from_extension(&input).ok_or_else(|| {
        Error::UnknownFormat(format!(
            "Cannot infer input format from {}",
            input.as_ref().display()
        ))
    })?;
    let output_format = infer_format_from_extension(&output).ok_or_else(|| {
        Error::UnknownFormat(format!(
            "Cannot infer output format from {}",
            output.as_ref().display()
        ))
    })?;
    convert(input, input_format, output, output_format)
}

/// Reads a file of the given format into a decoded [`Document`].
pub fn read_document<P: AsRef<Path>>(path: P, format: FormatType) -> Result<Document, Error> {
    let path = path.as_ref();
    let document = match format {
        FormatType::Lang => Document::try_from(LangFormat::read_from(path)?)?,
        FormatType::Po => po::import(&PoFormat::read_from(path)?)?,
    };
    tracing::debug!(
        path = %path.display(),
        %format,
        categories = document.categories().len(),
        entries = document.entry_count(),
        "read document"
    );
    Ok(document)
}

/// Writes a [`Document`] in the given format, returning the LANG serialization warnings.
///
/// The whole file content is produced before the file is created.
pub fn write_document<P: AsRef<Path>>(
    document: &Document,
    path: P,
    format: FormatType,
) -> Result<Vec<SerializationWarning>, Error> {
    let path = path.as_ref();
    match format {
        FormatType::Lang => {
            let lang = LangFormat::from(document);
            let warnings = lang.serialization_warnings();
            lang.write_to(path).map_err(|e| {
                Error::conversion_error(
                    format!("Error writing LANG output: {}", e),
                    Some(Box::new(e)),
                )
            })?;
            Ok(warnings)
        }
        FormatType::Po => {
            po::export(document)?.write_to(path).map_err(|e| {
                Error::conversion_error(
                    format!("Error writing PO output: {}", e),
                    Some(Box::new(e)),
                )
            })?;
            Ok(Vec::new())
        }
    }
}

/// Infers a [`FormatType`] from a file extension.
///
/// # Example
/// ```rust
/// use langpo::converter::infer_format_from_extension;
/// use langpo::formats::FormatType;
///
/// assert_eq!(infer_format_from_extension("english.lang"), Some(FormatType::Lang));
/// assert_eq!(infer_format_from_extension("english.PO"), Some(FormatType::Po));
/// assert_eq!(infer_format_from_extension("strings.xml"), None);
/// ```
pub fn infer_format_from_extension<P: AsRef<Path>>(path: P) -> Option<FormatType> {
    let extension = path.as_ref().extension()?.to_str()?;
    match extension.to_lowercase().as_str() {
        "lang" => Some(FormatType::Lang),
        "po" => Some(FormatType::Po),
        _ => None,
    }
}

/// The input path with its extension replaced by the target format's extension.
///
/// # Example
/// ```rust
/// use langpo::converter::default_output_path;
/// use langpo::formats::FormatType;
/// use std::path::Path;
///
/// assert_eq!(
///     default_output_path("lang/english.lang", FormatType::Po),
///     Path::new("lang/english.po")
/// );
/// ```
pub fn default_output_path<P: AsRef<Path>>(input: P, target: FormatType) -> PathBuf {
    input.as_ref().with_extension(target.extension())
}

fn report(
    document: &Document,
    output: PathBuf,
    warnings: Vec<SerializationWarning>,
) -> ConversionReport {
    ConversionReport {
        output,
        categories: document
            .categories()
            .iter()
            .map(|c| (c.name().to_string(), c.entries.len()))
            .collect(),
        warnings,
    }
}
