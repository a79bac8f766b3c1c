use langpo::{Document, converter::read_document, infer_format_from_extension};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display columns a value may take before it is cut.
const MAX_VALUE_WIDTH: usize = 50;

/// Print the categories and entries of a LANG or PO file.
pub fn run_view_command(path: &str, full: bool) -> Result<(), String> {
    let format = infer_format_from_extension(path)
        .ok_or_else(|| format!("Cannot infer format from file extension: {}", path))?;
    let document =
        read_document(path, format).map_err(|e| format!("Error reading {}: {}", path, e))?;
    print_view(&document, full);
    Ok(())
}

/// Print a view of a document.
pub fn print_view(document: &Document, full: bool) {
    println!("Categories: {}", document.categories().len());
    println!("Entries: {}", document.entry_count());

    for (i, category) in document.categories().iter().enumerate() {
        println!("\n=== Category {}: {} ===", i + 1, category.name());
        for (j, entry) in category.entries.iter().enumerate() {
            println!("\n  Entry {}: {}", j + 1, entry.name);
            let value = if full {
                entry.value.clone()
            } else {
                truncate(&entry.value.replace('\n', "⏎"), MAX_VALUE_WIDTH)
            };
            println!("    Value: {}", value);
        }
    }
}

/// Cuts `value` to at most `max_width` display columns, appending `...` when cut.
fn truncate(value: &str, max_width: usize) -> String {
    if value.width() <= max_width {
        return value.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in value.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_value() {
        assert_eq!(truncate("Hello", 10), "Hello");
    }

    #[test]
    fn test_truncate_counts_columns() {
        // CJK characters take two columns each.
        assert_eq!(truncate("日本語のテキスト", 6), "日本語...");
        assert_eq!(truncate("abcdefgh", 3), "abc...");
    }
}
