use crate::validation::{ValidationContext, validate_context};

use langpo::{ConversionReport, convert_auto, lang_to_po, po_to_lang};
use std::path::Path;

/// Run the `lang2po` command: LANG file in, PO file out (next to the input by default).
pub fn run_lang2po_command(path: &str, output: Option<&str>, language: &str) -> Result<(), String> {
    validate_context(
        &ValidationContext::new()
            .with_input_file(path)
            .with_output_file(output)
            .with_language_code(language),
    )?;

    println!("Converting LANG file to PO file...");
    let report = lang_to_po(Path::new(path), output.map(Path::new), language)
        .map_err(|e| format!("Error converting {}: {}", path, e))?;
    print_report(&report);
    Ok(())
}

/// Run the `po2lang` command: PO file in, LANG file out (next to the input by default).
pub fn run_po2lang_command(path: &str, output: Option<&str>) -> Result<(), String> {
    validate_context(
        &ValidationContext::new()
            .with_input_file(path)
            .with_output_file(output),
    )?;

    println!("Converting PO file to LANG file...");
    let report = po_to_lang(Path::new(path), output.map(Path::new))
        .map_err(|e| format!("Error converting {}: {}", path, e))?;
    print_report(&report);
    Ok(())
}

/// Run the generic `convert` command, with both formats taken from the extensions.
pub fn run_convert_command(input: &str, output: &str) -> Result<(), String> {
    validate_context(
        &ValidationContext::new()
            .with_input_file(input)
            .with_output_file(Some(output))
            .with_known_format(),
    )?;

    let report = convert_auto(input, output)
        .map_err(|e| format!("Error converting {} to {}: {}", input, output, e))?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &ConversionReport) {
    println!("Categories: {}", report.categories.len());
    for (name, count) in &report.categories {
        println!("  {}: {} entries", name, count);
    }
    if !report.warnings.is_empty() {
        println!(
            "⚠️  {} unescaped XML character(s) written, the file may not load as XML",
            report.warnings.len()
        );
    }
    tracing::info!(
        output = %report.output.display(),
        entries = report.entry_count(),
        "conversion finished"
    );
    println!("✅ Wrote {}", report.output.display());
}
