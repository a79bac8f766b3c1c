use langpo::{converter::read_document, infer_format_from_extension, traits::Parser};

/// Run the debug command: read a localization file and output the document as JSON.
pub fn run_debug_command(input: &str, output: Option<&str>) -> Result<(), String> {
    let format = infer_format_from_extension(input)
        .ok_or_else(|| format!("Cannot infer format from file extension: {}", input))?;
    let document =
        read_document(input, format).map_err(|e| format!("Error reading {}: {}", input, e))?;

    match output {
        Some(output_path) => {
            document
                .write_to(output_path)
                .map_err(|e| format!("Error writing to {}: {}", output_path, e))?;
            println!("✅ Debug output written to: {}", output_path);
        }
        None => {
            let json = document
                .to_text()
                .map_err(|e| format!("Error serializing to JSON: {}", e))?;
            println!("{}", json);
        }
    }
    Ok(())
}
