use langpo::{formats::FormatType, infer_format_from_extension};
use std::path::Path;
use unic_langid::LanguageIdentifier;

/// Validation context for the conversion commands
pub struct ValidationContext {
    pub input_file: Option<String>,
    pub output_file: Option<String>,
    pub language_code: Option<String>,
    /// Whether input and output must carry a `.lang`/`.po` extension.
    pub require_known_format: bool,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationContext {
    pub fn new() -> Self {
        Self {
            input_file: None,
            output_file: None,
            language_code: None,
            require_known_format: false,
        }
    }

    pub fn with_input_file(mut self, file: &str) -> Self {
        self.input_file = Some(file.to_string());
        self
    }

    pub fn with_output_file(mut self, file: Option<&str>) -> Self {
        self.output_file = file.map(str::to_string);
        self
    }

    pub fn with_language_code(mut self, lang: &str) -> Self {
        self.language_code = Some(lang.to_string());
        self
    }

    pub fn with_known_format(mut self) -> Self {
        self.require_known_format = true;
        self
    }
}

/// Validate file path exists and is readable
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate output directory exists or can be created
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if let Some(parent) = path_obj.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return Err(format!("Cannot create output directory: {}", e));
            }
        }
    }

    Ok(())
}

/// Validate language code format using unic-langid (same as lib crate)
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    if lang.trim().is_empty() {
        return Err("Language code cannot be empty".to_string());
    }

    lang.parse::<LanguageIdentifier>().map(|_| ()).map_err(|_| {
        format!(
            "Invalid language code format: {}. Expected valid BCP 47 language identifier",
            lang
        )
    })
}

/// Validate that a file's extension names a supported format
pub fn validate_format_extension(path: &str) -> Result<FormatType, String> {
    infer_format_from_extension(path).ok_or_else(|| {
        format!(
            "Cannot infer format from file extension (expected .{} or .{}): {}",
            FormatType::Lang.extension(),
            FormatType::Po.extension(),
            path
        )
    })
}

/// Validate a complete validation context
pub fn validate_context(context: &ValidationContext) -> Result<(), String> {
    if let Some(ref input) = context.input_file {
        validate_file_path(input).map_err(|e| format!("Input validation failed: {}", e))?;

        if context.require_known_format {
            validate_format_extension(input)
                .map_err(|e| format!("Input validation failed: {}", e))?;
        }
    }

    if let Some(ref output) = context.output_file {
        if context.require_known_format {
            validate_format_extension(output)
                .map_err(|e| format!("Output validation failed: {}", e))?;
        }
        validate_output_path(output).map_err(|e| format!("Output validation failed: {}", e))?;
    }

    if let Some(ref lang) = context.language_code {
        validate_language_code(lang)
            .map_err(|e| format!("Language code validation failed: {}", e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_language_code() {
        assert!(validate_language_code("en").is_ok());
        assert!(validate_language_code("pt-BR").is_ok());
        assert!(validate_language_code("").is_err());
        assert!(validate_language_code("not a code").is_err());
    }

    #[test]
    fn test_validate_format_extension() {
        assert_eq!(validate_format_extension("english.lang"), Ok(FormatType::Lang));
        assert_eq!(validate_format_extension("english.PO"), Ok(FormatType::Po));
        assert!(validate_format_extension("english.txt").is_err());
        assert!(validate_format_extension("english").is_err());
    }

    #[test]
    fn test_any_extension_accepted_unless_required() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("english.xml");
        std::fs::write(&input, "<LANG/>").unwrap();
        let input = input.to_str().unwrap();

        assert!(validate_context(&ValidationContext::new().with_input_file(input)).is_ok());
        let err = validate_context(
            &ValidationContext::new()
                .with_input_file(input)
                .with_known_format(),
        )
        .unwrap_err();
        assert!(err.contains("Cannot infer format"));
    }

    #[test]
    fn test_validate_missing_file() {
        let context = ValidationContext::new().with_input_file("definitely/missing.lang");
        let err = validate_context(&context).unwrap_err();
        assert!(err.contains("File does not exist"));
    }

    #[test]
    fn test_validate_output_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested/out.po");
        assert!(validate_output_path(output.to_str().unwrap()).is_ok());
        assert!(dir.path().join("nested").is_dir());
    }
}
