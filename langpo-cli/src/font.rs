//! Bitmap font generation for a configured language.
//!
//! `languages.yaml` lists, per language, the character sets and LANG files whose
//! characters a font must cover and the bmfont configurations to build. The union of
//! those characters is handed to `bmfont` through a UTF-16LE character file.

use langpo::{converter::read_document, formats::FormatType};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;

const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];

#[derive(Debug, Clone, Deserialize)]
pub struct FontConfig {
    pub languages: Vec<LanguageConfig>,
    #[serde(default)]
    pub charsets: Vec<CharsetConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageConfig {
    pub name: String,
    #[serde(default)]
    pub charsets: Vec<String>,
    /// LANG files, relative to the game root.
    #[serde(default)]
    pub lang_files: Vec<PathBuf>,
    /// bmfont configuration names, without the `.bmfc` extension.
    #[serde(default)]
    pub fonts: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CharsetConfig {
    pub name: String,
    pub characters: Vec<CharSpec>,
}

/// A single codepoint or an inclusive `[start, end]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CharSpec {
    Single(u32),
    Range([u32; 2]),
}

/// Locations of the game, the font configurations and the bmfont executable.
#[derive(Debug, Clone)]
pub struct ToolPaths {
    pub game_root: PathBuf,
    pub fonts_dir: PathBuf,
    pub bmfont: PathBuf,
}

impl ToolPaths {
    pub fn lang_file(&self, relative: &Path) -> PathBuf {
        self.game_root.join(relative)
    }

    pub fn font_config(&self, font: &str) -> PathBuf {
        self.fonts_dir.join(format!("{}.bmfc", font))
    }

    pub fn font_output(&self, font: &str) -> PathBuf {
        self.game_root.join("fonts").join(format!("{}.fnt", font))
    }
}

impl FontConfig {
    pub fn from_yaml(text: &str) -> Result<Self, String> {
        serde_yaml::from_str(text).map_err(|e| format!("Invalid font configuration: {}", e))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        Self::from_yaml(&text)
    }

    pub fn language(&self, name: &str) -> Result<&LanguageConfig, String> {
        self.languages
            .iter()
            .find(|l| l.name == name)
            .ok_or_else(|| format!("Language {} not found in font configuration", name))
    }

    pub fn charset(&self, name: &str) -> Result<&CharsetConfig, String> {
        self.charsets
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| format!("Charset {} not found in charsets", name))
    }
}

impl CharSpec {
    fn extend_into(self, out: &mut BTreeSet<char>) -> Result<(), String> {
        let (start, end) = match self {
            CharSpec::Single(cp) => (cp, cp),
            CharSpec::Range([start, end]) => (start, end),
        };
        if start > end {
            return Err(format!("Reversed character range [{:#X}, {:#X}]", start, end));
        }
        for cp in start..=end {
            let c = char::from_u32(cp).ok_or_else(|| format!("Invalid codepoint {:#X}", cp))?;
            out.insert(c);
        }
        Ok(())
    }
}

/// Collect the characters a language's fonts must cover: its charsets plus every
/// character used by its LANG files.
pub fn collect_characters(
    config: &FontConfig,
    language: &LanguageConfig,
    paths: &ToolPaths,
) -> Result<BTreeSet<char>, String> {
    let mut characters = BTreeSet::new();

    for charset_name in &language.charsets {
        for spec in &config.charset(charset_name)?.characters {
            spec.extend_into(&mut characters)?;
        }
    }

    for relative in &language.lang_files {
        let path = paths.lang_file(relative);
        if !path.is_file() {
            return Err(format!("Language file {} not found", path.display()));
        }
        let document = read_document(&path, FormatType::Lang)
            .map_err(|e| format!("Error reading {}: {}", path.display(), e))?;
        tracing::debug!(
            path = %path.display(),
            entries = document.entry_count(),
            "collected LANG characters"
        );
        characters.extend(document.unique_characters());
    }

    Ok(characters)
}

/// Write the characters, in order, to a temporary UTF-16LE file with a byte order mark.
pub fn write_character_file(characters: &BTreeSet<char>) -> Result<NamedTempFile, String> {
    let mut file = tempfile::Builder::new()
        .prefix("langpo-chars-")
        .suffix(".txt")
        .tempfile()
        .map_err(|e| format!("Cannot create character file: {}", e))?;

    let text: String = characters.iter().collect();
    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&UTF16LE_BOM);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }

    file.write_all(&bytes)
        .and_then(|_| file.flush())
        .map_err(|e| format!("Cannot write character file: {}", e))?;
    Ok(file)
}

/// The bmfont invocation that builds `font` from the given character file.
pub fn bmfont_command(paths: &ToolPaths, font: &str, character_file: &Path) -> Command {
    let mut command = Command::new(&paths.bmfont);
    command
        .arg("-c")
        .arg(paths.font_config(font))
        .arg("-o")
        .arg(paths.font_output(font))
        .arg("-t")
        .arg(character_file);
    command
}

fn describe(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run the `makefont` command for one configured language.
pub fn run_makefont_command(
    language: &str,
    config_path: &Path,
    paths: &ToolPaths,
    dry_run: bool,
) -> Result<(), String> {
    let config = FontConfig::load(config_path)?;
    let language = config.language(language)?;
    let characters = collect_characters(&config, language, paths)?;
    println!("Characters: {}", characters.len());

    let character_file = write_character_file(&characters)?;

    for font in &language.fonts {
        let font_config = paths.font_config(font);
        if !font_config.is_file() {
            return Err(format!("Font file {} not found", font_config.display()));
        }

        let mut command = bmfont_command(paths, font, character_file.path());
        let line = describe(&command);
        if dry_run {
            tracing::info!(font = %font, "dry run, bmfont not started");
            println!("{}", line);
            continue;
        }

        if let Some(parent) = paths.font_output(font).parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Cannot create {}: {}", parent.display(), e))?;
        }

        tracing::info!(command = %line, "running bmfont");
        println!("{}", line);
        let status = command
            .status()
            .map_err(|e| format!("Cannot run {}: {}", paths.bmfont.display(), e))?;
        if !status.success() {
            return Err(format!("bmfont failed for font {}: {}", font, status));
        }
        println!("✅ Wrote {}", paths.font_output(font).display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn read_character_file(path: &Path) -> String {
        let bytes = std::fs::read(path).unwrap();
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).unwrap()
    }

    const CONFIG: &str = indoc! {r#"
        languages:
          - name: japanese
            charsets: [ascii, kana]
            lang_files: [config/lang/japanese.lang]
            fonts: [font_default]
        charsets:
          - name: ascii
            characters: [10, [32, 126]]
          - name: kana
            characters: [[12353, 12355]]
    "#};

    fn paths(root: &Path) -> ToolPaths {
        ToolPaths {
            game_root: root.to_path_buf(),
            fonts_dir: root.join("fonts-src"),
            bmfont: PathBuf::from("bin/bmfont64.exe"),
        }
    }

    #[test]
    fn test_parse_config() {
        let config = FontConfig::from_yaml(CONFIG).unwrap();
        let language = config.language("japanese").unwrap();
        assert_eq!(language.fonts, vec!["font_default".to_string()]);
        assert_eq!(
            config.charset("ascii").unwrap().characters,
            vec![CharSpec::Single(10), CharSpec::Range([32, 126])]
        );
        assert!(config.language("klingon").is_err());
    }

    #[test]
    fn test_collect_characters() {
        let dir = tempfile::tempdir().unwrap();
        let lang_dir = dir.path().join("config/lang");
        std::fs::create_dir_all(&lang_dir).unwrap();
        std::fs::write(
            lang_dir.join("japanese.lang"),
            r#"<LANG><CATEGORY Name="UI"><Entry Name="OK">[u26085]</Entry></CATEGORY></LANG>"#,
        )
        .unwrap();

        let config = FontConfig::from_yaml(CONFIG).unwrap();
        let language = config.language("japanese").unwrap();
        let characters = collect_characters(&config, language, &paths(dir.path())).unwrap();

        assert!(characters.contains(&'\n'));
        assert!(characters.contains(&'~'));
        assert!(characters.contains(&'ぃ'));
        assert!(characters.contains(&'日'));
        assert_eq!(characters.len(), 1 + 95 + 3 + 1);
    }

    #[test]
    fn test_missing_lang_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = FontConfig::from_yaml(CONFIG).unwrap();
        let language = config.language("japanese").unwrap();
        let err = collect_characters(&config, language, &paths(dir.path())).unwrap_err();
        assert!(err.contains("not found"));
    }

    #[test]
    fn test_unknown_charset() {
        let config = FontConfig::from_yaml(indoc! {"
            languages:
              - name: german
                charsets: [latin1]
            charsets: []
        "})
        .unwrap();
        let language = config.language("german").unwrap();
        let err = collect_characters(&config, language, &paths(Path::new("."))).unwrap_err();
        assert!(err.contains("Charset latin1 not found"));
    }

    #[test]
    fn test_invalid_ranges() {
        let mut out = BTreeSet::new();
        assert!(CharSpec::Range([100, 50]).extend_into(&mut out).is_err());
        assert!(CharSpec::Single(0xD800).extend_into(&mut out).is_err());
        assert!(CharSpec::Single(0x110000).extend_into(&mut out).is_err());
    }

    #[test]
    fn test_character_file_is_utf16le_with_bom() {
        let characters: BTreeSet<char> = ['b', 'a', '日', '😀'].into_iter().collect();
        let file = write_character_file(&characters).unwrap();
        let bytes = std::fs::read(file.path()).unwrap();
        assert_eq!(&bytes[..2], &UTF16LE_BOM);
        assert_eq!(&bytes[2..6], &[b'a', 0, b'b', 0]);

        let text = read_character_file(file.path());
        assert_eq!(text, "\u{FEFF}ab日😀");
    }

    #[test]
    fn test_bmfont_command_line() {
        let paths = ToolPaths {
            game_root: PathBuf::from("game"),
            fonts_dir: PathBuf::from("fonts"),
            bmfont: PathBuf::from("bmfont"),
        };
        let command = bmfont_command(&paths, "font_default", Path::new("chars.txt"));
        let expected = format!(
            "bmfont -c {} -o {} -t chars.txt",
            Path::new("fonts").join("font_default.bmfc").display(),
            Path::new("game").join("fonts").join("font_default.fnt").display()
        );
        assert_eq!(describe(&command), expected);
    }
}
