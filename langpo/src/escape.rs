//! Escape codec for LANG text.
//!
//! LANG files store ASCII only. Every character above codepoint 127 is written as
//! `[u<decimal codepoint>]` and every newline as `[br]`. [`decode`] turns such text into
//! plain Unicode, [`encode`] does the reverse.
//!
//! ```rust
//! use langpo::escape::{decode, encode};
//!
//! assert_eq!(encode("café\n"), "caf[u233][br]");
//! assert_eq!(decode("caf[u233][br]").unwrap(), "café\n");
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

/// Marker used by LANG files for a line break.
pub const LINE_BREAK: &str = "[br]";

lazy_static! {
    // `[0-9]` rather than `\d`: the latter also matches non-ASCII digits.
    static ref ESCAPE_TOKEN: Regex = Regex::new(r"\[(?:u[0-9]+|br)\]").unwrap();
}

/// Resolves `[u<digits>]` and `[br]` tokens in a single left-to-right pass.
///
/// Substituted characters are never scanned again, so `[u91]br]` decodes to the literal
/// text `[br]` and not to a newline. Text that only resembles a token (`[u]`, `[U65]`,
/// `[u12`) is kept as is.
///
/// Fails with [`Error::CodepointRange`] when the digits do not name a Unicode scalar value
/// (above `0x10FFFF` or a surrogate).
pub fn decode(escaped: &str) -> Result<String, Error> {
    let mut out = String::with_capacity(escaped.len());
    let mut last = 0;

    for token in ESCAPE_TOKEN.find_iter(escaped) {
        out.push_str(&escaped[last..token.start()]);
        last = token.end();

        let text = token.as_str();
        if text == LINE_BREAK {
            out.push('\n');
            continue;
        }

        // `[u` + digits + `]`
        let digits = &text[2..text.len() - 1];
        out.push(parse_codepoint(digits)?);
    }

    out.push_str(&escaped[last..]);
    Ok(out)
}

/// Escapes plain text for storage in a LANG file.
///
/// Newlines become `[br]`, characters above codepoint 127 become `[u<codepoint>]`.
/// ASCII passes through untouched, including brackets and digits.
pub fn encode(plain: &str) -> String {
    let mut out = String::with_capacity(plain.len());
    for c in plain.chars() {
        match c {
            '\n' => out.push_str(LINE_BREAK),
            c if c.is_ascii() => out.push(c),
            c => out.push_str(&format!("[u{}]", c as u32)),
        }
    }
    out
}

fn parse_codepoint(digits: &str) -> Result<char, Error> {
    digits
        .parse::<u32>()
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| Error::CodepointRange {
            value: digits.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_unicode_and_newline() {
        assert_eq!(encode("café\n"), "caf[u233][br]");
    }

    #[test]
    fn test_decode_unicode_and_newline() {
        assert_eq!(decode("caf[u233][br]").unwrap(), "café\n");
    }

    #[test]
    fn test_encode_leaves_ascii_alone() {
        let text = "Press [A] to jump, 100% [u] done";
        assert_eq!(encode(text), text);
    }

    #[test]
    fn test_encode_non_bmp() {
        assert_eq!(encode("🎮"), "[u127918]");
        assert_eq!(decode("[u127918]").unwrap(), "🎮");
    }

    #[test]
    fn test_encode_cjk() {
        assert_eq!(encode("你好"), "[u20320][u22909]");
    }

    #[test]
    fn test_decode_ascii_codepoints_and_leading_zeros() {
        assert_eq!(decode("[u65][u0066]").unwrap(), "AB");
    }

    #[test]
    fn test_decode_does_not_rescan_substitutions() {
        // 91 is '[', the result must stay literal text.
        assert_eq!(decode("[u91]br]").unwrap(), "[br]");
        assert_eq!(decode("[u91]u65]").unwrap(), "[u65]");
    }

    #[test]
    fn test_decode_keeps_lookalike_text() {
        assert_eq!(decode("[u]").unwrap(), "[u]");
        assert_eq!(decode("[U65]").unwrap(), "[U65]");
        assert_eq!(decode("[u12").unwrap(), "[u12");
        assert_eq!(decode("[BR]").unwrap(), "[BR]");
        assert_eq!(decode("[u٣]").unwrap(), "[u٣]");
    }

    #[test]
    fn test_decode_multiple_line_breaks() {
        assert_eq!(decode("a[br][br]b").unwrap(), "a\n\nb");
    }

    #[test]
    fn test_decode_upper_bound() {
        assert_eq!(decode("[u1114111]").unwrap(), "\u{10FFFF}");
        let err = decode("[u1114112]").unwrap_err();
        assert!(matches!(err, Error::CodepointRange { ref value } if value == "1114112"));
    }

    #[test]
    fn test_decode_rejects_surrogate() {
        assert!(matches!(
            decode("x[u55296]y"),
            Err(Error::CodepointRange { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_overflowing_digits() {
        assert!(matches!(
            decode("[u99999999999999999999]"),
            Err(Error::CodepointRange { .. })
        ));
    }

    #[test]
    fn test_round_trip_mixed_text() {
        let text = "Ünïcødé [A]\nsecond line\t→ 終わり";
        assert_eq!(decode(&encode(text)).unwrap(), text);
    }
}
