use langpo::escape::{decode, encode};
use langpo::formats::{FormatType, PoFormat, lang, po};
use langpo::traits::Parser;
use langpo::types::Document;
use langpo::{lang_to_po, po_to_lang};
use proptest::prelude::*;
use regex::Regex;
use std::collections::BTreeMap;

fn has_escape_token(s: &str) -> bool {
    s.contains("[br]") || Regex::new(r"\[u[0-9]+\]").unwrap().is_match(s)
}

fn name_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z_][A-Za-z0-9_ .-]{0,12}").expect("valid name regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z0-9 .,!?'\"\\[\\]\\n\u{e9}\u{df}\u{fc}\u{4e16}\u{1f3ae}]{1,24}")
        .expect("valid value regex")
        .prop_filter("no literal escape tokens", |s| !has_escape_token(s))
}

type Dataset = BTreeMap<String, BTreeMap<String, String>>;

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    prop::collection::btree_map(
        name_strategy(),
        prop::collection::btree_map(name_strategy(), value_strategy(), 0..6),
        0..5,
    )
}

fn build_document(values: &Dataset) -> Document {
    let mut document = Document::new();
    for (category_name, entries) in values {
        let category = document.add_category(category_name.as_str());
        for (name, value) in entries {
            category.add_entry(name.as_str(), value.as_str());
        }
    }
    document
}

proptest! {
    #[test]
    fn escape_decode_inverts_encode(s in any::<String>().prop_filter("no literal escape tokens", |s| !has_escape_token(s))) {
        prop_assert_eq!(decode(&encode(&s)).unwrap(), s);
    }

    #[test]
    fn escape_encode_output_is_ascii(s in any::<String>()) {
        let encoded = encode(&s);
        prop_assert!(encoded.is_ascii());
        prop_assert!(!encoded.contains('\n'));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn lang_roundtrip_preserves_document(values in dataset_strategy()) {
        let document = build_document(&values);
        let reparsed = lang::parse(&lang::serialize(&document))
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(reparsed, document);
    }

    #[test]
    fn po_text_roundtrip_preserves_document(values in dataset_strategy()) {
        let document = build_document(&values);
        let text = po::export(&document)
            .and_then(|format| format.to_text())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let imported = PoFormat::from_str(&text)
            .and_then(|format| po::import(&format))
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        // Categories without entries have no PO message to come back from.
        let mut expected = Document::new();
        for category in document.categories().iter().filter(|c| !c.entries.is_empty()) {
            let target = expected.add_category(category.name());
            for entry in &category.entries {
                target.add_entry(entry.name.as_str(), entry.value.as_str());
            }
        }
        prop_assert_eq!(imported, expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn lang_po_lang_files_roundtrip(values in dataset_strategy()) {
        let values: Dataset = values.into_iter().filter(|(_, entries)| !entries.is_empty()).collect();
        let tmp = tempfile::tempdir().map_err(|e| TestCaseError::fail(e.to_string()))?;
        let input = tmp.path().join("seed.lang");
        let middle = tmp.path().join("translated.po");
        let output = tmp.path().join("roundtrip.lang");

        let document = build_document(&values);
        std::fs::write(&input, lang::serialize(&document))
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        lang_to_po(&input, Some(&middle), "en").map_err(|e| TestCaseError::fail(e.to_string()))?;
        po_to_lang(&middle, Some(&output)).map_err(|e| TestCaseError::fail(e.to_string()))?;

        let actual = langpo::converter::read_document(&output, FormatType::Lang)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(actual, document);

        let seed_text = std::fs::read_to_string(&input).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let output_text = std::fs::read_to_string(&output).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(output_text, seed_text);
    }
}
