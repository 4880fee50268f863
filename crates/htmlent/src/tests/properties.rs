use alloc::{string::String, vec::Vec};

use quickcheck::QuickCheck;

use crate::{
    DecodeError, DecoderOptions, EntityDecoder, Locale, Narrow, Utf8, Utf16, Utf32, Wide,
    WideChar, convert, decode_html_entities, decode_str,
};

const FRAGMENTS: &[&str] = &[
    "&", ";", "#", "x", "X", "amp", "lt", "gt", "nvlt", "AElig", "eacute", "65", "1F600",
    "D800", "zz", "é", "😀", "日本", " ", "\0", "&amp;", "&#", "&#x",
];

fn assemble(picks: &[u8]) -> String {
    picks
        .iter()
        .map(|&pick| FRAGMENTS[usize::from(pick) % FRAGMENTS.len()])
        .collect()
}

fn test_count() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Property: text without `&` comes back unchanged in every representation.
#[test]
fn text_without_ampersand_is_unchanged() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String) -> bool {
        let text: String = text.chars().filter(|&ch| ch != '&').collect();
        let canonical: Vec<u32> = text.chars().map(u32::from).collect();
        let utf16: Vec<u16> = text.encode_utf16().collect();
        let wide: Vec<WideChar> = convert(&Utf32, &Wide::default(), &canonical);
        let narrow = EntityDecoder::new(DecoderOptions::default())
            .decode(&Narrow::new(Locale::UTF_8), text.as_bytes());

        decode_str(&text).as_deref() == Ok(text.as_str())
            && decode_html_entities::<Utf8>(text.as_bytes()).as_deref() == Ok(text.as_bytes())
            && decode_html_entities::<Utf16>(&utf16) == Ok(utf16)
            && decode_html_entities::<Utf32>(&canonical) == Ok(canonical)
            && decode_html_entities::<Wide>(&wide) == Ok(wide)
            && narrow.as_deref() == Ok(text.as_bytes())
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(String) -> bool);
}

/// Property: UTF-8 and UTF-16 input decode to the same text, or fail with
/// the same error.
#[test]
fn representations_agree() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(picks: Vec<u8>) -> bool {
        let text = assemble(&picks);
        let utf16: Vec<u16> = text.encode_utf16().collect();

        let from_str = decode_str(&text);
        let from_utf16: Result<String, DecodeError> = decode_html_entities::<Utf16>(&utf16)
            .map(|units| String::from_utf16(&units).unwrap_or_default());
        from_str == from_utf16
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Vec<u8>) -> bool);
}

/// Property: every reference is longer than its expansion, so decoding never
/// grows canonical text.
#[test]
fn decoding_never_grows_canonical_text() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(picks: Vec<u8>) -> bool {
        let text: Vec<u32> = assemble(&picks).chars().map(u32::from).collect();
        decode_html_entities::<Utf32>(&text).map_or(true, |out| out.len() <= text.len())
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Vec<u8>) -> bool);
}
