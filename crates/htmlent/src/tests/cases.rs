use alloc::{string::String, vec::Vec};

use rstest::rstest;

use crate::{
    DecoderOptions, EntityDecoder, Locale, Narrow, Representation, Utf8, Utf16, Utf32, Wide,
    codec, decode_html_entities,
};

/// Encodes `input` as `repr`, decodes references, and reads the result back.
fn through<R: Representation>(repr: &R, input: &str) -> String {
    let text: Vec<u32> = input.chars().map(u32::from).collect();
    let units = repr.encode(&text);
    let out = EntityDecoder::new(DecoderOptions::default())
        .decode(repr, &units)
        .unwrap();
    codec::to_string(&repr.decode(&out))
}

#[rstest]
#[case("a &amp; b", "a & b")]
#[case("&lt;&gt;", "<>")]
#[case("&#65;", "A")]
#[case("&#x41;", "A")]
#[case("&notarealentity;", "&notarealentity;")]
#[case("&amp; &lt", "& &lt")]
#[case("&lt &amp;", "&lt &amp;")]
#[case("&amp;amp;", "&amp;")]
#[case("日本&amp;語", "日本&語")]
#[case("😀&lt;😀", "😀<😀")]
#[case("&#x1F600;&#128512;", "😀😀")]
#[case("&AElig;&aelig;", "\u{C6}\u{E6}")]
#[case("&NotEqualTilde;", "\u{2242}\u{338}")]
#[case("a\0&gt;\0b", "a\0>\0b")]
#[case("", "")]
fn same_result_in_every_representation(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(through(&Utf8, input), expected, "utf-8");
    assert_eq!(through(&Utf16, input), expected, "utf-16");
    assert_eq!(through(&Utf32, input), expected, "utf-32");
    assert_eq!(through(&Wide::default(), input), expected, "wide");
    assert_eq!(through(&Narrow::new(Locale::UTF_8), input), expected, "narrow");
    assert_eq!(
        through(&Narrow::new(Locale::new(encoding_rs::GB18030)), input),
        expected,
        "narrow gb18030"
    );
}

#[test]
fn surrogate_references_only_survive_utf32() {
    let input: Vec<u32> = "&#xD83D;&#xDE00;".chars().map(u32::from).collect();
    assert_eq!(
        decode_html_entities::<Utf32>(&input).unwrap(),
        [0xD83D, 0xDE00]
    );

    let input: Vec<u16> = "&#xD83D;&#xDE00;".encode_utf16().collect();
    assert!(decode_html_entities::<Utf16>(&input).unwrap().is_empty());
}
