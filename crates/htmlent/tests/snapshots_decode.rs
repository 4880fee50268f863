#![expect(missing_docs)]

use core::fmt::Write;

use htmlent::{
    DecoderOptions, EntityDecoder, Locale, UnresolvedResume, Utf16, decode_html_entities,
    decode_str,
};

fn render(inputs: &[&str], decode: impl Fn(&str) -> Result<String, htmlent::DecodeError>) -> String {
    let mut out = String::new();
    for input in inputs {
        match decode(input) {
            Ok(text) => writeln!(out, "{input:?} => {text:?}"),
            Err(err) => writeln!(out, "{input:?} => error: {err}"),
        }
        .unwrap();
    }
    out
}

fn hex<T: Into<u32> + Copy>(units: &[T]) -> String {
    units
        .iter()
        .map(|&unit| {
            let unit: u32 = unit.into();
            format!("{unit:04X}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn snapshot_default_decoding() {
    let inputs = [
        "a &amp; b",
        "&lt;p&gt;",
        "&#65;&#x42;&#X43;",
        "&notarealentity;",
        "&amp; &lt",
        "&lt &amp;",
        "&amp;amp;",
        "&;",
        "&eacute;t&eacute;",
        "&#x1F600;",
        "&#0;",
        "&#xD800;",
        "&#zz;",
        "x &#;",
        "&#99999999999999999999;",
    ];

    insta::assert_snapshot!(render(&inputs, decode_str), @r#"
    "a &amp; b" => "a & b"
    "&lt;p&gt;" => "<p>"
    "&#65;&#x42;&#X43;" => "ABC"
    "&notarealentity;" => "&notarealentity;"
    "&amp; &lt" => "& &lt"
    "&lt &amp;" => "&lt &amp;"
    "&amp;amp;" => "&amp;"
    "&;" => "&;"
    "&eacute;t&eacute;" => "été"
    "&#x1F600;" => "😀"
    "&#0;" => "\0"
    "&#xD800;" => ""
    "&#zz;" => error: invalid numeric character reference `&#zz;` at offset 0: invalid digit
    "x &#;" => error: invalid numeric character reference `&#;` at offset 2: no digits
    "&#99999999999999999999;" => error: invalid numeric character reference `&#99999999999999999999;` at offset 0: number too large
    "#);
}

#[test]
fn snapshot_resume_after_ampersand() {
    let decoder = EntityDecoder::new(DecoderOptions {
        unresolved: UnresolvedResume::AfterAmpersand,
        ..Default::default()
    });
    let inputs = ["&lt &amp;", "&foo&amp;", "&&amp;", "&notarealentity;"];

    insta::assert_snapshot!(render(&inputs, |input| decoder.decode_str(input)), @r#"
    "&lt &amp;" => "&lt &"
    "&foo&amp;" => "&foo&"
    "&&amp;" => "&&"
    "&notarealentity;" => "&notarealentity;"
    "#);
}

#[test]
fn snapshot_code_units() {
    let utf16: Vec<u16> = "&#x1F600;&copy;".encode_utf16().collect();
    let decoded = decode_html_entities::<Utf16>(&utf16).unwrap();
    insta::assert_snapshot!(hex(&decoded), @"D83D DE00 00A9");

    let decoder = EntityDecoder::new(DecoderOptions {
        locale: Locale::from_name("ja_JP.Shift_JIS").unwrap(),
        ..Default::default()
    });
    let (input, _, _) = encoding_rs::SHIFT_JIS.encode("&lt;日本&gt;");
    let decoded = decoder.decode_narrow(&input).unwrap();
    insta::assert_snapshot!(hex(&decoded), @"003C 0093 00FA 0096 007B 003E");
}
