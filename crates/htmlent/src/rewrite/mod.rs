//! The entity rewrite scan over canonical text.
//!
//! One left-to-right pass finds each `&`, pairs it with the next `;`, and
//! replaces the span when its body is a numeric reference or a known name.
//! Output is built into a new buffer, so replacement text is never scanned
//! again: `&amp;amp;` becomes `&amp;`.
//!
//! When an `&` has no `;` after it the scan ends and the remaining text is
//! copied unchanged. No later `&` could find a `;` either, so ending early
//! never changes the result.

mod numeric;

use alloc::{string::String, vec::Vec};

use log::trace;

use crate::{DecodeError, EntityLookup, UnresolvedResume};

const AMPERSAND: u32 = '&' as u32;
const SEMICOLON: u32 = ';' as u32;
const NUMBER_SIGN: u32 = '#' as u32;

/// Rewrites every resolvable reference in `text`.
pub(crate) fn rewrite<L>(
    text: &[u32],
    table: &L,
    unresolved: UnresolvedResume,
) -> Result<Vec<u32>, DecodeError>
where
    L: EntityLookup + ?Sized,
{
    let mut out = Vec::with_capacity(text.len());
    // `text[copied..]` has not been written to `out` yet.
    let mut copied = 0;
    let mut pos = 0;

    while let Some(amp) = find(text, pos, AMPERSAND) {
        let Some(semi) = find(text, amp + 1, SEMICOLON) else {
            trace!(
                target: "htmlent::rewrite",
                "unterminated reference at {amp}, ending scan"
            );
            break;
        };

        let body = &text[amp + 1..semi];
        match body.first() {
            None => {
                pos = amp + 1;
            }
            Some(&NUMBER_SIGN) => {
                let cp = numeric::parse_reference(body).map_err(|kind| {
                    DecodeError::NumericReference {
                        reference: display(&text[amp..=semi]),
                        offset: amp,
                        kind,
                    }
                })?;
                out.extend_from_slice(&text[copied..amp]);
                out.push(cp);
                copied = semi + 1;
                pos = semi + 1;
            }
            Some(_) => {
                if let Some(replacement) = table.lookup(body) {
                    out.extend_from_slice(&text[copied..amp]);
                    out.extend(replacement.chars().map(u32::from));
                    copied = semi + 1;
                    pos = semi + 1;
                } else {
                    trace!(
                        target: "htmlent::rewrite",
                        "unknown entity {:?} at {amp}",
                        display(body)
                    );
                    pos = match unresolved {
                        UnresolvedResume::AfterReference => semi + 1,
                        UnresolvedResume::AfterAmpersand => amp + 1,
                    };
                }
            }
        }
    }

    out.extend_from_slice(&text[copied..]);
    Ok(out)
}

fn find(text: &[u32], from: usize, needle: u32) -> Option<usize> {
    text.get(from..)?
        .iter()
        .position(|&cp| cp == needle)
        .map(|idx| from + idx)
}

fn display(text: &[u32]) -> String {
    text.iter()
        .map(|&cp| char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

#[cfg(test)]
mod tests {
    use alloc::{borrow::ToOwned, collections::BTreeMap, string::ToString};

    use rstest::rstest;

    use super::*;
    use crate::{Html5Entities, NumericErrorKind};

    fn run(input: &str, unresolved: UnresolvedResume) -> Result<String, DecodeError> {
        let text: Vec<u32> = input.chars().map(u32::from).collect();
        rewrite(&text, &Html5Entities, unresolved).map(|out| display(&out))
    }

    fn decode(input: &str) -> String {
        run(input, UnresolvedResume::AfterReference).unwrap()
    }

    #[rstest]
    #[case("a &amp; b", "a & b")]
    #[case("&lt;&gt;", "<>")]
    #[case("&#65;", "A")]
    #[case("&#x41;", "A")]
    #[case("&#X41;", "A")]
    #[case("&notarealentity;", "&notarealentity;")]
    #[case("&amp; &lt", "& &lt")]
    #[case("&lt &amp;", "&lt &amp;")]
    #[case("&amp;amp;", "&amp;")]
    #[case("&#38;amp;", "&amp;")]
    #[case("&;", "&;")]
    #[case("&;&amp;", "&;&")]
    #[case("&&amp;", "&&amp;")]
    #[case("plain text", "plain text")]
    #[case("", "")]
    #[case("&", "&")]
    #[case("tail &", "tail &")]
    #[case("&AMP;&Amp;", "&&Amp;")]
    fn rewrites(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(decode(input), expected);
    }

    #[test]
    fn named_expansion_may_be_two_codepoints() {
        let text: Vec<u32> = "[&nvlt;]".chars().map(u32::from).collect();
        let out = rewrite(&text, &Html5Entities, UnresolvedResume::default()).unwrap();
        assert_eq!(out, [0x5B, 0x3C, 0x20D2, 0x5D]);
    }

    #[test]
    fn numeric_expansion_is_one_value_even_out_of_range() {
        let text: Vec<u32> = "&#xD800;&#1114112;".chars().map(u32::from).collect();
        let out = rewrite(&text, &Html5Entities, UnresolvedResume::default()).unwrap();
        assert_eq!(out, [0xD800, 0x11_0000]);
    }

    // A zero reference expands to U+0000; it is not deleted from the text.
    #[test]
    fn nul_reference_decodes_to_nul() {
        assert_eq!(decode("a&#0;b"), "a\0b");
        assert_eq!(decode("a&#x;b"), "a\0b");
    }

    #[test]
    fn resume_after_ampersand_rescans_unknown_spans() {
        let rescan = |input| run(input, UnresolvedResume::AfterAmpersand).unwrap();
        assert_eq!(rescan("&lt &amp;"), "&lt &");
        assert_eq!(rescan("&foo&amp;"), "&foo&");
        assert_eq!(rescan("&notarealentity;"), "&notarealentity;");
        assert_eq!(rescan("&amp;amp;"), "&amp;");
    }

    #[test]
    fn numeric_failure_reports_reference() {
        let err = run("ok &amp; &#zz; &lt;", UnresolvedResume::default()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::NumericReference {
                reference: "&#zz;".to_string(),
                offset: 9,
                kind: NumericErrorKind::InvalidDigit,
            }
        );
    }

    #[test]
    fn numeric_failures_by_kind() {
        let kind = |input| match run(input, UnresolvedResume::default()) {
            Err(DecodeError::NumericReference { kind, .. }) => Some(kind),
            Ok(_) => None,
        };
        assert_eq!(kind("&#;"), Some(NumericErrorKind::Empty));
        assert_eq!(kind("&#q;"), Some(NumericErrorKind::InvalidDigit));
        assert_eq!(kind("&#99999999999999999999;"), Some(NumericErrorKind::Overflow));
        assert_eq!(kind("&#65;"), None);
    }

    #[test]
    fn custom_table() {
        let mut table = BTreeMap::new();
        table.insert("brand".to_owned(), "Acme".to_owned());
        let text: Vec<u32> = "&brand; &amp;".chars().map(u32::from).collect();
        let out = rewrite(&text, &table, UnresolvedResume::default()).unwrap();
        assert_eq!(display(&out), "Acme &amp;");
    }

    #[test]
    fn invalid_codepoints_pass_through_unchanged() {
        let text = [0xD800, 0x26, 0x61, 0x6D, 0x70, 0x3B, 0x11_0000];
        let out = rewrite(&text, &Html5Entities, UnresolvedResume::default()).unwrap();
        assert_eq!(out, [0xD800, 0x26, 0x11_0000]);
    }
}
