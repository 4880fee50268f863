use alloc::{string::String, vec::Vec};

use crate::{
    DecodeError, DecoderOptions, EntityLookup, Html5Entities, Narrow, Representation, Utf8,
    codec, rewrite,
};

/// Decodes character references with a given table and options.
///
/// The decoder holds no per-call state; one value can serve any number of
/// calls, from any number of threads when the table allows it.
///
/// ```rust
/// use htmlent::{DecoderOptions, EntityDecoder, Locale, Utf16};
///
/// let decoder = EntityDecoder::new(DecoderOptions {
///     locale: Locale::new(encoding_rs::WINDOWS_1252),
///     ..Default::default()
/// });
///
/// assert_eq!(decoder.decode_narrow(b"caf&eacute;").unwrap(), b"caf\xE9");
///
/// let units: Vec<u16> = "&hearts;".encode_utf16().collect();
/// assert_eq!(decoder.decode(&Utf16, &units).unwrap(), [0x2665]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntityDecoder<L = Html5Entities> {
    table: L,
    options: DecoderOptions,
}

impl EntityDecoder {
    /// A decoder using the built-in HTML table.
    #[must_use]
    pub fn new(options: DecoderOptions) -> Self {
        Self::with_table(Html5Entities, options)
    }
}

impl<L: EntityLookup> EntityDecoder<L> {
    /// A decoder resolving names through `table`.
    pub fn with_table(table: L, options: DecoderOptions) -> Self {
        Self { table, options }
    }

    /// The options this decoder was built with.
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// The lookup table.
    pub fn table(&self) -> &L {
        &self.table
    }

    /// The narrow representation for the configured locale.
    pub fn narrow(&self) -> Narrow {
        Narrow::new(self.options.locale)
    }

    /// Rewrites canonical text (one `u32` per codepoint).
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::NumericReference`] when a `&#...;` body is not
    /// a number.
    pub fn decode_canonical(&self, text: &[u32]) -> Result<Vec<u32>, DecodeError> {
        rewrite::rewrite(text, &self.table, self.options.unresolved)
    }

    /// Decodes `input` in representation `repr` and returns text in the same
    /// representation.
    ///
    /// Malformed multibyte input is decoded up to the first bad sequence and
    /// the rest is dropped; unpaired UTF-16 surrogates are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::NumericReference`] when a `&#...;` body is not
    /// a number.
    pub fn decode<R>(&self, repr: &R, input: &[R::Unit]) -> Result<Vec<R::Unit>, DecodeError>
    where
        R: Representation + ?Sized,
    {
        let text = repr.decode(input);
        let rewritten = self.decode_canonical(&text)?;
        Ok(repr.encode(&rewritten))
    }

    /// Like [`decode`](Self::decode) over the first `len` units of `input`.
    ///
    /// A `len` past the end of `input` covers the whole slice.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::NumericReference`] when a `&#...;` body is not
    /// a number.
    pub fn decode_n<R>(
        &self,
        repr: &R,
        input: &[R::Unit],
        len: usize,
    ) -> Result<Vec<R::Unit>, DecodeError>
    where
        R: Representation + ?Sized,
    {
        self.decode(repr, &input[..len.min(input.len())])
    }

    /// Decodes a Rust string.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::NumericReference`] when a `&#...;` body is not
    /// a number.
    pub fn decode_str(&self, input: &str) -> Result<String, DecodeError> {
        let text = Utf8.decode(input.as_bytes());
        let rewritten = self.decode_canonical(&text)?;
        Ok(codec::to_string(&rewritten))
    }

    /// Decodes bytes in the charset of the configured locale.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::NumericReference`] when a `&#...;` body is not
    /// a number.
    pub fn decode_narrow(&self, input: &[u8]) -> Result<Vec<u8>, DecodeError> {
        self.decode(&self.narrow(), input)
    }
}

/// Decodes `input` with the built-in table and default options.
///
/// ```rust
/// use htmlent::{Utf32, decode_html_entities};
///
/// let text: Vec<u32> = "&#x1F600;".chars().map(u32::from).collect();
/// assert_eq!(decode_html_entities::<Utf32>(&text).unwrap(), [0x1F600]);
/// ```
///
/// # Errors
///
/// Returns [`DecodeError::NumericReference`] when a `&#...;` body is not a
/// number.
pub fn decode_html_entities<R>(input: &[R::Unit]) -> Result<Vec<R::Unit>, DecodeError>
where
    R: Representation + Default,
{
    EntityDecoder::new(DecoderOptions::default()).decode(&R::default(), input)
}

/// Like [`decode_html_entities`] over the first `len` units of `input`.
///
/// # Errors
///
/// Returns [`DecodeError::NumericReference`] when a `&#...;` body is not a
/// number.
pub fn decode_html_entities_n<R>(input: &[R::Unit], len: usize) -> Result<Vec<R::Unit>, DecodeError>
where
    R: Representation + Default,
{
    EntityDecoder::new(DecoderOptions::default()).decode_n(&R::default(), input, len)
}

/// Decodes a Rust string with the built-in table and default options.
///
/// # Errors
///
/// Returns [`DecodeError::NumericReference`] when a `&#...;` body is not a
/// number.
pub fn decode_str(input: &str) -> Result<String, DecodeError> {
    EntityDecoder::new(DecoderOptions::default()).decode_str(input)
}

#[cfg(test)]
mod tests {
    use alloc::{borrow::ToOwned, collections::BTreeMap, vec};

    use super::*;
    use crate::{Locale, NumericErrorKind, UnresolvedResume, Utf16, Utf32, Wide, WideChar};

    fn utf8_narrow() -> EntityDecoder {
        EntityDecoder::new(DecoderOptions {
            locale: Locale::UTF_8,
            ..Default::default()
        })
    }

    #[test]
    fn decodes_every_representation() {
        let input = "&lt;p&gt;caf&eacute; &amp; cr&egrave;me&lt;/p&gt;";
        let expected = "<p>café & crème</p>";

        assert_eq!(decode_str(input).unwrap(), expected);

        let utf8 = decode_html_entities::<Utf8>(input.as_bytes()).unwrap();
        assert_eq!(utf8, expected.as_bytes());

        let utf16: Vec<u16> = input.encode_utf16().collect();
        let decoded = decode_html_entities::<Utf16>(&utf16).unwrap();
        assert_eq!(decoded, expected.encode_utf16().collect::<Vec<_>>());

        let utf32: Vec<u32> = input.chars().map(u32::from).collect();
        let decoded = decode_html_entities::<Utf32>(&utf32).unwrap();
        assert_eq!(decoded, expected.chars().map(u32::from).collect::<Vec<_>>());

        let wide: Vec<WideChar> = Wide::default().encode(&utf32);
        let decoded = decode_html_entities::<Wide>(&wide).unwrap();
        assert_eq!(
            Wide::default().decode(&decoded),
            expected.chars().map(u32::from).collect::<Vec<_>>()
        );

        let narrow = utf8_narrow().decode_narrow(input.as_bytes()).unwrap();
        assert_eq!(narrow, expected.as_bytes());
    }

    #[test]
    fn explicit_length_limits_input() {
        let input = b"&amp;&lt;";
        assert_eq!(decode_html_entities_n::<Utf8>(input, 5).unwrap(), b"&");
        assert_eq!(decode_html_entities_n::<Utf8>(input, 3).unwrap(), b"&am");
        assert_eq!(decode_html_entities_n::<Utf8>(input, 100).unwrap(), b"&<");
        assert_eq!(decode_html_entities_n::<Utf8>(input, 0).unwrap(), b"");
    }

    #[test]
    fn embedded_nul_does_not_truncate() {
        let input: Vec<u16> = "a\0&amp;\0b".encode_utf16().collect();
        let out = decode_html_entities::<Utf16>(&input).unwrap();
        assert_eq!(out, vec![0x61, 0, 0x26, 0, 0x62]);
    }

    #[test]
    fn narrow_locale_from_options() {
        let decoder = EntityDecoder::new(DecoderOptions {
            locale: Locale::new(encoding_rs::SHIFT_JIS),
            ..Default::default()
        });
        let (input, _, _) = encoding_rs::SHIFT_JIS.encode("&lt;日本&gt;");
        let (expected, _, _) = encoding_rs::SHIFT_JIS.encode("<日本>");
        assert_eq!(decoder.decode_narrow(&input).unwrap(), &*expected);
    }

    #[test]
    fn narrow_drops_references_the_charset_cannot_hold() {
        let decoder = EntityDecoder::new(DecoderOptions {
            locale: Locale::new(encoding_rs::WINDOWS_1252),
            ..Default::default()
        });
        assert_eq!(decoder.decode_narrow(b"[&hearts;&eacute;]").unwrap(), b"[\xE9]");
    }

    #[test]
    fn malformed_multibyte_input_keeps_decoded_prefix() {
        assert_eq!(
            decode_html_entities::<Utf8>(b"&amp;\xFF&lt;").unwrap(),
            b"&"
        );
        assert_eq!(utf8_narrow().decode_narrow(b"&amp;\xFF&lt;").unwrap(), b"&");
    }

    #[test]
    fn unpaired_surrogate_does_not_end_utf16_decoding() {
        let mut input: Vec<u16> = "a".encode_utf16().collect();
        input.push(0xDC00);
        input.extend("&amp; rest of document".encode_utf16());
        input.push(0xD83D);
        input.extend("&lt;".encode_utf16());

        let out = decode_html_entities::<Utf16>(&input).unwrap();
        assert_eq!(String::from_utf16(&out).unwrap(), "a& rest of document<");
    }

    #[test]
    fn numeric_failure_propagates_from_every_entry_point() {
        let err = decode_str("x &#g;").unwrap_err();
        assert_eq!(
            err,
            DecodeError::NumericReference {
                reference: "&#g;".to_owned(),
                offset: 2,
                kind: NumericErrorKind::InvalidDigit,
            }
        );
        assert!(decode_html_entities::<Utf16>(&[0x26, 0x23, 0x3B]).is_err());
        assert!(utf8_narrow().decode_narrow(b"&#;").is_err());

        // `#xg` reads as hex zero followed by ignored text.
        assert_eq!(decode_str("&#xg;").unwrap(), "\0");
    }

    #[test]
    fn custom_table_and_policy() {
        let mut table = BTreeMap::new();
        table.insert("x".to_owned(), "\u{2715}".to_owned());
        let decoder = EntityDecoder::with_table(
            table,
            DecoderOptions {
                unresolved: UnresolvedResume::AfterAmpersand,
                ..Default::default()
            },
        );
        assert_eq!(decoder.decode_str("&q &x;").unwrap(), "&q \u{2715}");
        assert_eq!(decoder.decode_str("&amp;").unwrap(), "&amp;");
        assert_eq!(decoder.options().unresolved, UnresolvedResume::AfterAmpersand);
        assert_eq!(decoder.table().len(), 1);
    }

    #[test]
    fn borrowed_table() {
        let table = Html5Entities;
        let decoder = EntityDecoder::with_table(&table, DecoderOptions::default());
        assert_eq!(decoder.decode_str("&copy;").unwrap(), "\u{A9}");
    }
}
