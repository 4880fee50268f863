use crate::Locale;

/// Configuration for an [`EntityDecoder`](crate::EntityDecoder).
///
/// # Examples
///
/// ```rust
/// use htmlent::{DecoderOptions, EntityDecoder, Locale, UnresolvedResume};
///
/// let decoder = EntityDecoder::new(DecoderOptions {
///     locale: Locale::from_name("ja_JP.Shift_JIS").unwrap(),
///     unresolved: UnresolvedResume::AfterAmpersand,
/// });
/// ```
///
/// # Default
///
/// The environment locale for narrow text, resuming after the `;` of unknown
/// names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fuzzing", derive(arbitrary::Arbitrary))]
pub struct DecoderOptions {
    /// Charset of [`Narrow`](crate::Narrow) input and output.
    ///
    /// # Default
    ///
    /// [`Locale::default`]: the environment locale with the `std` feature,
    /// UTF-8 without it.
    pub locale: Locale,

    /// Where scanning resumes after a reference whose name is not in the
    /// table.
    ///
    /// # Default
    ///
    /// [`UnresolvedResume::AfterReference`]
    pub unresolved: UnresolvedResume,
}

/// Where the scan continues after an unknown `&name;`.
///
/// With `&lt &amp;`, the first `&` pairs with the only `;`, giving the
/// unknown name `lt &amp`. `AfterReference` leaves the whole text alone;
/// `AfterAmpersand` looks again from the next `&` and decodes `&amp;`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fuzzing", derive(arbitrary::Arbitrary))]
pub enum UnresolvedResume {
    /// Continue after the `;` that closed the unknown reference.
    #[default]
    AfterReference,
    /// Continue from the codepoint after the `&`.
    AfterAmpersand,
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn options_serialize_with_charset_name() {
        let options = DecoderOptions {
            locale: Locale::new(encoding_rs::SHIFT_JIS),
            unresolved: UnresolvedResume::AfterAmpersand,
        };
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(
            json,
            r#"{"locale":{"encoding":"Shift_JIS"},"unresolved":"AfterAmpersand"}"#
        );
        let back: DecoderOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
