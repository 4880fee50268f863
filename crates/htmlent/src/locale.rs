use encoding_rs::{Encoding, UTF_8_INIT};

/// The multibyte charset used for [`Narrow`](crate::Narrow) text.
///
/// A locale is an ordinary value passed to the conversions that need it.
/// The default locale comes from the environment (`LC_ALL`, `LC_CTYPE`,
/// `LANG`) when the `std` feature is on.
/// The minimal `C`/`POSIX` locale maps to the environment default charset,
/// UTF-8, since a byte-per-character reading would break multibyte input.
///
/// ```rust
/// use htmlent::Locale;
///
/// let latin = Locale::from_name("de_DE.ISO-8859-1").unwrap();
/// assert_eq!(latin.encoding(), encoding_rs::WINDOWS_1252);
/// assert_eq!(Locale::from_name("C"), Some(Locale::UTF_8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Locale {
    encoding: &'static Encoding,
}

/// With the `std` feature this is [`Locale::from_env`]; without it, UTF-8.
impl Default for Locale {
    #[cfg(feature = "std")]
    fn default() -> Self {
        Self::from_env()
    }

    #[cfg(not(feature = "std"))]
    fn default() -> Self {
        Self::UTF_8
    }
}

impl Locale {
    /// UTF-8 text.
    pub const UTF_8: Locale = Locale {
        encoding: &UTF_8_INIT,
    };

    /// A locale using `encoding`.
    #[must_use]
    pub const fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    /// Looks up a charset by its WHATWG label (`"shift_jis"`, `"latin1"`).
    #[must_use]
    pub fn for_label(label: &[u8]) -> Option<Self> {
        Encoding::for_label(label).map(Self::new)
    }

    /// Parses a POSIX locale name of the form
    /// `language[_territory][.codeset][@modifier]`.
    ///
    /// `C`, `POSIX`, the empty name, and names without a codeset resolve to
    /// UTF-8. Returns `None` when the codeset is not a known charset label.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if matches!(name, "" | "C" | "POSIX") {
            return Some(Self::UTF_8);
        }
        let without_modifier = name.split_once('@').map_or(name, |(head, _)| head);
        match without_modifier.split_once('.') {
            Some((_, codeset)) => Self::for_label(codeset.as_bytes()),
            None => Some(Self::UTF_8),
        }
    }

    /// Reads the locale from `LC_ALL`, `LC_CTYPE`, then `LANG`, taking the
    /// first that is set and non-empty. Unknown charsets fall back to UTF-8.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|var| std::env::var(var).ok())
    }

    /// [`from_env`](Self::from_env) over an arbitrary variable lookup.
    #[cfg(feature = "std")]
    fn from_vars(lookup: impl Fn(&str) -> Option<std::string::String>) -> Self {
        ["LC_ALL", "LC_CTYPE", "LANG"]
            .into_iter()
            .filter_map(lookup)
            .find(|value| !value.is_empty())
            .and_then(|name| Self::from_name(&name))
            .unwrap_or(Self::UTF_8)
    }

    /// The charset of this locale.
    #[must_use]
    pub const fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

#[cfg(feature = "fuzzing")]
impl<'a> arbitrary::Arbitrary<'a> for Locale {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let charsets = [
            encoding_rs::UTF_8,
            encoding_rs::WINDOWS_1252,
            encoding_rs::SHIFT_JIS,
            encoding_rs::EUC_KR,
            encoding_rs::GB18030,
            encoding_rs::KOI8_R,
        ];
        Ok(Self::new(*u.choose(&charsets)?))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("C", encoding_rs::UTF_8)]
    #[case("POSIX", encoding_rs::UTF_8)]
    #[case("", encoding_rs::UTF_8)]
    #[case("en_US", encoding_rs::UTF_8)]
    #[case("en_US.UTF-8", encoding_rs::UTF_8)]
    #[case("en_US.utf8", encoding_rs::UTF_8)]
    #[case("de_DE.ISO-8859-1@euro", encoding_rs::WINDOWS_1252)]
    #[case("ja_JP.Shift_JIS", encoding_rs::SHIFT_JIS)]
    #[case("ru_RU.KOI8-R", encoding_rs::KOI8_R)]
    #[case("zh_CN.GB18030", encoding_rs::GB18030)]
    fn parses_posix_names(#[case] name: &str, #[case] expected: &'static Encoding) {
        assert_eq!(Locale::from_name(name).map(|l| l.encoding()), Some(expected));
    }

    #[test]
    fn unknown_codeset_is_rejected() {
        assert_eq!(Locale::from_name("xx_XX.NOT-A-CHARSET"), None);
    }

    #[test]
    fn labels_resolve_like_whatwg() {
        assert_eq!(
            Locale::for_label(b"latin1"),
            Some(Locale::new(encoding_rs::WINDOWS_1252))
        );
        assert_eq!(Locale::for_label(b"bogus"), None);
    }

    #[cfg(feature = "std")]
    #[test]
    fn default_follows_environment() {
        assert_eq!(Locale::default(), Locale::from_env());
    }

    #[cfg(not(feature = "std"))]
    #[test]
    fn default_is_utf8() {
        assert_eq!(Locale::default(), Locale::UTF_8);
    }

    #[cfg(feature = "std")]
    #[test]
    fn environment_variables_in_precedence_order() {
        use std::{collections::HashMap, string::String};

        fn env(pairs: &[(&str, &str)]) -> Locale {
            let vars: HashMap<&str, &str> = pairs.iter().copied().collect();
            Locale::from_vars(|var| vars.get(var).map(|v| String::from(*v)))
        }

        assert_eq!(env(&[]), Locale::UTF_8);
        assert_eq!(
            env(&[("LANG", "ja_JP.Shift_JIS")]).encoding(),
            encoding_rs::SHIFT_JIS
        );
        assert_eq!(
            env(&[("LANG", "ja_JP.Shift_JIS"), ("LC_CTYPE", "ru_RU.KOI8-R")]).encoding(),
            encoding_rs::KOI8_R
        );
        assert_eq!(
            env(&[("LANG", "ja_JP.Shift_JIS"), ("LC_ALL", "de_DE.ISO-8859-1")]).encoding(),
            encoding_rs::WINDOWS_1252
        );
        assert_eq!(
            env(&[("LANG", "ja_JP.Shift_JIS"), ("LC_ALL", "")]).encoding(),
            encoding_rs::SHIFT_JIS
        );
        assert_eq!(env(&[("LANG", "xx_XX.NOT-A-CHARSET")]), Locale::UTF_8);
        assert_eq!(env(&[("LC_ALL", "C")]), Locale::UTF_8);
    }

    #[cfg(feature = "std")]
    #[test]
    fn shift_jis_environment_drives_narrow_decoding() {
        use crate::{DecoderOptions, EntityDecoder};

        let locale = Locale::from_vars(|var| (var == "LANG").then(|| "ja_JP.Shift_JIS".into()));
        let decoder = EntityDecoder::new(DecoderOptions {
            locale,
            ..DecoderOptions::default()
        });
        let (input, _, _) = encoding_rs::SHIFT_JIS.encode("日本&amp;語");
        let (expected, _, _) = encoding_rs::SHIFT_JIS.encode("日本&語");
        assert_eq!(decoder.decode_narrow(&input).unwrap(), &*expected);
    }
}
