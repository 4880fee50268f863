//! Conversion between caller text and canonical codepoints.
//!
//! Every representation implements [`Representation`] once: decoding into
//! canonical text (`u32` per codepoint) and encoding back out of it. A
//! conversion between two representations always goes through canonical
//! text; see [`convert`].
//!
//! Decoding is best effort. In the multibyte representations ([`Utf8`],
//! [`Narrow`]) a malformed sequence ends the conversion at that unit and
//! whatever was decoded before it is returned. [`Utf16`] skips an unpaired
//! surrogate and keeps going. A sequence that is still incomplete at the end
//! of input is dropped. Encoding skips canonical values that are not Unicode
//! scalar values.

mod narrow;
mod utf16;
mod utf32;
mod utf8;

use alloc::vec::Vec;
use core::fmt::Debug;

pub use narrow::Narrow;
pub use utf8::Utf8;
pub use utf16::Utf16;
pub use utf32::Utf32;

pub(crate) use utf8::to_string;

/// Most units one codepoint occupies in any representation.
pub const MAX_SEQUENCE_LEN: usize = 4;

/// The platform-native wide representation.
#[cfg(windows)]
pub type Wide = Utf16;
/// The platform-native wide representation.
#[cfg(not(windows))]
pub type Wide = Utf32;

/// Code unit of [`Wide`].
#[cfg(windows)]
pub type WideChar = u16;
/// Code unit of [`Wide`].
#[cfg(not(windows))]
pub type WideChar = u32;

/// A text representation with a fixed code-unit type.
pub trait Representation {
    /// The storage unit of this representation.
    type Unit: Copy + Debug + PartialEq;

    /// Converts `units` into canonical text.
    fn decode(&self, units: &[Self::Unit]) -> Vec<u32>;

    /// Converts canonical text into units of this representation.
    fn encode(&self, text: &[u32]) -> Vec<Self::Unit>;
}

/// Converts `units` from one representation to another through canonical
/// text.
///
/// ```rust
/// use htmlent::{Utf8, Utf16, convert};
///
/// let wide = convert(&Utf8, &Utf16, "héllo".as_bytes());
/// assert_eq!(wide, "héllo".encode_utf16().collect::<Vec<_>>());
/// ```
pub fn convert<F, T>(from: &F, to: &T, units: &[F::Unit]) -> Vec<T::Unit>
where
    F: Representation + ?Sized,
    T: Representation + ?Sized,
{
    to.encode(&from.decode(units))
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec};

    use super::*;

    #[test]
    fn sequences_past_max_length_stop_decoding() {
        // Five- and six-byte leads from the obsolete UTF-8 forms.
        let bytes = b"x\xF8\x88\x80\x80\x80y\xFC\x84\x80\x80\x80\x80";
        assert_eq!(Utf8.decode(bytes), vec![0x78]);
        assert_eq!(Narrow::new(crate::Locale::UTF_8).decode(bytes), vec![0x78]);
    }

    #[test]
    fn convert_routes_through_canonical() {
        let text = "a😀\u{0}b";
        let utf16: Vec<u16> = text.encode_utf16().collect();
        let utf32: Vec<u32> = text.chars().map(u32::from).collect();

        assert_eq!(convert(&Utf8, &Utf16, text.as_bytes()), utf16);
        assert_eq!(convert(&Utf16, &Utf32, &utf16), utf32);
        assert_eq!(convert(&Utf32, &Utf8, &utf32), text.as_bytes());
    }

    #[test]
    fn convert_through_narrow_charset() {
        let latin = Narrow::new(crate::Locale::new(encoding_rs::WINDOWS_1252));
        let bytes = convert(&Utf8, &latin, "café €".as_bytes());
        assert_eq!(bytes, vec![b'c', b'a', b'f', 0xE9, b' ', 0x80]);

        let back = convert(&latin, &Utf8, &bytes);
        assert_eq!(String::from_utf8(back).unwrap(), "café €");
    }

    #[test]
    fn wide_matches_platform_width() {
        let text = "x\u{10348}";
        let wide: Vec<WideChar> = Wide::default().encode(&[0x78, 0x10348]);
        #[cfg(windows)]
        assert_eq!(wide, text.encode_utf16().collect::<Vec<_>>());
        #[cfg(not(windows))]
        assert_eq!(wide, text.chars().map(u32::from).collect::<Vec<_>>());
    }
}
