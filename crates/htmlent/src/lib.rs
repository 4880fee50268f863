//! Decoding of HTML character references (`&amp;`, `&#38;`, `&#x26;`) in text
//! of any supported code-unit width.
//!
//! Input is decoded into canonical text (one `u32` per codepoint), rewritten
//! in a single left-to-right pass, and encoded back into the caller's
//! representation.
//!
//! ```rust
//! use htmlent::{Utf16, decode_html_entities, decode_str};
//!
//! assert_eq!(decode_str("a &amp; b").unwrap(), "a & b");
//!
//! let units: Vec<u16> = "&lt;&#x41;&gt;".encode_utf16().collect();
//! let decoded = decode_html_entities::<Utf16>(&units).unwrap();
//! assert_eq!(String::from_utf16(&decoded).unwrap(), "<A>");
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod codec;
mod decoder;
mod entities;
mod error;
mod locale;
mod options;
mod rewrite;

#[cfg(test)]
mod tests;

pub use codec::{Narrow, Representation, Utf8, Utf16, Utf32, Wide, WideChar, convert};
pub use decoder::{EntityDecoder, decode_html_entities, decode_html_entities_n, decode_str};
pub use entities::{EntityLookup, Html5Entities};
pub use error::{DecodeError, NumericErrorKind};
pub use locale::Locale;
pub use options::{DecoderOptions, UnresolvedResume};
