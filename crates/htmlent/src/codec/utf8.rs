use alloc::{string::String, vec::Vec};

use bstr::ByteSlice;
use log::{debug, trace};

use super::Representation;

/// UTF-8 code units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8;

impl Representation for Utf8 {
    type Unit = u8;

    fn decode(&self, units: &[u8]) -> Vec<u32> {
        let valid = match core::str::from_utf8(units) {
            Ok(text) => text,
            Err(err) => {
                let (head, rest) = units.split_at(err.valid_up_to());
                match err.error_len() {
                    Some(len) => debug!(
                        target: "htmlent::codec",
                        "malformed UTF-8 sequence {:?} at byte {}",
                        rest[..len].as_bstr(),
                        head.len()
                    ),
                    None => trace!(
                        target: "htmlent::codec",
                        "dropping {} bytes of a truncated sequence",
                        rest.len()
                    ),
                }
                core::str::from_utf8(head).unwrap_or_default()
            }
        };
        valid.chars().map(u32::from).collect()
    }

    fn encode(&self, text: &[u32]) -> Vec<u8> {
        to_string(text).into_bytes()
    }
}

/// Collects canonical text into a `String`, skipping values that are not
/// Unicode scalar values.
pub(crate) fn to_string(text: &[u32]) -> String {
    text.iter().copied().filter_map(char::from_u32).collect()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn scalars(s: &str) -> Vec<u32> {
        s.chars().map(u32::from).collect()
    }

    #[test]
    fn decodes_every_sequence_length() {
        let text = "a\u{e9}\u{20ac}\u{1f600}";
        assert_eq!(Utf8.decode(text.as_bytes()), scalars(text));
    }

    #[test]
    fn embedded_nul_is_ordinary() {
        assert_eq!(Utf8.decode(b"a\0b"), vec![0x61, 0, 0x62]);
    }

    #[test]
    fn stray_continuation_stops_decoding() {
        assert_eq!(Utf8.decode(b"ab\x80cd"), vec![0x61, 0x62]);
    }

    #[test]
    fn overlong_forms_are_rejected() {
        assert_eq!(Utf8.decode(b"x\xC0\x80y"), vec![0x78]);
        assert_eq!(Utf8.decode(b"x\xE0\x80\x80y"), vec![0x78]);
        assert_eq!(Utf8.decode(b"x\xF0\x80\x80\x80y"), vec![0x78]);
    }

    #[test]
    fn encoded_surrogates_and_out_of_range_are_rejected() {
        assert_eq!(Utf8.decode(b"x\xED\xA0\x80"), vec![0x78]);
        assert_eq!(Utf8.decode(b"x\xF4\x90\x80\x80"), vec![0x78]);
        assert_eq!(Utf8.decode(b"x\xF5\x80"), vec![0x78]);
    }

    #[test]
    fn interrupted_sequence_stops_decoding() {
        assert_eq!(Utf8.decode(b"x\xE2\x82y\xE2\x82\xAC"), vec![0x78]);
    }

    #[test]
    fn truncated_tail_is_dropped() {
        assert_eq!(Utf8.decode(b"ok\xF0\x9F\x98"), vec![0x6F, 0x6B]);
    }

    #[test]
    fn encode_skips_non_scalars() {
        let bytes = Utf8.encode(&[0x41, 0xD800, 0x11_0000, 0x20AC]);
        assert_eq!(bytes, "A\u{20ac}".as_bytes());
    }
}
