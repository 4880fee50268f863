use alloc::vec::Vec;

use log::trace;

use super::Representation;

/// UTF-16 code units in native byte order.
///
/// An unpaired surrogate is skipped and decoding continues with the next
/// unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf16;

impl Representation for Utf16 {
    type Unit = u16;

    fn decode(&self, units: &[u16]) -> Vec<u32> {
        let mut out = Vec::with_capacity(units.len());
        for decoded in char::decode_utf16(units.iter().copied()) {
            match decoded {
                Ok(ch) => out.push(u32::from(ch)),
                Err(err) => trace!(
                    target: "htmlent::codec",
                    "skipping unpaired surrogate {:#06X}",
                    err.unpaired_surrogate()
                ),
            }
        }
        out
    }

    fn encode(&self, text: &[u32]) -> Vec<u16> {
        let mut out = Vec::with_capacity(text.len());
        let mut buf = [0u16; 2];
        for ch in text.iter().copied().filter_map(char::from_u32) {
            out.extend_from_slice(ch.encode_utf16(&mut buf));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn decodes_bmp_and_pairs() {
        let text = "é€😀";
        let units: Vec<u16> = text.encode_utf16().collect();
        assert_eq!(
            Utf16.decode(&units),
            text.chars().map(u32::from).collect::<Vec<_>>()
        );
    }

    #[test]
    fn lone_low_surrogate_is_skipped() {
        assert_eq!(Utf16.decode(&[0x61, 0xDC00, 0x62]), vec![0x61, 0x62]);
    }

    #[test]
    fn high_without_low_is_skipped() {
        assert_eq!(Utf16.decode(&[0x61, 0xD83D, 0x62]), vec![0x61, 0x62]);
        assert_eq!(
            Utf16.decode(&[0x61, 0xD83D, 0xD83D, 0xDE00]),
            vec![0x61, 0x1F600]
        );
    }

    #[test]
    fn trailing_high_surrogate_is_dropped() {
        assert_eq!(Utf16.decode(&[0x61, 0x62, 0xD83D]), vec![0x61, 0x62]);
    }

    #[test]
    fn encode_splits_supplementary_planes() {
        assert_eq!(Utf16.encode(&[0x1F600]), vec![0xD83D, 0xDE00]);
        assert_eq!(Utf16.encode(&[0xDFFF, 0x41]), vec![0x41]);
    }
}
