use alloc::vec::Vec;

use super::Representation;

/// UTF-32 code units; the canonical representation itself.
///
/// Both directions copy values through unchanged, including values outside
/// the Unicode range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf32;

impl Representation for Utf32 {
    type Unit = u32;

    fn decode(&self, units: &[u32]) -> Vec<u32> {
        units.to_vec()
    }

    fn encode(&self, text: &[u32]) -> Vec<u32> {
        text.to_vec()
    }
}
