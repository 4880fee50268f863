use alloc::{string::String, vec::Vec};

use bstr::ByteSlice;
use encoding_rs::{DecoderResult, EncoderResult};
use log::{debug, trace};

use super::{MAX_SEQUENCE_LEN, Representation, to_string};
use crate::Locale;

/// Bytes in the multibyte charset of a [`Locale`].
///
/// The charset is part of the value, so conversions never consult or modify
/// process-wide locale state. Charsets that `encoding_rs` cannot encode into
/// (UTF-16LE, UTF-16BE, `replacement`) encode as their output encoding,
/// which is UTF-8.
///
/// `Narrow::default()` uses [`Locale::default`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Narrow {
    locale: Locale,
}

impl Narrow {
    /// Bytes in the charset of `locale`.
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// The locale this representation reads and writes.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }
}

impl Representation for Narrow {
    type Unit = u8;

    fn decode(&self, units: &[u8]) -> Vec<u32> {
        // The decoder is the conversion state: it carries partial multibyte
        // sequences between calls and is never reused across conversions.
        let mut decoder = self.locale.encoding().new_decoder_without_bom_handling();
        let mut text = String::with_capacity(
            decoder
                .max_utf8_buffer_length_without_replacement(units.len())
                .unwrap_or(units.len()),
        );
        let mut read = 0;

        loop {
            let remaining = units.len() - read;
            let (result, consumed) =
                decoder.decode_to_string_without_replacement(&units[read..], &mut text, true);
            read += consumed;
            match result {
                DecoderResult::InputEmpty => break,
                DecoderResult::OutputFull => text.reserve(
                    decoder
                        .max_utf8_buffer_length_without_replacement(remaining)
                        .unwrap_or(remaining.saturating_mul(MAX_SEQUENCE_LEN))
                        .max(MAX_SEQUENCE_LEN),
                ),
                DecoderResult::Malformed(bad, after) => {
                    let bad_end = read.saturating_sub(usize::from(after));
                    let bad_start = bad_end.saturating_sub(usize::from(bad));
                    debug!(
                        target: "htmlent::codec",
                        "malformed {} sequence {:?} at byte {bad_start}",
                        self.locale.encoding().name(),
                        units[bad_start..bad_end].as_bstr()
                    );
                    break;
                }
            }
        }

        text.chars().map(u32::from).collect()
    }

    fn encode(&self, text: &[u32]) -> Vec<u8> {
        let mut encoder = self.locale.encoding().output_encoding().new_encoder();
        let text = to_string(text);
        let mut out = Vec::with_capacity(
            encoder
                .max_buffer_length_from_utf8_without_replacement(text.len())
                .unwrap_or(text.len()),
        );
        let mut read = 0;

        loop {
            let remaining = text.len() - read;
            let (result, consumed) =
                encoder.encode_from_utf8_to_vec_without_replacement(&text[read..], &mut out, true);
            read += consumed;
            match result {
                EncoderResult::InputEmpty => break,
                EncoderResult::OutputFull => out.reserve(
                    encoder
                        .max_buffer_length_from_utf8_without_replacement(remaining)
                        .unwrap_or(remaining.saturating_mul(2))
                        .max(MAX_SEQUENCE_LEN),
                ),
                EncoderResult::Unmappable(ch) => {
                    trace!(
                        target: "htmlent::codec",
                        "skipping {ch:?}, not representable in {}",
                        encoder.encoding().name()
                    );
                }
            }
        }

        out
    }
}
