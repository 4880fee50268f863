#![no_main]

use arbitrary::Arbitrary;
use htmlent::{
    DecoderOptions, EntityDecoder, Narrow, Representation, Utf8, Utf16, Utf32, convert,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Input {
    Utf8(Vec<u8>),
    Utf16(Vec<u16>),
    Utf32(Vec<u32>),
    Narrow(Vec<u8>),
    Text(String),
}

#[derive(Debug, Arbitrary)]
struct Case {
    options: DecoderOptions,
    input: Input,
    len: usize,
}

fn check<R: Representation + ?Sized>(decoder: &EntityDecoder, repr: &R, units: &[R::Unit], len: usize) {
    let whole = decoder.decode(repr, units);
    let limited = decoder.decode_n(repr, units, len);
    if len >= units.len() {
        assert_eq!(whole, limited);
    }

    // Decoding is deterministic and never grows canonical text.
    let text = repr.decode(units);
    if let Ok(out) = decoder.decode_canonical(&text) {
        assert!(out.len() <= text.len());
    }
    assert_eq!(whole, decoder.decode(repr, units));
}

fuzz_target!(|case: Case| {
    let decoder = EntityDecoder::new(case.options);
    match &case.input {
        Input::Utf8(bytes) => check(&decoder, &Utf8, bytes, case.len),
        Input::Utf16(units) => check(&decoder, &Utf16, units, case.len),
        Input::Utf32(units) => check(&decoder, &Utf32, units, case.len),
        Input::Narrow(bytes) => check(&decoder, &decoder.narrow(), bytes, case.len),
        Input::Text(text) => {
            let from_str = decoder.decode_str(text);
            let utf16: Vec<u16> = text.encode_utf16().collect();
            let from_utf16 = decoder
                .decode(&Utf16, &utf16)
                .map(|units| convert(&Utf16, &Utf8, &units));
            assert_eq!(from_str.map(String::into_bytes), from_utf16);

            if !text.contains('&') {
                let narrow: Narrow = decoder.narrow();
                let bytes = convert(&Utf8, &narrow, text.as_bytes());
                let canonical = narrow.decode(&bytes);
                assert_eq!(
                    decoder.decode_narrow(&bytes).map(|out| narrow.decode(&out)),
                    Ok(canonical)
                );
            }
        }
    }
});
