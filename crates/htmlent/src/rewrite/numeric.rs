//! Numeric character reference bodies (`#65`, `#x41`).
//!
//! Parsing follows the prefix rules of C `strtoul`: digits are read up to the
//! first codepoint that is not a digit of the radix and the rest of the body
//! is ignored. A decimal body may start with whitespace and one sign; a `-`
//! negates the value modulo 2^64, so `#-1` is `u32::MAX` after truncation.
//! Only a body without any leading digit, or a value that does not fit in
//! `u64`, is an error.

use crate::NumericErrorKind;

const HEX_MARKERS: [u32; 2] = ['x' as u32, 'X' as u32];
const PLUS: u32 = '+' as u32;
const MINUS: u32 = '-' as u32;

/// Parses the body of a numeric reference, `#` included, into the value
/// substituted for it.
///
/// Values wider than 32 bits wrap; nothing checks the result against the
/// Unicode range.
pub(crate) fn parse_reference(body: &[u32]) -> Result<u32, NumericErrorKind> {
    let value = match body {
        // The marker reads as a leading `0`, so `#x` alone is zero.
        [_, marker, digits @ ..] if HEX_MARKERS.contains(marker) => {
            parse_digits(digits, 16, Some(0))?
        }
        [_, digits @ ..] if !digits.is_empty() => {
            let digits = skip_leading_space(digits);
            match digits.split_first() {
                Some((&MINUS, rest)) => parse_digits(rest, 10, None)?.wrapping_neg(),
                Some((&PLUS, rest)) => parse_digits(rest, 10, None)?,
                _ => parse_digits(digits, 10, None)?,
            }
        }
        _ => return Err(NumericErrorKind::Empty),
    };

    #[allow(clippy::cast_possible_truncation)]
    let value = value as u32;
    Ok(value)
}

fn skip_leading_space(digits: &[u32]) -> &[u32] {
    let start = digits
        .iter()
        .position(|&cp| !matches!(cp, 0x20 | 0x09..=0x0D))
        .unwrap_or(digits.len());
    &digits[start..]
}

/// Accumulates the longest run of `radix` digits at the start of `digits`
/// onto `seed`.
fn parse_digits(digits: &[u32], radix: u32, seed: Option<u64>) -> Result<u64, NumericErrorKind> {
    let mut value = seed;
    for digit in digits
        .iter()
        .map_while(|&cp| char::from_u32(cp).and_then(|ch| ch.to_digit(radix)))
    {
        let acc = value.unwrap_or(0);
        value = Some(
            acc.checked_mul(u64::from(radix))
                .and_then(|v| v.checked_add(u64::from(digit)))
                .ok_or(NumericErrorKind::Overflow)?,
        );
    }
    value.ok_or(NumericErrorKind::InvalidDigit)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rstest::rstest;

    use super::*;

    fn body(s: &str) -> Vec<u32> {
        s.chars().map(u32::from).collect()
    }

    #[rstest]
    #[case("#65", 65)]
    #[case("#0065", 65)]
    #[case("#x41", 0x41)]
    #[case("#X41", 0x41)]
    #[case("#xfF", 0xFF)]
    #[case("#x1F600", 0x1F600)]
    #[case("#x", 0)]
    #[case("#65abc", 65)]
    #[case("#x41zz", 0x41)]
    #[case("# 65", 65)]
    #[case("#+65", 65)]
    #[case("#1114112", 0x11_0000)]
    #[case("#55296", 0xD800)]
    #[case("#-5", 0xFFFF_FFFB)]
    #[case("# -1", u32::MAX)]
    #[case("#-0", 0)]
    fn parses(#[case] input: &str, #[case] expected: u32) {
        assert_eq!(parse_reference(&body(input)), Ok(expected));
    }

    #[rstest]
    #[case("#", NumericErrorKind::Empty)]
    #[case("#abc", NumericErrorKind::InvalidDigit)]
    #[case("#+", NumericErrorKind::InvalidDigit)]
    #[case("#-", NumericErrorKind::InvalidDigit)]
    #[case("#+-5", NumericErrorKind::InvalidDigit)]
    #[case("#-18446744073709551616", NumericErrorKind::Overflow)]
    #[case("# ", NumericErrorKind::InvalidDigit)]
    #[case("#18446744073709551616", NumericErrorKind::Overflow)]
    #[case("#x10000000000000000", NumericErrorKind::Overflow)]
    fn rejects(#[case] input: &str, #[case] expected: NumericErrorKind) {
        assert_eq!(parse_reference(&body(input)), Err(expected));
    }

    #[test]
    fn wide_values_wrap_to_32_bits() {
        assert_eq!(parse_reference(&body("#4294967361")), Ok(65));
        assert_eq!(parse_reference(&body("#xFFFFFFFFFFFFFFFF")), Ok(u32::MAX));
    }

    #[test]
    fn full_width_digits_are_not_digits() {
        assert_eq!(
            parse_reference(&body("#\u{FF16}\u{FF15}")),
            Err(NumericErrorKind::InvalidDigit)
        );
    }
}
