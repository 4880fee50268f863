use alloc::string::String;

use thiserror::Error;

/// Failure of a whole decode call.
///
/// Malformed input text and unknown entity names are not errors; only a
/// numeric reference that cannot be read as a number aborts decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A `&#...;` or `&#x...;` reference whose body is not a number.
    #[error("invalid numeric character reference `{reference}` at offset {offset}: {kind}")]
    NumericReference {
        /// The reference as written, including `&` and `;`.
        reference: String,
        /// Codepoint offset of the `&` in the canonical text.
        offset: usize,
        /// Why the number could not be read.
        kind: NumericErrorKind,
    },
}

/// Why the body of a numeric reference could not be parsed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericErrorKind {
    /// Nothing follows the `#`.
    #[error("no digits")]
    Empty,
    /// The body does not start with a digit of the expected radix.
    #[error("invalid digit")]
    InvalidDigit,
    /// The number does not fit in 64 bits.
    #[error("number too large")]
    Overflow,
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};

    use super::*;

    #[test]
    fn display_includes_reference_and_kind() {
        let err = DecodeError::NumericReference {
            reference: "&#zz;".to_string(),
            offset: 4,
            kind: NumericErrorKind::InvalidDigit,
        };
        assert_eq!(
            err.to_string(),
            "invalid numeric character reference `&#zz;` at offset 4: invalid digit"
        );
    }

    #[test]
    fn kinds_render_distinct_messages() {
        let messages: Vec<_> = [
            NumericErrorKind::Empty,
            NumericErrorKind::InvalidDigit,
            NumericErrorKind::Overflow,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(messages, ["no digits", "invalid digit", "number too large"]);
    }
}
