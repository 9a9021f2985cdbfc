use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use thiserror::Error;

/// Standard alphabet. Encodes with padding, accepts values with or without it.
const COOKIE_B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decoded value is not utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub fn encode_base64(value: &str) -> String {
    COOKIE_B64.encode(value.as_bytes())
}

/// Decode a base64 cookie payload back into the string it was built from.
pub fn decode_base64(value: &str) -> Result<String, DecodeError> {
    let bytes = COOKIE_B64.decode(value.trim())?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_special_characters() {
        for s in ["", "plain", "a\"quoted\"b", "k=v; k2=v2", "{\"my\":[\"data\",\"here\"]}", "héllo ✓"] {
            assert_eq!(decode_base64(&encode_base64(s)).unwrap(), s);
        }
    }

    #[test]
    fn encodes_with_padding() {
        assert_eq!(encode_base64("ab"), "YWI=");
    }

    #[test]
    fn accepts_unpadded_input() {
        assert_eq!(decode_base64("YWI").unwrap(), "ab");
    }

    #[test]
    fn rejects_bad_alphabet() {
        let err = decode_base64("not base64!").unwrap_err();
        assert!(matches!(err, DecodeError::Base64(_)));
    }

    #[test]
    fn rejects_non_utf8_payload() {
        // 0xff 0xfe
        let err = decode_base64("//4=").unwrap_err();
        assert!(matches!(err, DecodeError::Utf8(_)));
    }
}
