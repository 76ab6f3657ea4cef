// RSA Text Encoding
// Base64 byte stream in, fixed-width decimal chunks out

use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::{alphabet, Engine as _};

use crate::bigint::BigInt;
use crate::error::{CryptoError, Result};

/// Accepts padded or unpadded input and non-canonical trailing bits
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// UTF-8 bytes of `message`, base64-encoded; each output byte is one plaintext unit
pub fn to_base64_bytes(message: &str) -> Vec<u8> {
    STANDARD.encode(message.as_bytes()).into_bytes()
}

/// Inverse of `to_base64_bytes`. Missing `=` padding is tolerated.
pub fn from_base64_bytes(bytes: &[u8]) -> Result<String> {
    let end = bytes.iter().rposition(|&b| b != b'=').map_or(0, |i| i + 1);

    let raw = LENIENT
        .decode(&bytes[..end])
        .map_err(|e| CryptoError::PayloadDecodingError(format!("invalid base64: {}", e)))?;

    String::from_utf8(raw)
        .map_err(|e| CryptoError::PayloadDecodingError(format!("invalid UTF-8: {}", e)))
}

/// Split a ciphertext into `width`-digit chunks and parse each one
pub fn parse_chunks(ciphertext: &str, width: usize) -> Result<Vec<BigInt>> {
    if width == 0 {
        return Err(CryptoError::MalformedCiphertext(
            "modulus has no digits".to_string(),
        ));
    }
    if ciphertext.len() % width != 0 {
        return Err(CryptoError::MalformedCiphertext(format!(
            "length {} is not a multiple of {}",
            ciphertext.len(),
            width
        )));
    }
    if let Some(pos) = ciphertext.bytes().position(|b| !b.is_ascii_digit()) {
        return Err(CryptoError::MalformedCiphertext(format!(
            "non-digit at offset {}",
            pos
        )));
    }

    ciphertext
        .as_bytes()
        .chunks(width)
        .map(|chunk| {
            BigInt::parse_bytes(chunk, 10).ok_or_else(|| {
                CryptoError::MalformedCiphertext("unparseable chunk".to_string())
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigint::from_u64;

    #[test]
    fn test_to_base64_bytes() {
        assert_eq!(to_base64_bytes("Hi"), b"SGk=".to_vec());
        assert_eq!(to_base64_bytes("A"), b"QQ==".to_vec());
        assert!(to_base64_bytes("").is_empty());
    }

    #[test]
    fn test_from_base64_bytes_padding() {
        assert_eq!(from_base64_bytes(b"SGk=").unwrap(), "Hi");
        assert_eq!(from_base64_bytes(b"SGk").unwrap(), "Hi");
        assert_eq!(from_base64_bytes(b"SGk===").unwrap(), "Hi");
        assert_eq!(from_base64_bytes(b"").unwrap(), "");
    }

    #[test]
    fn test_from_base64_bytes_errors() {
        assert!(matches!(
            from_base64_bytes(b"S!k="),
            Err(CryptoError::PayloadDecodingError(_))
        ));
        // base64 of [0xff, 0xfe]
        assert!(matches!(
            from_base64_bytes(b"//4="),
            Err(CryptoError::PayloadDecodingError(_))
        ));
    }

    #[test]
    fn test_parse_chunks() {
        let chunks = parse_chunks("279000420001", 4).unwrap();
        assert_eq!(chunks, vec![from_u64(2790), from_u64(42), from_u64(1)]);
        assert!(parse_chunks("", 4).unwrap().is_empty());
    }

    #[test]
    fn test_parse_chunks_malformed() {
        assert!(matches!(
            parse_chunks("27900", 4),
            Err(CryptoError::MalformedCiphertext(_))
        ));
        assert!(matches!(
            parse_chunks("27_0", 4),
            Err(CryptoError::MalformedCiphertext(_))
        ));
        assert!(matches!(
            parse_chunks("+279", 4),
            Err(CryptoError::MalformedCiphertext(_))
        ));
        assert!(matches!(
            parse_chunks("1234", 0),
            Err(CryptoError::MalformedCiphertext(_))
        ));
    }
}
