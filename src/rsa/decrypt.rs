// RSA Decryption Implementation
// Reverses the fixed-width chunking, exponentiation and base64 stages

use num_traits::ToPrimitive;

use crate::bigint::{decimal_width, mod_pow};
use crate::error::{CryptoError, Result};

use super::encoding::{from_base64_bytes, parse_chunks};
use super::keygen::RsaPrivateKey;

/// Decrypt a digit string back into text.
///
/// Fails with `MalformedCiphertext` when the layout does not match the
/// modulus and with `PayloadDecodingError` when the recovered bytes are
/// not base64-encoded UTF-8.
pub fn decrypt(ciphertext: &str, private_key: &RsaPrivateKey) -> Result<String> {
    let width = decimal_width(&private_key.n);
    let chunks = parse_chunks(ciphertext, width)?;

    let mut bytes = Vec::with_capacity(chunks.len());
    for (index, c) in chunks.iter().enumerate() {
        if c >= &private_key.n {
            return Err(CryptoError::MalformedCiphertext(format!(
                "chunk {} is not below the modulus",
                index
            )));
        }

        // m = c^d mod n
        let m = mod_pow(c, &private_key.d, &private_key.n);
        let byte = m.to_u8().ok_or_else(|| {
            CryptoError::PayloadDecodingError(format!(
                "chunk {} decrypts to {}, not a byte",
                index, m
            ))
        })?;
        bytes.push(byte);
    }

    from_base64_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigint::{from_u64, zero_fill};
    use crate::config::RsaConfig;
    use crate::rsa::encrypt::{encrypt, encrypt_byte};
    use crate::rsa::keygen::{derive_keypair, generate_keys, RsaKeyPair};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::OnceLock;

    fn textbook() -> RsaKeyPair {
        derive_keypair(&from_u64(61), &from_u64(53), 3, None).unwrap()
    }

    fn generated() -> &'static RsaKeyPair {
        static KEYS: OnceLock<RsaKeyPair> = OnceLock::new();
        KEYS.get_or_init(|| {
            let mut rng = StdRng::seed_from_u64(99);
            generate_keys(&mut rng, &RsaConfig::default().with_prime_bits(96)).unwrap()
        })
    }

    fn test_roundtrip(keypair: &RsaKeyPair, message: &str) {
        let ciphertext = keypair.public_key.encrypt(message).unwrap();
        let decrypted = keypair.private_key.decrypt(&ciphertext).unwrap();
        assert_eq!(message, decrypted);
    }

    #[test]
    fn test_decrypt_textbook() {
        let keypair = textbook();
        let ciphertext = encrypt("Hi", &keypair.public_key).unwrap();
        assert_eq!(decrypt(&ciphertext, &keypair.private_key).unwrap(), "Hi");
    }

    #[test]
    fn test_roundtrip_various_messages() {
        let messages = [
            "",
            "A",
            "Hi",
            "Hello, World!",
            "héllo wörld",
            "日本語テキスト",
            "emoji 🦀 and tabs\t\n",
        ];

        for keypair in [&textbook(), generated()] {
            for message in messages {
                test_roundtrip(keypair, message);
            }
        }
    }

    #[test]
    fn test_decrypt_bad_length() {
        let keypair = textbook();
        let result = decrypt("12345", &keypair.private_key);
        assert!(matches!(result, Err(CryptoError::MalformedCiphertext(_))));
    }

    #[test]
    fn test_decrypt_chunk_above_modulus() {
        let keypair = textbook();
        let result = decrypt("9999", &keypair.private_key);
        assert!(matches!(result, Err(CryptoError::MalformedCiphertext(_))));

        let result = decrypt("3233", &keypair.private_key);
        assert!(matches!(result, Err(CryptoError::MalformedCiphertext(_))));
    }

    #[test]
    fn test_decrypt_non_byte_value() {
        let keypair = textbook();
        let c = mod_pow(&from_u64(300), &keypair.public_key.e, &keypair.public_key.n);
        let result = decrypt(&zero_fill(&c, 4), &keypair.private_key);
        assert!(matches!(result, Err(CryptoError::PayloadDecodingError(_))));
    }

    #[test]
    fn test_decrypt_invalid_payload() {
        let keypair = textbook();
        let seal = |bytes: &[u8]| -> String {
            bytes
                .iter()
                .map(|&b| zero_fill(&encrypt_byte(b, &keypair.public_key), 4))
                .collect()
        };

        // '!' is outside the base64 alphabet
        let result = decrypt(&seal(b"S!k="), &keypair.private_key);
        assert!(matches!(result, Err(CryptoError::PayloadDecodingError(_))));

        // valid base64, invalid UTF-8
        let result = decrypt(&seal(b"//4="), &keypair.private_key);
        assert!(matches!(result, Err(CryptoError::PayloadDecodingError(_))));
    }

    #[test]
    fn test_decrypt_wrong_key() {
        let keypair = generated();
        let other = textbook();
        let ciphertext = keypair.public_key.encrypt("Test").unwrap();
        assert!(other.private_key.decrypt(&ciphertext).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn roundtrip_any_text(message in "\\PC{0,40}") {
            let keypair = generated();
            let ciphertext = keypair.public_key.encrypt(&message).unwrap();
            prop_assert_eq!(ciphertext.len() % keypair.public_key.width(), 0);
            prop_assert_eq!(keypair.private_key.decrypt(&ciphertext).unwrap(), message);
        }

        #[test]
        fn rejects_misaligned_ciphertext(message in "\\PC{1,20}", cut in 1usize..4) {
            let keypair = textbook();
            let ciphertext = keypair.public_key.encrypt(&message).unwrap();
            let truncated = &ciphertext[..ciphertext.len() - cut];
            prop_assert!(matches!(
                keypair.private_key.decrypt(truncated),
                Err(CryptoError::MalformedCiphertext(_))
            ));
        }
    }
}
