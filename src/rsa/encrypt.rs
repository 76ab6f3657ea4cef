// RSA Encryption Implementation
// Per-byte textbook RSA over the base64 form of the message

use crate::bigint::{decimal_width, mod_pow, zero_fill, BigInt};
use crate::error::{CryptoError, Result};

use super::encoding::to_base64_bytes;
use super::keygen::RsaPublicKey;

/// Compute c = byte^e mod n
pub fn encrypt_byte(byte: u8, public_key: &RsaPublicKey) -> BigInt {
    mod_pow(&BigInt::from(byte), &public_key.e, &public_key.n)
}

/// Encrypt a string using RSA public key.
///
/// Output is one zero-padded decimal chunk per base64 byte, each as wide
/// as the modulus has digits. Every base64 byte must be below `n`.
pub fn encrypt(message: &str, public_key: &RsaPublicKey) -> Result<String> {
    let bytes = to_base64_bytes(message);
    if let Some(&largest) = bytes.iter().max() {
        if BigInt::from(largest) >= public_key.n {
            return Err(CryptoError::ModulusTooSmall);
        }
    }

    let width = decimal_width(&public_key.n);

    let mut ciphertext = String::with_capacity(bytes.len() * width);
    for byte in bytes {
        let c = encrypt_byte(byte, public_key);
        ciphertext.push_str(&zero_fill(&c, width));
    }

    Ok(ciphertext)
}
