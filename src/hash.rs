// SHA-256 helpers
// Thin wrapper around sha2, hex-encoded

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the UTF-8 bytes of `message`
pub fn digest(message: &str) -> String {
    hex::encode(Sha256::digest(message.as_bytes()))
}

/// Whether `expected` is the digest of `message`
pub fn verify(message: &str, expected: &str) -> bool {
    digest(message) == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_known_values() {
        assert_eq!(
            digest(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_verify() {
        let hash = digest("Exemplo de mensagem");
        assert!(verify("Exemplo de mensagem", &hash));
        assert!(!verify("Mensagem diferente", &hash));
        assert!(!verify("Exemplo de mensagem", &hash.to_uppercase()));
    }
}
