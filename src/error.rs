// Error types
// One error enum shared by prime generation, RSA and Diffie-Hellman

use thiserror::Error;

/// Errors produced by the primitives in this crate
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("bit length {bits} is too small, need at least {min}")]
    InvalidBitLength { bits: u64, min: u64 },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("no {bits}-bit prime found after {attempts} candidates")]
    PrimeGenerationExhausted { bits: u64, attempts: u64 },

    #[error("exponent search gave up after {steps} steps")]
    ExponentSearchExhausted { steps: u64 },

    #[error("modulus must exceed every encoded byte value")]
    ModulusTooSmall,

    #[error("malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    #[error("payload decoding failed: {0}")]
    PayloadDecodingError(String),
}

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, CryptoError>;
