//! Demonstration-grade public-key primitives.
//!
//! Probabilistic large prime generation (trial division + Miller-Rabin),
//! textbook RSA with a per-byte fixed-width decimal codec, and
//! Diffie-Hellman over a generated prime modulus. There is no padding
//! scheme and no constant-time arithmetic; do not use this to protect
//! real data.
//!
//! Every function that samples randomness takes the generator as an
//! argument, so a seeded `rand::rngs::StdRng` makes runs reproducible.

pub mod bigint;
pub mod config;
pub mod dh;
pub mod error;
pub mod hash;
pub mod prime;
pub mod rsa;

pub use bigint::BigInt;
pub use config::{DhConfig, PrimeConfig, RsaConfig};
pub use dh::{compute_shared_secret, generate_contribution, DhContribution, DhParameters};
pub use error::{CryptoError, Result};
pub use prime::{generate_prime, is_probable_prime};
pub use rsa::{decrypt, encrypt, generate_keys, RsaKeyPair, RsaPrivateKey, RsaPublicKey};
