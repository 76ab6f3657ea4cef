// RSA Module - Main module file
// Exports key generation and the text codec

pub mod decrypt;
pub mod encoding;
pub mod encrypt;
pub mod keygen;

pub use decrypt::decrypt;
pub use encrypt::{encrypt, encrypt_byte};
pub use keygen::{
    derive_keypair, derive_private_exponent, generate_keys, select_exponent, RsaKeyPair,
    RsaPrivateKey, RsaPublicKey,
};
