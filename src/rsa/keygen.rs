// RSA Key Generation
// Derives public and private exponents from two generated primes

use std::fmt;

use log::{debug, info, warn};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;

use crate::bigint::{decimal_width, from_u64, gcd, BigInt};
use crate::config::{RsaConfig, MIN_RSA_PRIME_BITS};
use crate::error::{CryptoError, Result};
use crate::prime::generate_prime;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub e: BigInt, // Public exponent
    pub n: BigInt, // Modulus
}

/// RSA Private Key
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub d: BigInt, // Private exponent
    pub n: BigInt, // Modulus (same as public)
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
    pub bit_length: u64,
}

impl RsaPublicKey {
    /// Digits per ciphertext chunk
    pub fn width(&self) -> usize {
        decimal_width(&self.n)
    }

    /// Encrypt a message using this public key
    pub fn encrypt(&self, message: &str) -> Result<String> {
        super::encrypt::encrypt(message, self)
    }
}

impl RsaPrivateKey {
    /// Digits per ciphertext chunk
    pub fn width(&self) -> usize {
        decimal_width(&self.n)
    }

    /// Decrypt a ciphertext using this private key
    pub fn decrypt(&self, ciphertext: &str) -> Result<String> {
        super::decrypt::decrypt(ciphertext, self)
    }
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("d", &"<redacted>")
            .field("n", &self.n)
            .finish()
    }
}

impl RsaKeyPair {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.bit_length
    }
}

fn check_budget(steps: u64, max_steps: Option<u64>) -> Result<()> {
    match max_steps {
        Some(max) if steps >= max => {
            warn!("Exponent search exhausted after {} steps", steps);
            Err(CryptoError::ExponentSearchExhausted { steps })
        }
        _ => Ok(()),
    }
}

/// Pick the `nth` (1-based) valid public exponent scanning upward from 2.
///
/// A candidate is valid when it does not divide `n` and is coprime to `phi`.
pub fn select_exponent(
    phi: &BigInt,
    n: &BigInt,
    nth: u64,
    max_steps: Option<u64>,
) -> Result<BigInt> {
    if nth == 0 {
        return Err(CryptoError::InvalidParameter(
            "exponent rank starts at 1".to_string(),
        ));
    }

    let mut candidate = from_u64(2);
    let mut remaining = nth;
    let mut steps = 0u64;

    loop {
        check_budget(steps, max_steps)?;
        steps += 1;

        if !(n % &candidate).is_zero() && gcd(phi, &candidate).is_one() {
            remaining -= 1;
            if remaining == 0 {
                debug!("Selected e = {} (rank {}) after {} candidates", candidate, nth, steps);
                return Ok(candidate);
            }
        }

        candidate += 1u8;
    }
}

/// Find `d` with `d * e ≡ 1 (mod phi)`.
///
/// Searches k = 2, 3, ... for the first `phi * k + 1` divisible by `e`,
/// with exact integer division.
pub fn derive_private_exponent(
    e: &BigInt,
    phi: &BigInt,
    max_steps: Option<u64>,
) -> Result<BigInt> {
    if e.is_zero() || !gcd(e, phi).is_one() {
        return Err(CryptoError::InvalidParameter(format!(
            "e={} has no inverse modulo phi",
            e
        )));
    }

    let mut k = from_u64(2);
    let mut steps = 0u64;

    loop {
        check_budget(steps, max_steps)?;
        steps += 1;

        let (d, remainder) = (phi * &k + 1u8).div_rem(e);
        if remainder.is_zero() {
            debug!("Derived d at k = {}", k);
            return Ok(d);
        }

        k += 1u8;
    }
}

/// Build a key pair from two known primes, choosing the `nth` valid exponent
pub fn derive_keypair(
    p: &BigInt,
    q: &BigInt,
    nth: u64,
    max_steps: Option<u64>,
) -> Result<RsaKeyPair> {
    let two = from_u64(2);
    if p < &two || q < &two {
        return Err(CryptoError::InvalidParameter(
            "primes must be at least 2".to_string(),
        ));
    }
    if p == q {
        return Err(CryptoError::InvalidParameter(
            "p and q must be distinct".to_string(),
        ));
    }

    // Step 1: n = p * q, phi = (p-1)(q-1)
    let n = p * q;
    let phi = (p - 1u8) * (q - 1u8);

    // Step 2: choose e
    let e = select_exponent(&phi, &n, nth, max_steps)?;

    // Step 3: d = e^(-1) mod phi
    let d = derive_private_exponent(&e, &phi, max_steps)?;

    let bit_length = n.bits();

    Ok(RsaKeyPair {
        public_key: RsaPublicKey { e, n: n.clone() },
        private_key: RsaPrivateKey { d, n },
        bit_length,
    })
}

/// Generate an RSA key pair from two fresh primes of `config.prime.bits` bits.
///
/// The public exponent is the k-th valid candidate, k uniform in
/// [1, config.max_nth_candidate]. Redraws of q when it equals p count
/// against `config.prime.max_attempts`.
pub fn generate_keys<R: Rng + ?Sized>(rng: &mut R, config: &RsaConfig) -> Result<RsaKeyPair> {
    if config.max_nth_candidate == 0 {
        return Err(CryptoError::InvalidParameter(
            "max_nth_candidate must be at least 1".to_string(),
        ));
    }

    let bits = config.prime.bits;
    if bits < MIN_RSA_PRIME_BITS {
        return Err(CryptoError::InvalidBitLength {
            bits,
            min: MIN_RSA_PRIME_BITS,
        });
    }

    let p = generate_prime(rng, &config.prime)?;
    let mut q = generate_prime(rng, &config.prime)?;
    let mut redraws = 0u64;
    while q == p {
        if let Some(max) = config.prime.max_attempts {
            if redraws >= max {
                warn!("Gave up redrawing q after {} draws equal to p", redraws);
                return Err(CryptoError::PrimeGenerationExhausted {
                    bits,
                    attempts: redraws,
                });
            }
        }
        redraws += 1;

        debug!("Drew the same prime twice, drawing q again");
        q = generate_prime(rng, &config.prime)?;
    }

    let nth = rng.gen_range(1..=config.max_nth_candidate);
    let keypair = derive_keypair(&p, &q, nth, config.max_search_steps)?;

    info!(
        "Generated RSA key pair: {}-bit modulus, e = {}",
        keypair.bit_length, keypair.public_key.e
    );

    Ok(keypair)
}
