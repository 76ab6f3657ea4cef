// Diffie-Hellman Key Exchange
// Two parties agree on a shared secret over generated (alpha, p)
//
// Private values are drawn from a deliberately small range and are not
// a security recommendation.

use std::fmt;

use log::info;
use rand::Rng;

use crate::bigint::{from_u64, mod_pow, random_inclusive, BigInt};
use crate::config::DhConfig;
use crate::error::{CryptoError, Result};
use crate::prime::generate_prime;

/// Public exchange parameters: generator `alpha` and prime modulus `p`,
/// plus the upper bound each party draws its private value below
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhParameters {
    pub alpha: BigInt,
    pub p: BigInt,
    pub max_private_value: u64,
}

/// One party's private value and the public value it sends
#[derive(Clone, PartialEq, Eq)]
pub struct DhContribution {
    pub private_value: BigInt,
    pub public_value: BigInt,
}

impl fmt::Debug for DhContribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DhContribution")
            .field("private_value", &"<redacted>")
            .field("public_value", &self.public_value)
            .finish()
    }
}

impl DhParameters {
    /// Generate alpha and p as two independent primes of `config.prime.bits` bits
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, config: &DhConfig) -> Result<Self> {
        let alpha = generate_prime(rng, &config.prime)?;
        let p = generate_prime(rng, &config.prime)?;

        info!("Generated Diffie-Hellman parameters over a {}-bit modulus", p.bits());

        Ok(Self {
            alpha,
            p,
            max_private_value: config.max_private_value,
        })
    }

    /// Shorthand for `generate_contribution` with these parameters
    pub fn contribute<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<DhContribution> {
        generate_contribution(rng, &self.alpha, &self.p, self.max_private_value)
    }
}

fn compute_public_value(alpha: &BigInt, private_value: &BigInt, p: &BigInt) -> BigInt {
    mod_pow(alpha, private_value, p)
}

/// Sample a private value in [2, max_private_value] and compute alpha^private mod p
pub fn generate_contribution<R: Rng + ?Sized>(
    rng: &mut R,
    alpha: &BigInt,
    p: &BigInt,
    max_private_value: u64,
) -> Result<DhContribution> {
    if max_private_value < 2 {
        return Err(CryptoError::InvalidParameter(format!(
            "max private value {} is below 2",
            max_private_value
        )));
    }
    if p < &from_u64(2) {
        return Err(CryptoError::InvalidParameter(
            "modulus must be at least 2".to_string(),
        ));
    }

    let private_value = random_inclusive(rng, &from_u64(2), &from_u64(max_private_value));
    let public_value = compute_public_value(alpha, &private_value, p);

    Ok(DhContribution {
        private_value,
        public_value,
    })
}

/// The shared secret: received_public^own_private mod p
pub fn compute_shared_secret(
    received_public: &BigInt,
    own_private: &BigInt,
    p: &BigInt,
) -> BigInt {
    mod_pow(received_public, own_private, p)
}
