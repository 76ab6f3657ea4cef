// Large Prime Generation
// Random candidates filtered by small-prime trial division, then Miller-Rabin

use log::{debug, warn};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;

use crate::bigint::{mod_pow, random_below, BigInt};
use crate::config::{PrimeConfig, MIN_PRIME_BITS};
use crate::error::{CryptoError, Result};

/// The first 70 primes, used to sieve candidates before Miller-Rabin
pub const SMALL_PRIMES: [u32; 70] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293,
    307, 311, 313, 317, 331, 337, 347, 349,
];

/// Trial division by `SMALL_PRIMES`.
///
/// A divisor only condemns the candidate when its square does not exceed
/// it, so the small primes themselves survive.
pub fn passes_small_prime_sieve(candidate: &BigInt) -> bool {
    SMALL_PRIMES.iter().all(|&p| {
        let square = BigInt::from(u64::from(p) * u64::from(p));
        !((candidate % p).is_zero() && square <= *candidate)
    })
}

/// Draws random candidates of an exact bit length that survive the sieve
pub struct CandidateSampler {
    bits: u64,
    /// 2^(bits-1) + 1
    low: BigInt,
    /// 2^bits - 1, excluded
    high: BigInt,
    attempts: u64,
    max_attempts: Option<u64>,
}

impl CandidateSampler {
    pub fn new(bits: u64, max_attempts: Option<u64>) -> Result<Self> {
        if bits < MIN_PRIME_BITS {
            return Err(CryptoError::InvalidBitLength {
                bits,
                min: MIN_PRIME_BITS,
            });
        }

        let low = (BigInt::one() << (bits - 1)) + 1u8;
        let high = (BigInt::one() << bits) - 1u8;

        Ok(Self {
            bits,
            low,
            high,
            attempts: 0,
            max_attempts,
        })
    }

    /// Number of random values drawn so far
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Sample until a value passes the small-prime sieve.
    ///
    /// Every draw counts against `max_attempts`, sieved out or not.
    pub fn next_candidate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<BigInt> {
        loop {
            if let Some(max) = self.max_attempts {
                if self.attempts >= max {
                    warn!(
                        "Prime search for {} bits exhausted after {} candidates",
                        self.bits, self.attempts
                    );
                    return Err(CryptoError::PrimeGenerationExhausted {
                        bits: self.bits,
                        attempts: self.attempts,
                    });
                }
            }
            self.attempts += 1;

            let candidate = random_below(rng, &self.low, &self.high);
            if passes_small_prime_sieve(&candidate) {
                return Ok(candidate);
            }
        }
    }
}

/// Miller-Rabin with `rounds` random witnesses drawn from [2, candidate - 1).
///
/// `candidate` must be odd and at least 5.
fn miller_rabin<R: Rng + ?Sized>(candidate: &BigInt, rounds: u32, rng: &mut R) -> bool {
    let one = BigInt::one();
    let two = BigInt::from(2u8);
    let minus_one = candidate - 1u8;

    // Write candidate - 1 as 2^s * d with d odd
    let s = minus_one.trailing_zeros().unwrap_or(0);
    let d = &minus_one >> s;

    'witness: for _ in 0..rounds {
        let witness = random_below(rng, &two, &minus_one);
        let mut x = mod_pow(&witness, &d, candidate);

        if x == one {
            continue;
        }

        // x walks through witness^(2^i * d) for i in [0, s)
        for _ in 0..s {
            if x == minus_one {
                continue 'witness;
            }
            x = (&x * &x) % candidate;
        }

        // Composite
        return false;
    }

    true
}

/// Probabilistic primality check for any value
pub fn is_probable_prime<R: Rng + ?Sized>(n: &BigInt, rounds: u32, rng: &mut R) -> bool {
    if n < &BigInt::from(2u8) {
        return false;
    }
    if n == &BigInt::from(2u8) || n == &BigInt::from(3u8) {
        return true;
    }
    if n.is_even() {
        return false;
    }

    miller_rabin(n, rounds, rng)
}

/// Generate a probable prime of exactly `config.bits` bits.
///
/// With no `max_attempts` this keeps drawing until it succeeds.
pub fn generate_prime<R: Rng + ?Sized>(rng: &mut R, config: &PrimeConfig) -> Result<BigInt> {
    if config.rounds == 0 {
        return Err(CryptoError::InvalidParameter(
            "Miller-Rabin needs at least one round".to_string(),
        ));
    }

    let mut sampler = CandidateSampler::new(config.bits, config.max_attempts)?;
    let mut tested = 0u64;

    loop {
        let candidate = sampler.next_candidate(rng)?;
        tested += 1;

        if miller_rabin(&candidate, config.rounds, rng) {
            debug!(
                "Found {}-bit prime after {} draws ({} reached Miller-Rabin)",
                config.bits,
                sampler.attempts(),
                tested
            );
            return Ok(candidate);
        }
    }
}
