// Configuration for prime, RSA and Diffie-Hellman generation
// Named constants plus parameter structs with builder-style setters

/// Bit length of generated primes when none is given
pub const DEFAULT_PRIME_BITS: u64 = 1024;

/// Smallest bit length whose sampling range is non-empty
pub const MIN_PRIME_BITS: u64 = 3;

/// Smallest prime width for RSA; 3 bits holds a single prime, so p == q forever
pub const MIN_RSA_PRIME_BITS: u64 = 4;

/// Miller-Rabin rounds a candidate must survive
pub const MILLER_RABIN_ROUNDS: u32 = 20;

/// Upper bound of the rank of the chosen public exponent among valid candidates
pub const MAX_NTH_E_CANDIDATE: u64 = 20;

/// Upper bound (inclusive) of a Diffie-Hellman private value
pub const MAX_PRIVATE_VALUE: u64 = 1000;

/// Configuration for large prime generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeConfig {
    pub bits: u64,
    pub rounds: u32,
    /// `None` keeps sampling until a prime is found
    pub max_attempts: Option<u64>,
}

impl Default for PrimeConfig {
    fn default() -> Self {
        Self {
            bits: DEFAULT_PRIME_BITS,
            rounds: MILLER_RABIN_ROUNDS,
            max_attempts: None,
        }
    }
}

impl PrimeConfig {
    pub fn with_bits(mut self, bits: u64) -> Self {
        self.bits = bits;
        self
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u64) -> Self {
        self.max_attempts = Some(attempts);
        self
    }
}

/// Configuration for RSA key generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaConfig {
    pub prime: PrimeConfig,
    pub max_nth_candidate: u64,
    /// Cap on the exponent scan and on the `d` search. `None` means unbounded.
    pub max_search_steps: Option<u64>,
}

impl Default for RsaConfig {
    fn default() -> Self {
        Self {
            prime: PrimeConfig::default(),
            max_nth_candidate: MAX_NTH_E_CANDIDATE,
            max_search_steps: None,
        }
    }
}

impl RsaConfig {
    pub fn with_prime_bits(mut self, bits: u64) -> Self {
        self.prime.bits = bits;
        self
    }

    pub fn with_prime_config(mut self, prime: PrimeConfig) -> Self {
        self.prime = prime;
        self
    }

    pub fn with_max_nth_candidate(mut self, nth: u64) -> Self {
        self.max_nth_candidate = nth;
        self
    }

    pub fn with_max_search_steps(mut self, steps: u64) -> Self {
        self.max_search_steps = Some(steps);
        self
    }
}

/// Configuration for Diffie-Hellman parameters and contributions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DhConfig {
    pub prime: PrimeConfig,
    pub max_private_value: u64,
}

impl Default for DhConfig {
    fn default() -> Self {
        Self {
            prime: PrimeConfig::default(),
            max_private_value: MAX_PRIVATE_VALUE,
        }
    }
}

impl DhConfig {
    pub fn with_prime_bits(mut self, bits: u64) -> Self {
        self.prime.bits = bits;
        self
    }

    pub fn with_max_private_value(mut self, max: u64) -> Self {
        self.max_private_value = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let rsa = RsaConfig::default();
        assert_eq!(rsa.prime.bits, 1024);
        assert_eq!(rsa.prime.rounds, 20);
        assert_eq!(rsa.max_nth_candidate, 20);
        assert!(rsa.prime.max_attempts.is_none());
        assert!(rsa.max_search_steps.is_none());

        assert_eq!(DhConfig::default().max_private_value, 1000);
    }

    #[test]
    fn test_builders() {
        let config = RsaConfig::default()
            .with_prime_bits(64)
            .with_max_nth_candidate(3)
            .with_max_search_steps(10);
        assert_eq!(config.prime.bits, 64);
        assert_eq!(config.max_nth_candidate, 3);
        assert_eq!(config.max_search_steps, Some(10));

        let prime = PrimeConfig::default().with_rounds(5).with_max_attempts(7);
        assert_eq!(prime.rounds, 5);
        assert_eq!(prime.max_attempts, Some(7));
    }
}
