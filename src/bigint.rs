// Big Integer Operations
// Modular arithmetic and sampling helpers over num-bigint shared by RSA and DH

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;

/// Big integer type used throughout the crate
pub type BigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> BigInt {
    BigInt::from(n)
}

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply algorithm
pub fn mod_pow(base: &BigInt, exp: &BigInt, modulus: &BigInt) -> BigInt {
    if modulus.is_one() {
        return BigInt::zero();
    }

    let mut result = BigInt::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Greatest common divisor by Euclid's algorithm
pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    let mut a = a.clone();
    let mut b = b.clone();
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

/// Number of decimal digits of `n`; zero has none
pub fn decimal_width(n: &BigInt) -> usize {
    if n.is_zero() {
        return 0;
    }
    n.to_str_radix(10).len()
}

/// Render `n` in decimal, left-padded with zeros to `width` digits
pub fn zero_fill(n: &BigInt, width: usize) -> String {
    let digits = if n.is_zero() {
        String::new()
    } else {
        n.to_str_radix(10)
    };
    format!("{:0>width$}", digits, width = width)
}

/// Uniform sample in the half-open range [low, high)
/// Caller guarantees low < high
pub fn random_below<R: Rng + ?Sized>(rng: &mut R, low: &BigInt, high: &BigInt) -> BigInt {
    rng.gen_biguint_range(low, high)
}

/// Uniform sample in the closed range [low, high]
pub fn random_inclusive<R: Rng + ?Sized>(rng: &mut R, low: &BigInt, high: &BigInt) -> BigInt {
    let upper = high + 1u8;
    rng.gen_biguint_range(low, &upper)
}
