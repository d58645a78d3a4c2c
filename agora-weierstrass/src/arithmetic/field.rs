use super::modular::Modular;
use crate::{CurveError, Result};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use std::fmt;

/// Arithmetic over `GF(p)` for an odd prime `p`.
///
/// Primality of the modulus is the caller's responsibility; only the shape
/// of the modulus (odd, at least 3) is checked on construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeField {
    prime: BigInt,
}

impl Modular for PrimeField {
    fn modulus(&self) -> &BigInt {
        &self.prime
    }
}

impl fmt::Display for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GF(0x{:x})", self.prime)
    }
}

impl PrimeField {
    pub fn new(prime: BigInt) -> Result<Self> {
        if prime < BigInt::from(3) || prime.is_even() {
            return Err(CurveError::InvalidParameter(format!(
                "field modulus must be an odd prime, got {}",
                prime
            )));
        }
        Ok(Self { prime })
    }

    pub fn prime(&self) -> &BigInt {
        &self.prime
    }

    /// Whether `element` is already a canonical representative in `[0, p)`.
    pub fn includes(&self, element: &BigInt) -> bool {
        !element.is_negative() && element < &self.prime
    }

    pub fn inverse(&self, number: &BigInt) -> Result<BigInt> {
        let reduced = self.reduce(number);
        if reduced.is_zero() {
            return Err(CurveError::NotInvertible(number.clone()));
        }
        let egcd = reduced.extended_gcd(&self.prime);
        // only reachable when the modulus is not actually prime
        if !egcd.gcd.is_one() {
            return Err(CurveError::NotInvertible(number.clone()));
        }
        Ok(self.reduce(&egcd.x))
    }

    /// `base^exponent mod p`; a negative exponent raises the inverse of `base`.
    pub fn power(&self, base: &BigInt, exponent: &BigInt) -> Result<BigInt> {
        if exponent.is_negative() {
            let inverse = self.inverse(base)?;
            Ok(inverse.modpow(&-exponent, &self.prime))
        } else {
            Ok(self.reduce(base).modpow(exponent, &self.prime))
        }
    }

    /// All `y` with `y^2 = number (mod p)`, in ascending order.
    ///
    /// Only primes with `p = 3 (mod 4)` are supported, where a candidate root
    /// is `number^((p + 1) / 4)`. Other primes fail with
    /// [`CurveError::UnsupportedField`].
    pub fn square_roots(&self, number: &BigInt) -> Result<Vec<BigInt>> {
        if &self.prime % 4u32 != BigInt::from(3) {
            return Err(CurveError::UnsupportedField(self.prime.clone()));
        }

        let number = self.reduce(number);
        if number.is_zero() {
            return Ok(vec![BigInt::zero()]);
        }

        let exponent = (&self.prime + 1u32) / 4u32;
        let root = number.modpow(&exponent, &self.prime);
        if self.square(&root) != number {
            return Ok(Vec::new());
        }

        let other = &self.prime - &root;
        if root < other {
            Ok(vec![root, other])
        } else {
            Ok(vec![other, root])
        }
    }
}
