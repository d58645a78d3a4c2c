use num_bigint::BigInt;
use num_integer::Integer;

/// Residue arithmetic modulo a positive modulus known at runtime.
///
/// Every method accepts arbitrary (possibly negative or unreduced) integers
/// and returns a value in `[0, modulus)`.
pub trait Modular {
    fn modulus(&self) -> &BigInt;

    fn reduce(&self, number: &BigInt) -> BigInt {
        number.mod_floor(self.modulus())
    }

    fn add(&self, lhs: &BigInt, rhs: &BigInt) -> BigInt {
        self.reduce(&(lhs + rhs))
    }

    fn subtract(&self, lhs: &BigInt, rhs: &BigInt) -> BigInt {
        self.reduce(&(lhs - rhs))
    }

    fn negate(&self, number: &BigInt) -> BigInt {
        self.reduce(&-number)
    }

    fn multiply(&self, lhs: &BigInt, rhs: &BigInt) -> BigInt {
        mul_mod(lhs, rhs, self.modulus())
    }

    fn square(&self, number: &BigInt) -> BigInt {
        mul_mod(number, number, self.modulus())
    }
}

pub fn mul_mod(lhs: &BigInt, rhs: &BigInt, modulus: &BigInt) -> BigInt {
    (lhs * rhs).mod_floor(modulus)
}

#[cfg(test)]
mod test {
    use super::*;

    struct SmallModulus(BigInt);

    impl Modular for SmallModulus {
        fn modulus(&self) -> &BigInt {
            &self.0
        }
    }

    fn int(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn operations_with_small_modulus() {
        let m = SmallModulus(int(17));
        let a = int(15);
        let b = int(9);
        assert_eq!(m.add(&a, &b), int(7));
        assert_eq!(m.multiply(&a, &b), int(16));
        assert_eq!(m.subtract(&a, &b), int(6));
        assert_eq!(m.subtract(&b, &a), int(11));
        assert_eq!(m.negate(&a), int(2));
        assert_eq!(m.negate(&int(0)), int(0));
        assert_eq!(m.square(&a), int(4));
    }

    #[test]
    fn negative_and_oversized_inputs() {
        let m = SmallModulus(int(17));
        assert_eq!(m.reduce(&int(-1)), int(16));
        assert_eq!(m.reduce(&int(-35)), int(16));
        assert_eq!(m.reduce(&int(35)), int(1));
        assert_eq!(m.add(&int(-20), &int(2)), int(16));
        assert_eq!(m.multiply(&int(-3), &int(6)), int(16));
        assert_eq!(mul_mod(&int(100), &int(100), &int(17)), int(4));
    }
}
