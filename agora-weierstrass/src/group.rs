use crate::arithmetic::{Modular, Point, PrimeField};
use crate::{CurveError, Result};

use num_bigint::BigInt;
use num_traits::Signed;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

static UNNAMED_GROUPS: AtomicU64 = AtomicU64::new(0);

/// The three ways of naming a point of a group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointSpec {
    Infinity,
    Coordinates(BigInt, BigInt),
    /// A multiple of the group generator.
    Scalar(BigInt),
}

impl From<(BigInt, BigInt)> for PointSpec {
    fn from((x, y): (BigInt, BigInt)) -> Self {
        Self::Coordinates(x, y)
    }
}

impl From<BigInt> for PointSpec {
    fn from(scalar: BigInt) -> Self {
        Self::Scalar(scalar)
    }
}

/// Parameters of `y^2 = x^3 + a*x + b (mod p)` together with a generator `g`
/// of order `n` and an optional cofactor `h`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupConfig {
    pub p: BigInt,
    pub a: BigInt,
    pub b: BigInt,
    pub g: PointSpec,
    pub n: BigInt,
    pub h: Option<BigInt>,
    pub name: Option<String>,
}

/// A short-Weierstrass curve group over a prime field.
///
/// Identity is referential: points only interoperate with points created by
/// the very same `Group` value, even if another group has identical
/// parameters. Share a group by reference (see [`crate::NamedCurve::group`])
/// when points from different call sites need to be combined.
///
/// Neither the primality of `p` and `n` nor the membership of the generator
/// is verified.
#[derive(Debug)]
pub struct Group {
    name: String,
    field: PrimeField,
    param_a: BigInt,
    param_b: BigInt,
    generator: Option<(BigInt, BigInt)>,
    order: BigInt,
    cofactor: Option<BigInt>,
    bit_length: OnceLock<u64>,
    byte_length: OnceLock<u64>,
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for Group {}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Group({})", self.name)
    }
}

impl Group {
    pub fn new(config: GroupConfig) -> Result<Self> {
        let field = PrimeField::new(config.p)?;

        if !config.n.is_positive() {
            return Err(CurveError::InvalidParameter(format!(
                "group order must be positive, got {}",
                config.n
            )));
        }

        let generator = match config.g {
            PointSpec::Infinity => None,
            PointSpec::Coordinates(x, y) => Some((field.reduce(&x), field.reduce(&y))),
            PointSpec::Scalar(_) => {
                return Err(CurveError::InvalidParameter(
                    "the generator cannot be given as a multiple of itself".to_string(),
                ))
            }
        };

        let name = config.name.unwrap_or_else(|| {
            format!("group-{}", UNNAMED_GROUPS.fetch_add(1, Ordering::Relaxed))
        });

        Ok(Self {
            name,
            param_a: field.reduce(&config.a),
            param_b: field.reduce(&config.b),
            field,
            generator,
            order: config.n,
            cofactor: config.h,
            bit_length: OnceLock::new(),
            byte_length: OnceLock::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    pub fn param_a(&self) -> &BigInt {
        &self.param_a
    }

    pub fn param_b(&self) -> &BigInt {
        &self.param_b
    }

    pub fn order(&self) -> &BigInt {
        &self.order
    }

    pub fn cofactor(&self) -> Option<&BigInt> {
        self.cofactor.as_ref()
    }

    pub fn generator(&self) -> Point<'_> {
        match &self.generator {
            Some((x, y)) => Point::new(self, x, y),
            None => self.infinity(),
        }
    }

    /// The point at infinity of this group.
    ///
    /// A fresh value is returned on every call. Points compare by group and
    /// coordinates, so all of them are equal, but they are not one shared
    /// object.
    pub fn infinity(&self) -> Point<'_> {
        Point::infinity(self)
    }

    /// Number of bits of the field prime.
    pub fn bit_length(&self) -> u64 {
        *self.bit_length.get_or_init(|| self.field.prime().bits())
    }

    /// Number of bytes needed to hold a field element.
    pub fn byte_length(&self) -> u64 {
        *self.byte_length.get_or_init(|| self.bit_length().div_ceil(8))
    }

    pub fn new_point(&self, spec: PointSpec) -> Result<Point<'_>> {
        match spec {
            PointSpec::Infinity => Ok(self.infinity()),
            PointSpec::Coordinates(x, y) => Ok(Point::new(self, &x, &y)),
            PointSpec::Scalar(k) => self.generator().multiply_by_scalar(&k),
        }
    }

    /// Whether `point` belongs to this group and satisfies the curve equation.
    pub fn includes(&self, point: &Point<'_>) -> bool {
        if !std::ptr::eq(point.group(), self) {
            return false;
        }
        match point.coords() {
            Some((x, y)) => self.satisfies_equation(x, y),
            None => true,
        }
    }

    /// Full public key validation (SEC 1, section 3.2.2.1).
    ///
    /// Rejects the point at infinity, points off the curve and points whose
    /// order does not divide the group order. This is the check to run on
    /// any externally supplied key.
    pub fn is_valid_public_key(&self, point: &Point<'_>) -> bool {
        if !self.is_partially_valid_public_key(point) {
            return false;
        }
        matches!(point.multiply_by_scalar(&self.order), Ok(q) if q.is_infinity())
    }

    /// Partial public key validation (SEC 1, section 3.2.3.1).
    ///
    /// Skips the order check of [`Group::is_valid_public_key`], so a point on
    /// the curve outside the generator's subgroup is accepted.
    pub fn is_partially_valid_public_key(&self, point: &Point<'_>) -> bool {
        !point.is_infinity() && self.includes(point)
    }

    /// The y coordinates that put `(x, y)` on the curve.
    pub fn solve_for_y(&self, x: &BigInt) -> Result<Vec<BigInt>> {
        self.field.square_roots(&self.equation_rhs(x))
    }

    // x^3 + a*x + b
    fn equation_rhs(&self, x: &BigInt) -> BigInt {
        let field = &self.field;
        let x3 = field.multiply(&field.square(x), x);
        let ax = field.multiply(&self.param_a, x);
        field.add(&field.add(&x3, &ax), &self.param_b)
    }

    fn satisfies_equation(&self, x: &BigInt, y: &BigInt) -> bool {
        self.field.square(y) == self.equation_rhs(x)
    }
}
