use super::modular::Modular;
use crate::group::Group;
use crate::{CurveError, Result};

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use std::fmt;

/// An affine point, or the point at infinity, on the curve of one [`Group`].
///
/// Coordinates are reduced into the field when the point is built but curve
/// membership is not checked; use [`Group::includes`] or the public key
/// predicates for that.
#[derive(Clone)]
pub struct Point<'g> {
    group: &'g Group,
    coords: Option<(BigInt, BigInt)>,
}

impl<'g> PartialEq<Point<'_>> for Point<'g> {
    fn eq(&self, other: &Point<'_>) -> bool {
        std::ptr::eq(self.group, other.group) && self.coords == other.coords
    }
}

impl Eq for Point<'_> {}

impl fmt::Display for Point<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.coords {
            Some((x, y)) => write!(f, "Point({}, (0x{:x}, 0x{:x}))", self.group.name(), x, y),
            None => write!(f, "Point({}, infinity)", self.group.name()),
        }
    }
}

impl fmt::Debug for Point<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Point")
            .field("group", &self.group.name())
            .field("coords", &self.coords)
            .finish()
    }
}

impl<'g> std::ops::Neg for Point<'g> {
    type Output = Point<'g>;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl<'g> std::ops::Neg for &Point<'g> {
    type Output = Point<'g>;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl<'g> Point<'g> {
    pub(crate) fn new(group: &'g Group, x: &BigInt, y: &BigInt) -> Self {
        let field = group.field();
        Self {
            group,
            coords: Some((field.reduce(x), field.reduce(y))),
        }
    }

    pub(crate) fn infinity(group: &'g Group) -> Self {
        Self {
            group,
            coords: None,
        }
    }

    pub fn group(&self) -> &'g Group {
        self.group
    }

    #[inline(always)]
    pub fn is_infinity(&self) -> bool {
        self.coords.is_none()
    }

    #[inline(always)]
    pub fn x(&self) -> Option<&BigInt> {
        self.coords.as_ref().map(|(x, _)| x)
    }

    #[inline(always)]
    pub fn y(&self) -> Option<&BigInt> {
        self.coords.as_ref().map(|(_, y)| y)
    }

    pub fn coords(&self) -> Option<(&BigInt, &BigInt)> {
        self.coords.as_ref().map(|(x, y)| (x, y))
    }

    fn ensure_same_group(&self, other: &Point<'_>) -> Result<()> {
        if std::ptr::eq(self.group, other.group) {
            Ok(())
        } else {
            Err(CurveError::MismatchedGroup {
                lhs: self.group.name().to_string(),
                rhs: other.group.name().to_string(),
            })
        }
    }

    // `other` is known to share our group, so it can be rebound to our lifetime
    fn rebind(&self, other: &Point<'_>) -> Point<'g> {
        Point {
            group: self.group,
            coords: other.coords.clone(),
        }
    }

    pub fn negate(&self) -> Point<'g> {
        match &self.coords {
            Some((x, y)) => Point {
                group: self.group,
                coords: Some((x.clone(), self.group.field().negate(y))),
            },
            None => self.clone(),
        }
    }

    pub fn add(&self, other: &Point<'_>) -> Result<Point<'g>> {
        self.ensure_same_group(other)?;

        let (x1, y1) = match &self.coords {
            Some((x, y)) => (x, y),
            None => return Ok(self.rebind(other)),
        };
        let (x2, y2) = match &other.coords {
            Some((x, y)) => (x, y),
            None => return Ok(self.clone()),
        };

        let field = self.group.field();
        if x1 == x2 {
            if field.add(y1, y2).is_zero() {
                return Ok(Point::infinity(self.group));
            }
            if y1 == y2 {
                return self.double();
            }
            // equal x with unrelated y only happens off the curve and falls
            // through to a zero denominator below
        }

        let numerator = field.subtract(y2, y1);
        let denominator = field.subtract(x2, x1);
        let slope = field.multiply(&numerator, &field.inverse(&denominator)?);

        let x3 = field.subtract(&field.subtract(&field.square(&slope), x1), x2);
        let y3 = field.subtract(&field.multiply(&slope, &field.subtract(x1, &x3)), y1);

        Ok(Point {
            group: self.group,
            coords: Some((x3, y3)),
        })
    }

    pub fn double(&self) -> Result<Point<'g>> {
        let (x, y) = match &self.coords {
            Some((x, y)) => (x, y),
            None => return Ok(self.clone()),
        };

        // vertical tangent
        if y.is_zero() {
            return Ok(Point::infinity(self.group));
        }

        let field = self.group.field();
        let three_x2 = field.multiply(&BigInt::from(3), &field.square(x));
        let numerator = field.add(&three_x2, self.group.param_a());
        let denominator = field.add(y, y);
        let slope = field.multiply(&numerator, &field.inverse(&denominator)?);

        let x3 = field.subtract(&field.square(&slope), &field.add(x, x));
        let y3 = field.subtract(&field.multiply(&slope, &field.subtract(x, &x3)), y);

        Ok(Point {
            group: self.group,
            coords: Some((x3, y3)),
        })
    }

    /// `k * self` by a left-to-right pass over the base 16 digits of `|k|`.
    ///
    /// The scalar is not reduced modulo the group order, so multiplying by
    /// the order is a meaningful check of the point's order.
    pub fn multiply_by_scalar(&self, scalar: &BigInt) -> Result<Point<'g>> {
        if scalar.is_negative() {
            return self.negate().multiply_by_scalar(&-scalar);
        }

        let lookup = self.lookup_table()?;
        let mut q = Point::infinity(self.group);
        for digit in hex_digits(scalar) {
            q = q.double()?.double()?.double()?.double()?;
            q = q.add(&lookup[digit as usize])?;
        }
        Ok(q)
    }

    /// `this_scalar * self + other_scalar * other` with a single shared
    /// doubling chain.
    pub fn double_mul(
        &self,
        this_scalar: &BigInt,
        other: &Point<'_>,
        other_scalar: &BigInt,
    ) -> Result<Point<'g>> {
        self.ensure_same_group(other)?;

        let this_point = if this_scalar.is_negative() {
            self.negate()
        } else {
            self.clone()
        };
        let other_point = if other_scalar.is_negative() {
            self.rebind(other).negate()
        } else {
            self.rebind(other)
        };

        let this_lookup = this_point.lookup_table()?;
        let other_lookup = other_point.lookup_table()?;

        let (this_digits, other_digits) =
            pad_to_equal_len(hex_digits(&this_scalar.abs()), hex_digits(&other_scalar.abs()));

        let mut q = Point::infinity(self.group);
        for (this_digit, other_digit) in this_digits.into_iter().zip(other_digits) {
            q = q.double()?.double()?.double()?.double()?;
            q = q.add(&this_lookup[this_digit as usize])?;
            q = q.add(&other_lookup[other_digit as usize])?;
        }
        Ok(q)
    }

    // [0 * self, 1 * self, ..., 15 * self]
    fn lookup_table(&self) -> Result<Vec<Point<'g>>> {
        let mut lookup = Vec::with_capacity(16);
        let mut current = Point::infinity(self.group);
        for _ in 0..15 {
            let next = current.add(self)?;
            lookup.push(current);
            current = next;
        }
        lookup.push(current);
        Ok(lookup)
    }
}

fn hex_digits(scalar: &BigInt) -> Vec<u8> {
    let (_, digits) = scalar.to_radix_be(16);
    digits
}

fn pad_to_equal_len(mut lhs: Vec<u8>, mut rhs: Vec<u8>) -> (Vec<u8>, Vec<u8>) {
    if lhs.len() < rhs.len() {
        let mut padded = vec![0; rhs.len() - lhs.len()];
        padded.append(&mut lhs);
        lhs = padded;
    } else if rhs.len() < lhs.len() {
        let mut padded = vec![0; lhs.len() - rhs.len()];
        padded.append(&mut rhs);
        rhs = padded;
    }
    (lhs, rhs)
}
