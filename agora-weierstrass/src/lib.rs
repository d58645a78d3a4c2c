//#![deny(warnings)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::all)]

//! Short-Weierstrass elliptic curve groups over prime fields.
//!
//! A [`Group`] ties a [`PrimeField`], the curve coefficients of
//! `y^2 = x^3 + a*x + b (mod p)`, a generator and its order together. Points
//! are created through the group and borrow it for their whole lifetime, so
//! arithmetic between points of two distinct groups is detected by reference
//! identity rather than by comparing parameters.
//!
//! ```
//! use agora_weierstrass::{Group, GroupConfig, PointSpec};
//! use num_bigint::BigInt;
//!
//! let group = Group::new(GroupConfig {
//!     p: BigInt::from(23),
//!     a: BigInt::from(1),
//!     b: BigInt::from(1),
//!     g: PointSpec::Coordinates(BigInt::from(3), BigInt::from(10)),
//!     n: BigInt::from(28),
//!     h: None,
//!     name: Some("toy".to_string()),
//! })
//! .unwrap();
//!
//! let point = group.new_point(PointSpec::Scalar(BigInt::from(5))).unwrap();
//! assert!(group.is_valid_public_key(&point));
//! ```

pub mod arithmetic;
pub mod curve;
mod group;
pub mod parse;

pub use arithmetic::{Modular, Point, PrimeField};
pub use curve::NamedCurve;
pub use group::{Group, GroupConfig, PointSpec};

use num_bigint::BigInt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("{0} has no multiplicative inverse")]
    NotInvertible(BigInt),
    #[error("square roots require a prime congruent to 3 mod 4, got {0}")]
    UnsupportedField(BigInt),
    #[error("points belong to different groups: {lhs} and {rhs}")]
    MismatchedGroup { lhs: String, rhs: String },
}

pub type Result<T> = std::result::Result<T, CurveError>;
