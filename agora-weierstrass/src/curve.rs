//! Standard SEC 2 curves whose field prime is congruent to 3 mod 4.

use crate::group::{Group, GroupConfig, PointSpec};
use crate::CurveError;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

struct CurveParams {
    name: &'static str,
    p: &'static str,
    a: &'static str,
    b: &'static str,
    gx: &'static str,
    gy: &'static str,
    n: &'static str,
    h: u32,
}

const SECP160R1: CurveParams = CurveParams {
    name: "secp160r1",
    p: "ffffffffffffffffffffffffffffffff7fffffff",
    a: "ffffffffffffffffffffffffffffffff7ffffffc",
    b: "1c97befc54bd7a8b65acf89f81d4d4adc565fa45",
    gx: "4a96b5688ef573284664698968c38bb913cbfc82",
    gy: "23a628553168947d59dcc912042351377ac5fb32",
    n: "0100000000000000000001f4c8f927aed3ca752257",
    h: 1,
};

const SECP192R1: CurveParams = CurveParams {
    name: "secp192r1",
    p: "fffffffffffffffffffffffffffffffeffffffffffffffff",
    a: "fffffffffffffffffffffffffffffffefffffffffffffffc",
    b: "64210519e59c80e70fa7e9ab72243049feb8deecc146b9b1",
    gx: "188da80eb03090f67cbf20eb43a18800f4ff0afd82ff1012",
    gy: "07192b95ffc8da78631011ed6b24cdd573f977a11e794811",
    n: "ffffffffffffffffffffffff99def836146bc9b1b4d22831",
    h: 1,
};

const SECP256K1: CurveParams = CurveParams {
    name: "secp256k1",
    p: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
    a: "0",
    b: "7",
    gx: "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
    gy: "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
    n: "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
    h: 1,
};

const SECP256R1: CurveParams = CurveParams {
    name: "secp256r1",
    p: "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
    a: "ffffffff00000001000000000000000000000000fffffffffffffffffffffffc",
    b: "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b",
    gx: "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296",
    gy: "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5",
    n: "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
    h: 1,
};

const SECP384R1: CurveParams = CurveParams {
    name: "secp384r1",
    p: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff0000000000000000ffffffff",
    a: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff0000000000000000fffffffc",
    b: "b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875ac656398d8a2ed19d2a85c8edd3ec2aef",
    gx: "aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a385502f25dbf55296c3a545e3872760ab7",
    gy: "3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c00a60b1ce1d7e819d7a431d7c90ea0e5f",
    n: "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf581a0db248b0a77aecec196accc52973",
    h: 1,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedCurve {
    Secp160r1,
    Secp192r1,
    Secp256k1,
    Secp256r1,
    Secp384r1,
}

impl NamedCurve {
    pub const ALL: [NamedCurve; 5] = [
        NamedCurve::Secp160r1,
        NamedCurve::Secp192r1,
        NamedCurve::Secp256k1,
        NamedCurve::Secp256r1,
        NamedCurve::Secp384r1,
    ];

    fn params(self) -> &'static CurveParams {
        match self {
            NamedCurve::Secp160r1 => &SECP160R1,
            NamedCurve::Secp192r1 => &SECP192R1,
            NamedCurve::Secp256k1 => &SECP256K1,
            NamedCurve::Secp256r1 => &SECP256R1,
            NamedCurve::Secp384r1 => &SECP384R1,
        }
    }

    pub fn name(self) -> &'static str {
        self.params().name
    }

    pub fn config(self) -> GroupConfig {
        let params = self.params();
        GroupConfig {
            p: from_hex(params.p),
            a: from_hex(params.a),
            b: from_hex(params.b),
            g: PointSpec::Coordinates(from_hex(params.gx), from_hex(params.gy)),
            n: from_hex(params.n),
            h: Some(BigInt::from(params.h)),
            name: Some(params.name.to_string()),
        }
    }

    /// The process-wide instance of this curve's group.
    ///
    /// Every call returns the same `Group`, so points obtained from separate
    /// lookups can be combined.
    pub fn group(self) -> &'static Group {
        static GROUPS: [OnceLock<Group>; 5] = [
            OnceLock::new(),
            OnceLock::new(),
            OnceLock::new(),
            OnceLock::new(),
            OnceLock::new(),
        ];
        let slot = match self {
            NamedCurve::Secp160r1 => &GROUPS[0],
            NamedCurve::Secp192r1 => &GROUPS[1],
            NamedCurve::Secp256k1 => &GROUPS[2],
            NamedCurve::Secp256r1 => &GROUPS[3],
            NamedCurve::Secp384r1 => &GROUPS[4],
        };
        // NOTE unwrap is fine here because the tabulated parameters are
        // odd primes with positive orders, which is all `Group::new` checks
        slot.get_or_init(|| Group::new(self.config()).unwrap())
    }
}

impl fmt::Display for NamedCurve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedCurve {
    type Err = CurveError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        NamedCurve::ALL
            .into_iter()
            .find(|curve| curve.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CurveError::InvalidParameter(format!("unknown curve {}", name)))
    }
}

fn from_hex(digits: &str) -> BigInt {
    // NOTE unwrap is fine here because the table only holds valid hex digits
    BigInt::parse_bytes(digits.as_bytes(), 16).unwrap()
}
