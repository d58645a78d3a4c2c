//! Serde-facing curve descriptions and their conversion into [`GroupConfig`].
//!
//! Integers may be written as JSON numbers, decimal strings or `0x` prefixed
//! hex strings, so that full-size curve parameters survive a round trip
//! through formats without arbitrary-precision numbers.

use crate::group::{GroupConfig, PointSpec};
use crate::{CurveError, Result};

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntegerInput {
    Int(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl From<&BigInt> for IntegerInput {
    fn from(number: &BigInt) -> Self {
        if number < &BigInt::from(0) {
            Self::Text(format!("-0x{:x}", -number))
        } else {
            Self::Text(format!("0x{:x}", number))
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointInput {
    Coordinates([IntegerInput; 2]),
    /// Either `"infinity"` or a multiple of the generator.
    Single(IntegerInput),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveInput {
    pub p: IntegerInput,
    pub a: IntegerInput,
    pub b: IntegerInput,
    pub g: PointInput,
    pub n: IntegerInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<IntegerInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl TryFrom<PointInput> for PointSpec {
    type Error = CurveError;
    fn try_from(rhs: PointInput) -> Result<Self> {
        parse_point("point", rhs)
    }
}

impl TryFrom<CurveInput> for GroupConfig {
    type Error = CurveError;
    fn try_from(rhs: CurveInput) -> Result<Self> {
        Ok(Self {
            p: parse_integer("p", rhs.p)?,
            a: parse_integer("a", rhs.a)?,
            b: parse_integer("b", rhs.b)?,
            g: parse_point("g", rhs.g)?,
            n: parse_integer("n", rhs.n)?,
            h: rhs.h.map(|h| parse_integer("h", h)).transpose()?,
            name: rhs.name,
        })
    }
}

impl From<&GroupConfig> for CurveInput {
    fn from(config: &GroupConfig) -> Self {
        let g = match &config.g {
            PointSpec::Infinity => PointInput::Single(IntegerInput::Text("infinity".to_string())),
            PointSpec::Coordinates(x, y) => PointInput::Coordinates([x.into(), y.into()]),
            PointSpec::Scalar(k) => PointInput::Single(k.into()),
        };
        Self {
            p: (&config.p).into(),
            a: (&config.a).into(),
            b: (&config.b).into(),
            g,
            n: (&config.n).into(),
            h: config.h.as_ref().map(IntegerInput::from),
            name: config.name.clone(),
        }
    }
}

fn parse_point(field: &str, input: PointInput) -> Result<PointSpec> {
    match input {
        PointInput::Coordinates([x, y]) => Ok(PointSpec::Coordinates(
            parse_integer(field, x)?,
            parse_integer(field, y)?,
        )),
        PointInput::Single(IntegerInput::Text(text))
            if text.trim().eq_ignore_ascii_case("infinity") =>
        {
            Ok(PointSpec::Infinity)
        }
        PointInput::Single(scalar) => Ok(PointSpec::Scalar(parse_integer(field, scalar)?)),
    }
}

fn parse_integer(field: &str, input: IntegerInput) -> Result<BigInt> {
    match input {
        IntegerInput::Int(number) => Ok(BigInt::from(number)),
        IntegerInput::Unsigned(number) => Ok(BigInt::from(number)),
        // JSON numbers past 64 bits only reach us as lossy floats
        IntegerInput::Float(number)
            if number.is_finite() && number.abs() >= u64::MAX as f64 =>
        {
            Err(CurveError::InvalidParameter(format!(
                "{}: {:e} does not fit a JSON number, write it as a decimal or 0x string",
                field, number
            )))
        }
        IntegerInput::Float(number) => Err(CurveError::InvalidParameter(format!(
            "{}: {} is not an integer",
            field, number
        ))),
        IntegerInput::Text(text) => parse_str(&text).ok_or_else(|| {
            CurveError::InvalidParameter(format!("{}: {:?} is not an integer", field, text))
        }),
    }
}

fn parse_str(text: &str) -> Option<BigInt> {
    let text = text.trim();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };
    // NOTE this check keeps signs and separators out of `parse_bytes`
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let magnitude = BigInt::parse_bytes(digits.as_bytes(), radix)?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Group, NamedCurve};

    fn int(n: i64) -> BigInt {
        BigInt::from(n)
    }

    const TOY: &str = r#"{
        "p": 23,
        "a": "1",
        "b": "0x1",
        "g": [3, "0xa"],
        "n": "28",
        "name": "toy"
    }"#;

    #[test]
    fn parse_toy_curve() {
        let input: CurveInput = serde_json::from_str(TOY).unwrap();
        let config = GroupConfig::try_from(input).unwrap();
        assert_eq!(
            config,
            GroupConfig {
                p: int(23),
                a: int(1),
                b: int(1),
                g: PointSpec::Coordinates(int(3), int(10)),
                n: int(28),
                h: None,
                name: Some("toy".to_string()),
            }
        );
        let group = Group::new(config).unwrap();
        assert!(group.is_valid_public_key(&group.generator()));
    }

    #[test]
    fn integer_notations() {
        assert_eq!(parse_str("-0x1f"), Some(int(-31)));
        assert_eq!(parse_str("+42"), Some(int(42)));
        assert_eq!(parse_str(" 0XfF "), Some(int(255)));
        assert_eq!(parse_str("-0"), Some(int(0)));
        for bad in ["", "-", "0x", "--5", "+-5", "1_000", "12a", "0x-1", "xyz"] {
            assert_eq!(parse_str(bad), None, "{:?}", bad);
        }
        let big: IntegerInput = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(parse_integer("n", big).unwrap(), BigInt::from(u64::MAX));
        let negative: IntegerInput = serde_json::from_str("-7").unwrap();
        assert_eq!(parse_integer("a", negative).unwrap(), int(-7));
    }

    #[test]
    fn non_integer_coefficients_are_rejected() {
        let input: CurveInput =
            serde_json::from_str(r#"{"p": 23, "a": 1.5, "b": 1, "g": [3, 10], "n": 28}"#).unwrap();
        match GroupConfig::try_from(input) {
            Err(CurveError::InvalidParameter(msg)) => assert!(msg.starts_with("a:")),
            other => panic!("unexpected {:?}", other),
        }

        let input: CurveInput =
            serde_json::from_str(r#"{"p": 23, "a": 1, "b": "xyz", "g": [3, 10], "n": 28}"#)
                .unwrap();
        match GroupConfig::try_from(input) {
            Err(CurveError::InvalidParameter(msg)) => assert!(msg.starts_with("b:")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn oversized_json_numbers_ask_for_strings() {
        let prime = "115792089237316195423570985008687907853269984665640564039457584007908834671663";
        let json = format!(r#"{{"p": {}, "a": 0, "b": 7, "g": "infinity", "n": 1}}"#, prime);
        let input: CurveInput = serde_json::from_str(&json).unwrap();
        match GroupConfig::try_from(input) {
            Err(CurveError::InvalidParameter(msg)) => {
                assert!(msg.starts_with("p:"));
                assert!(msg.contains("decimal or 0x string"));
            }
            other => panic!("unexpected {:?}", other),
        }

        let json = format!(r#"{{"p": "{}", "a": 0, "b": 7, "g": "infinity", "n": 1}}"#, prime);
        let input: CurveInput = serde_json::from_str(&json).unwrap();
        let config = GroupConfig::try_from(input).unwrap();
        assert_eq!(config.p, NamedCurve::Secp256k1.config().p);

        let input: IntegerInput = serde_json::from_str("2.0").unwrap();
        assert!(matches!(
            parse_integer("h", input),
            Err(CurveError::InvalidParameter(msg)) if msg.ends_with("is not an integer")
        ));
        let input: IntegerInput = serde_json::from_str("1e30").unwrap();
        assert!(matches!(
            parse_integer("n", input),
            Err(CurveError::InvalidParameter(msg)) if msg.contains("0x string")
        ));
    }

    #[test]
    fn point_inputs() {
        let parse = |json: &str| -> Result<PointSpec> {
            PointSpec::try_from(serde_json::from_str::<PointInput>(json).unwrap())
        };
        assert_eq!(parse(r#""infinity""#).unwrap(), PointSpec::Infinity);
        assert_eq!(parse(r#"" Infinity ""#).unwrap(), PointSpec::Infinity);
        assert_eq!(parse("5").unwrap(), PointSpec::Scalar(int(5)));
        assert_eq!(parse(r#""-0x5""#).unwrap(), PointSpec::Scalar(int(-5)));
        assert_eq!(
            parse(r#"["0x3", -13]"#).unwrap(),
            PointSpec::Coordinates(int(3), int(-13))
        );
        assert!(matches!(
            parse(r#""origin""#),
            Err(CurveError::InvalidParameter(_))
        ));
        assert!(matches!(
            parse("[1.0, 2]"),
            Err(CurveError::InvalidParameter(_))
        ));
        assert!(serde_json::from_str::<PointInput>("[1, 2, 3]").is_err());
        assert!(serde_json::from_str::<PointInput>(r#"{"x": 1}"#).is_err());
    }

    #[test]
    fn scalar_generator_parses_but_builds_no_group() {
        let input: CurveInput =
            serde_json::from_str(r#"{"p": 23, "a": 1, "b": 1, "g": "5", "n": 28}"#).unwrap();
        let config = GroupConfig::try_from(input).unwrap();
        assert_eq!(config.g, PointSpec::Scalar(int(5)));
        assert!(matches!(
            Group::new(config),
            Err(CurveError::InvalidParameter(_))
        ));
    }

    #[test]
    fn named_curve_configs_survive_json() {
        for curve in NamedCurve::ALL {
            let config = curve.config();
            let json = serde_json::to_string(&CurveInput::from(&config)).unwrap();
            let input: CurveInput = serde_json::from_str(&json).unwrap();
            assert_eq!(GroupConfig::try_from(input).unwrap(), config);
        }
    }

    #[test]
    fn optional_fields_default_to_none() {
        let input: CurveInput =
            serde_json::from_str(r#"{"p": 23, "a": 1, "b": 1, "g": "infinity", "n": 28}"#)
                .unwrap();
        let config = GroupConfig::try_from(input).unwrap();
        assert_eq!(config.h, None);
        assert_eq!(config.name, None);
        assert_eq!(config.g, PointSpec::Infinity);
        assert!(serde_json::from_str::<CurveInput>(r#"{"p": 23}"#).is_err());
    }
}
