//! Parsed command arguments. In a real deployment these would come out
//! of the wire request's argument map; here they are already
//! structured, standing in for that parse step.

use crate::error::{ServerError, ServerResult};
use ndserver_kernel::{DType, Scalar};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// `binopvv` / `opeqvv`: two array names and an operator string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinOpArgs {
    pub op: String,
    pub a: String,
    pub b: String,
}

/// `binopvs` / `binopsv` / `opeqvs`: one array name, a scalar literal
/// tagged with its dtype, and an operator string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinOpScalarArgs {
    pub op: String,
    pub a: String,
    pub value: String,
    pub dtype: String,
}

impl BinOpScalarArgs {
    pub fn scalar(&self) -> ServerResult<Scalar> {
        parse_scalar(&self.value, &self.dtype)
    }
}

/// Either side of a `clip` call: a scalar literal or the name of an
/// array with matching shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClipBound {
    Scalar { value: String, dtype: String },
    Array(String),
}

impl ClipBound {
    pub fn as_scalar(&self) -> ServerResult<Scalar> {
        match self {
            ClipBound::Scalar { value, dtype } => parse_scalar(value, dtype),
            ClipBound::Array(name) => Err(ServerError::MalformedClipBounds(format!(
                "expected a scalar bound, got array '{name}'"
            ))),
        }
    }

    pub fn array_name(&self) -> Option<&str> {
        match self {
            ClipBound::Array(name) => Some(name),
            ClipBound::Scalar { .. } => None,
        }
    }
}

/// `clip`: the target array name plus its min/max bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipArgs {
    pub name: String,
    pub min: ClipBound,
    pub max: ClipBound,
}

/// Convert a literal string plus its dtype tag into a `Scalar`, the way
/// the external scalar accessors (`asInt`, `asUInt`, `asReal`, `asBool`,
/// `asBigInt`) read one off the wire.
pub fn parse_scalar(value: &str, dtype: &str) -> ServerResult<Scalar> {
    let malformed = || ServerError::MalformedScalar {
        value: value.to_string(),
        dtype: dtype.to_string(),
    };
    match DType::str_to_dtype(dtype) {
        DType::Bool => value.parse::<bool>().map(Scalar::Bool).map_err(|_| malformed()),
        DType::Float32 | DType::Float64 => {
            value.parse::<f64>().map(Scalar::Real).map_err(|_| malformed())
        }
        DType::UInt8 | DType::UInt16 | DType::UInt32 | DType::UInt64 => {
            value.parse::<u64>().map(Scalar::UInt).map_err(|_| malformed())
        }
        DType::Int8 | DType::Int16 | DType::Int32 | DType::Int64 => {
            value.parse::<i64>().map(Scalar::Int).map_err(|_| malformed())
        }
        DType::BigInt => BigInt::from_str(value).map(Scalar::BigInt).map_err(|_| malformed()),
        DType::Complex64 | DType::Complex128 | DType::Str | DType::Undef => Err(malformed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_concrete_scalar_kind() {
        assert_eq!(parse_scalar("42", "int64").unwrap(), Scalar::Int(42));
        assert_eq!(parse_scalar("42", "uint64").unwrap(), Scalar::UInt(42));
        assert_eq!(parse_scalar("3.5", "float64").unwrap(), Scalar::Real(3.5));
        assert_eq!(parse_scalar("true", "bool").unwrap(), Scalar::Bool(true));
        assert_eq!(
            parse_scalar("123456789012345678901234567890", "bigint").unwrap(),
            Scalar::BigInt(BigInt::from_str("123456789012345678901234567890").unwrap())
        );
    }

    #[test]
    fn rejects_mismatched_literal_and_dtype() {
        assert!(parse_scalar("not_a_number", "int64").is_err());
        assert!(parse_scalar("5", "str").is_err());
    }

    #[test]
    fn clip_bound_array_rejects_scalar_extraction() {
        let bound = ClipBound::Array("lo".to_string());
        assert!(bound.as_scalar().is_err());
        assert_eq!(bound.array_name(), Some("lo"));
    }
}
