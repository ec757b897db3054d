//! The dynamic scalar value carried by array-scalar commands.

use crate::dtype::DType;
use crate::lane::NumericLane;
use num_bigint::BigInt;

/// A tagged union over the five concrete scalar representations a
/// parsed request argument can resolve to.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    UInt(u64),
    Real(f64),
    Bool(bool),
    BigInt(BigInt),
}

impl Scalar {
    pub fn dtype(&self) -> DType {
        match self {
            Scalar::Int(_) => DType::Int64,
            Scalar::UInt(_) => DType::UInt64,
            Scalar::Real(_) => DType::Float64,
            Scalar::Bool(_) => DType::Bool,
            Scalar::BigInt(_) => DType::BigInt,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(v) => Some(*v),
            Scalar::UInt(v) => i64::try_from(*v).ok(),
            Scalar::Bool(v) => Some(*v as i64),
            Scalar::Real(v) if v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Scalar::UInt(v) => Some(*v),
            Scalar::Int(v) => u64::try_from(*v).ok(),
            Scalar::Bool(v) => Some(*v as u64),
            _ => None,
        }
    }

    pub fn as_real(&self) -> f64 {
        match self {
            Scalar::Int(v) => *v as f64,
            Scalar::UInt(v) => *v as f64,
            Scalar::Real(v) => *v,
            Scalar::Bool(v) => {
                if *v {
                    1.0
                } else {
                    0.0
                }
            }
            Scalar::BigInt(v) => {
                let (_, digits) = v.to_u64_digits();
                digits.first().copied().unwrap_or(0) as f64
            }
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(v) => Some(*v),
            Scalar::Int(v) => Some(*v != 0),
            Scalar::UInt(v) => Some(*v != 0),
            _ => None,
        }
    }

    /// Cast this scalar into a concrete numeric lane, matching the
    /// `LaneCast::extract` widening rules used for array operands.
    pub fn cast_lane<T: NumericLane>(&self) -> T {
        match self {
            Scalar::Int(v) => T::from_i64(*v),
            Scalar::UInt(v) => T::from_u64(*v),
            Scalar::Real(v) => T::from_f64(*v),
            Scalar::Bool(v) => T::from_u64(*v as u64),
            Scalar::BigInt(v) => T::from_i64(v.to_string().parse::<i64>().unwrap_or(0)),
        }
    }

    pub fn as_bigint(&self) -> BigInt {
        match self {
            Scalar::Int(v) => BigInt::from(*v),
            Scalar::UInt(v) => BigInt::from(*v),
            Scalar::Bool(v) => BigInt::from(*v as i64),
            Scalar::BigInt(v) => v.clone(),
            Scalar::Real(v) => BigInt::from(*v as i64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_dtype_matches_variant() {
        assert_eq!(Scalar::Int(1).dtype(), DType::Int64);
        assert_eq!(Scalar::UInt(1).dtype(), DType::UInt64);
        assert_eq!(Scalar::Real(1.0).dtype(), DType::Float64);
        assert_eq!(Scalar::Bool(true).dtype(), DType::Bool);
        assert_eq!(Scalar::BigInt(BigInt::from(1)).dtype(), DType::BigInt);
    }

    #[test]
    fn as_real_widens_every_variant() {
        assert_eq!(Scalar::Int(-4).as_real(), -4.0);
        assert_eq!(Scalar::UInt(4).as_real(), 4.0);
        assert_eq!(Scalar::Bool(true).as_real(), 1.0);
    }
}
