//! NumPy-compatible type-promotion algebra.
//!
//! `common_dtype` and `div_dtype` are pure functions from an operand pair
//! to the element type of `a op b`. They are evaluated once, at dispatch
//! time, so that the elementwise kernels below are monomorphic in the
//! resulting `(lt, rt, et)` triple.

use crate::dtype::{DType, DTypeKind};

/// `Bool -> Int8 -> Int16 -> Int32 -> Int64 -> Float64`, the "next wider
/// signed-or-real" type for a given operand. `Float64` is its own fixed
/// point, matching NumPy's refusal to invent a 128-bit integer here.
pub fn promote_to_next_signed(d: DType) -> DType {
    match d {
        DType::Bool => DType::Int8,
        DType::UInt8 => DType::Int16,
        DType::UInt16 => DType::Int32,
        DType::UInt32 => DType::Int64,
        DType::UInt64 => DType::Float64,
        DType::Int8 => DType::Int16,
        DType::Int16 => DType::Int32,
        DType::Int32 => DType::Int64,
        DType::Int64 => DType::Float64,
        DType::Float32 => DType::Float64,
        DType::Float64 => DType::Float64,
        DType::Complex64 => DType::Complex128,
        DType::Complex128 => DType::Complex128,
        // BigInt has no wider same-kind integer to promote to, same as
        // UInt64/Int64 above.
        DType::BigInt => DType::Float64,
        other => other,
    }
}

/// The smallest float type that can represent `d` without losing the
/// integer's full range, per NumPy's int->float promotion table.
pub fn promote_to_next_float(d: DType) -> DType {
    match d {
        DType::Bool
        | DType::UInt8
        | DType::UInt16
        | DType::Int8
        | DType::Int16 => DType::Float32,
        DType::UInt32
        | DType::UInt64
        | DType::Int32
        | DType::Int64
        | DType::Float32
        | DType::Float64
        | DType::BigInt => DType::Float64,
        DType::Complex64 | DType::Complex128 => DType::Complex128,
        other => other,
    }
}

/// The smallest complex type that can represent `d`.
pub fn promote_to_next_complex(d: DType) -> DType {
    match d {
        DType::Bool
        | DType::UInt8
        | DType::UInt16
        | DType::Int8
        | DType::Int16
        | DType::Float32 => DType::Complex64,
        DType::UInt32
        | DType::UInt64
        | DType::Int32
        | DType::Int64
        | DType::Float64
        | DType::Complex64
        | DType::BigInt => DType::Complex128,
        DType::Complex128 => DType::Complex128,
        other => other,
    }
}

/// Result element type of `a op b` under NumPy's promotion rules.
///
/// `special_bool` routes `(Bool, Bool)` to `Int8` instead of `Bool`; this
/// is used only by the `FancyArithmetic` and `BitwiseShift` categories,
/// where a boolean must behave as an 8-bit integer before the operator
/// applies (`// % **` and `<< >>`).
pub fn common_dtype(a: DType, b: DType, special_bool: bool) -> DType {
    if special_bool && a.kind() == DTypeKind::Bool && b.kind() == DTypeKind::Bool {
        return DType::Int8;
    }

    match (a.kind(), b.kind()) {
        (DTypeKind::Integer, DTypeKind::Integer) => {
            if a.is_signed() == b.is_signed() {
                DType::max_dtype(a, b)
            } else {
                let (u, s) = if a.is_unsigned() { (a, b) } else { (b, a) };
                DType::max_dtype(promote_to_next_signed(u), s)
            }
        }
        (DTypeKind::Integer, DTypeKind::Float) => {
            DType::max_dtype(promote_to_next_float(a), b)
        }
        (DTypeKind::Float, DTypeKind::Integer) => {
            DType::max_dtype(promote_to_next_float(b), a)
        }
        (DTypeKind::Integer, DTypeKind::Complex) => {
            DType::max_dtype(promote_to_next_complex(a), b)
        }
        (DTypeKind::Complex, DTypeKind::Integer) => {
            DType::max_dtype(promote_to_next_complex(b), a)
        }
        (DTypeKind::Float, DTypeKind::Float) => DType::max_dtype(a, b),
        (DTypeKind::Float, DTypeKind::Complex) => {
            DType::max_dtype(promote_to_next_complex(a), b)
        }
        (DTypeKind::Complex, DTypeKind::Float) => {
            DType::max_dtype(promote_to_next_complex(b), a)
        }
        (DTypeKind::Complex, DTypeKind::Complex) => DType::max_dtype(a, b),
        (DTypeKind::Bool, DTypeKind::Bool) => DType::Bool,
        (DTypeKind::Bool, _) => b,
        (_, DTypeKind::Bool) => a,
        _ => DType::Undef,
    }
}

/// Result element type of `a / b` (true division). Differs from
/// `common_dtype` in that integer/integer always yields `Float64`, and
/// narrow-int/Float32 stays in `Float32` rather than widening to
/// `Float64`.
pub fn div_dtype(a: DType, b: DType) -> DType {
    match (a.kind(), b.kind()) {
        (DTypeKind::Integer, DTypeKind::Integer) => DType::Float64,
        (DTypeKind::Integer, DTypeKind::Float) => {
            if a.byte_size() < 4 && b == DType::Float32 {
                DType::Float32
            } else {
                DType::Float64
            }
        }
        (DTypeKind::Float, DTypeKind::Integer) => {
            if b.byte_size() < 4 && a == DType::Float32 {
                DType::Float32
            } else {
                DType::Float64
            }
        }
        (DTypeKind::Bool, DTypeKind::Float) => b,
        (DTypeKind::Float, DTypeKind::Bool) => a,
        (DTypeKind::Bool, DTypeKind::Complex) => b,
        (DTypeKind::Complex, DTypeKind::Bool) => a,
        // A bare Bool behaves like another integer operand here: true
        // division of two integer-ish operands always lands in Float64.
        (DTypeKind::Bool, DTypeKind::Bool)
        | (DTypeKind::Bool, DTypeKind::Integer)
        | (DTypeKind::Integer, DTypeKind::Bool) => DType::Float64,
        // Float/Float, Complex/Complex, and the Int<->Complex / Float<->Complex
        // crossings all behave like ordinary promotion.
        (DTypeKind::Float, DTypeKind::Float)
        | (DTypeKind::Complex, DTypeKind::Complex)
        | (DTypeKind::Integer, DTypeKind::Complex)
        | (DTypeKind::Complex, DTypeKind::Integer)
        | (DTypeKind::Float, DTypeKind::Complex)
        | (DTypeKind::Complex, DTypeKind::Float) => common_dtype(a, b, false),
        _ => DType::Undef,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commutative_for_every_numeric_pair() {
        let dtypes = [
            DType::Bool,
            DType::Int8,
            DType::Int16,
            DType::Int32,
            DType::Int64,
            DType::UInt8,
            DType::UInt16,
            DType::UInt32,
            DType::UInt64,
            DType::Float32,
            DType::Float64,
            DType::Complex64,
            DType::Complex128,
        ];
        for &a in &dtypes {
            for &b in &dtypes {
                assert_eq!(
                    common_dtype(a, b, false),
                    common_dtype(b, a, false),
                    "common_dtype not commutative for ({:?}, {:?})",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn bool_is_identity_for_common_dtype() {
        for d in [DType::Int32, DType::UInt64, DType::Float64, DType::Complex128] {
            assert_eq!(common_dtype(d, DType::Bool, false), d);
            assert_eq!(common_dtype(DType::Bool, d, false), d);
        }
    }

    #[test]
    fn mixed_sign_widens_to_next_signed() {
        // Int64 + UInt64: UInt64 has no wider signed int, promotes to Float64.
        assert_eq!(common_dtype(DType::Int64, DType::UInt64, false), DType::Float64);
        // Int32 + UInt8: UInt8 -> Int16, then max(Int16, Int32) = Int32.
        assert_eq!(common_dtype(DType::Int32, DType::UInt8, false), DType::Int32);
    }

    #[test]
    fn div_dtype_examples_from_spec() {
        assert_eq!(div_dtype(DType::Int64, DType::Int64), DType::Float64);
        assert_eq!(div_dtype(DType::UInt8, DType::Float32), DType::Float32);
        assert_eq!(div_dtype(DType::Int32, DType::Float32), DType::Float64);
    }

    #[test]
    fn special_bool_widens_bool_bool_to_int8() {
        assert_eq!(common_dtype(DType::Bool, DType::Bool, true), DType::Int8);
        assert_eq!(common_dtype(DType::Bool, DType::Bool, false), DType::Bool);
    }

    #[test]
    fn bigint_does_not_win_promotion_against_float_by_byte_size() {
        // BigInt's 16-byte nominal size must not let it survive a
        // widening against Float64; it promotes to Float64 like any
        // other integer with no wider same-kind representation.
        assert_eq!(common_dtype(DType::BigInt, DType::Float64, false), DType::Float64);
        assert_eq!(common_dtype(DType::Float64, DType::BigInt, false), DType::Float64);
    }
}
