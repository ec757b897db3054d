//! Comparison kernel: always returns a `Bool` array. If either operand
//! is complex, only the real part participates (matching NumPy); any
//! other combination is widened to `f64` before comparing, which is
//! what "widen the non-real side to real" in the category rules means
//! in practice.

use crate::array::{extract_complex128, ArrayBuffer, ArrayEntry, LaneCast};
use crate::dtype::DType;
use crate::error::{KernelError, KernelResult};
use crate::operator::Operator;
use rayon::prelude::*;

/// `routine` is the command name reported in any type-combination error
/// (`"binopvv"`, `"binopvs"`, `"binopsv"`, `"opeqvv"`, `"opeqvs"`), so
/// the client sees the command it actually issued rather than a fixed
/// name.
pub fn bin_op_cmp(routine: &str, op: Operator, l: &ArrayEntry, r: &ArrayEntry) -> KernelResult<ArrayEntry> {
    if l.shape != r.shape {
        return Err(KernelError::ShapeMismatch {
            lhs: l.shape.clone(),
            rhs: r.shape.clone(),
        });
    }
    if l.dtype == DType::Str || r.dtype == DType::Str {
        return Err(KernelError::unsupported_type_combination(
            routine,
            l.dtype,
            op.as_str(),
            r.dtype,
        ));
    }
    let (lv, rv) = if l.dtype.is_complex() || r.dtype.is_complex() {
        (
            extract_complex128(&l.buffer).into_iter().map(|c| c.re).collect::<Vec<f64>>(),
            extract_complex128(&r.buffer).into_iter().map(|c| c.re).collect::<Vec<f64>>(),
        )
    } else {
        (f64::extract(&l.buffer), f64::extract(&r.buffer))
    };
    let out: Vec<bool> = lv
        .into_par_iter()
        .zip(rv.into_par_iter())
        .map(|(a, b): (f64, f64)| match op {
            Operator::Eq => a == b,
            Operator::Ne => a != b,
            Operator::Lt => a < b,
            Operator::Gt => a > b,
            Operator::Le => a <= b,
            Operator::Ge => a >= b,
            _ => unreachable!("bin_op_cmp called with a non-comparison operator"),
        })
        .collect();
    Ok(ArrayEntry::new(DType::Bool, l.shape.clone(), ArrayBuffer::Bool(out)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_s8_complex_equality_compares_real_parts_only() {
        use num_complex::Complex;
        let a = ArrayEntry::new(
            DType::Complex128,
            vec![2],
            ArrayBuffer::Complex128(vec![Complex::new(1.0, 2.0), Complex::new(3.0, 4.0)]),
        );
        let b = ArrayEntry::new(
            DType::Complex128,
            vec![2],
            ArrayBuffer::Complex128(vec![Complex::new(1.0, 9.0), Complex::new(3.0, 0.0)]),
        );
        let out = bin_op_cmp("binopvv", Operator::Eq, &a, &b).unwrap();
        assert_eq!(out.buffer, ArrayBuffer::Bool(vec![true, true]));
    }

    #[test]
    fn commutativity_of_equality() {
        let a = ArrayEntry::new(DType::Int32, vec![2], ArrayBuffer::Int32(vec![1, 2]));
        let b = ArrayEntry::new(DType::Int32, vec![2], ArrayBuffer::Int32(vec![1, 3]));
        let ab = bin_op_cmp("binopvv", Operator::Eq, &a, &b).unwrap();
        let ba = bin_op_cmp("binopvv", Operator::Eq, &b, &a).unwrap();
        assert_eq!(ab.buffer, ba.buffer);
    }

    #[test]
    fn type_error_is_reported_under_the_calling_routine_name() {
        let a = ArrayEntry::new(DType::Str, vec![1], ArrayBuffer::Str(vec!["x".to_string()]));
        let b = ArrayEntry::new(DType::Int32, vec![1], ArrayBuffer::Int32(vec![1]));
        let err = bin_op_cmp("binopsv", Operator::Eq, &a, &b).unwrap_err();
        assert!(err.to_string().starts_with("Error: binopsv: "));
    }
}
