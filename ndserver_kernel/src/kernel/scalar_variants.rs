//! Array-scalar (`vs`) and scalar-array (`sv`) variants. These share
//! the array-array kernel's logic exactly, with the scalar
//! broadcast to the other operand's shape before dispatch: the scalar
//! is loop-invariant, and the underlying kernels already treat every
//! lane independently.

use crate::array::{ArrayBuffer, ArrayEntry};
use crate::dtype::DType;
use crate::error::KernelResult;
use crate::kernel::bigint::{bin_op_bigint_cmp, bin_op_vv_bigint};
use crate::kernel::comparison::bin_op_cmp;
use crate::kernel::non_bigint::bin_op_vv;
use crate::operator::{OpCategory, Operator};
use crate::scalar::Scalar;

fn broadcast_scalar(scalar: &Scalar, shape: &[usize]) -> ArrayEntry {
    let count: usize = shape.iter().product();
    let dtype = scalar.dtype();
    let buffer = match scalar {
        Scalar::Int(v) => ArrayBuffer::Int64(vec![*v; count]),
        Scalar::UInt(v) => ArrayBuffer::UInt64(vec![*v; count]),
        Scalar::Real(v) => ArrayBuffer::Float64(vec![*v; count]),
        Scalar::Bool(v) => ArrayBuffer::Bool(vec![*v; count]),
        Scalar::BigInt(v) => ArrayBuffer::BigInt(vec![v.clone(); count]),
    };
    ArrayEntry::new(dtype, shape.to_vec(), buffer)
}

fn dispatch(routine: &str, op: Operator, lhs: &ArrayEntry, rhs: &ArrayEntry, max_bits: Option<u32>) -> KernelResult<ArrayEntry> {
    if lhs.dtype == DType::BigInt || rhs.dtype == DType::BigInt {
        return if op.category() == OpCategory::Comparison {
            bin_op_bigint_cmp(routine, op, lhs, rhs)
        } else {
            bin_op_vv_bigint(routine, op, lhs, rhs, max_bits)
        };
    }
    if op.category() == OpCategory::Comparison {
        bin_op_cmp(routine, op, lhs, rhs)
    } else {
        bin_op_vv(routine, op, lhs, rhs)
    }
}

/// `array op scalar`. `routine` is the command name reported in any
/// error raised along the way (`"binopvs"` or `"opeqvs"`).
pub fn bin_op_vs(routine: &str, op: Operator, l: &ArrayEntry, scalar: &Scalar) -> KernelResult<ArrayEntry> {
    let rhs = broadcast_scalar(scalar, &l.shape);
    let max_bits = if l.dtype == DType::BigInt { l.max_bits } else { None };
    dispatch(routine, op, l, &rhs, max_bits)
}

/// `scalar op array`. `routine` is the command name reported in any
/// error raised along the way (`"binopsv"`).
pub fn bin_op_sv(routine: &str, op: Operator, scalar: &Scalar, r: &ArrayEntry) -> KernelResult<ArrayEntry> {
    let lhs = broadcast_scalar(scalar, &r.shape);
    let max_bits = if r.dtype == DType::BigInt { r.max_bits } else { None };
    dispatch(routine, op, &lhs, r, max_bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vs_add_broadcasts_scalar_across_shape() {
        let a = ArrayEntry::new(DType::Int64, vec![3], ArrayBuffer::Int64(vec![1, 2, 3]));
        let out = bin_op_vs("binopvs", Operator::Add, &a, &Scalar::Int(10)).unwrap();
        assert_eq!(out.buffer, ArrayBuffer::Int64(vec![11, 12, 13]));
    }

    #[test]
    fn sv_subtraction_is_not_commuted() {
        let a = ArrayEntry::new(DType::Int64, vec![2], ArrayBuffer::Int64(vec![1, 2]));
        let out = bin_op_sv("binopsv", Operator::Sub, &Scalar::Int(10), &a).unwrap();
        assert_eq!(out.buffer, ArrayBuffer::Int64(vec![9, 8]));
    }

    #[test]
    fn vs_comparison_returns_bool() {
        let a = ArrayEntry::new(DType::Int64, vec![3], ArrayBuffer::Int64(vec![1, 2, 3]));
        let out = bin_op_vs("binopvs", Operator::Gt, &a, &Scalar::Int(1)).unwrap();
        assert_eq!(out.buffer, ArrayBuffer::Bool(vec![false, true, true]));
    }

    #[test]
    fn type_error_is_reported_under_the_calling_routine_name() {
        let a = ArrayEntry::new(DType::Float64, vec![1], ArrayBuffer::Float64(vec![1.0]));
        let err = bin_op_vs("binopsv", Operator::BitAnd, &a, &Scalar::Real(2.0)).unwrap_err();
        assert!(err.to_string().starts_with("Error: binopsv: "));
    }
}
