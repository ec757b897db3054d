//! Compound-assign kernels (`+= -= *= /= //= %= **= |= &= ^=`): mutate
//! the left operand in place rather than allocating a result array.
//!
//! Legality is codified once in `compound_assign_legal` rather than
//! enumerated per `(lt, rt, op)` triple: a compound assignment is legal
//! iff the operator is not a comparison and the promoted type of
//! `(lt, rt, op)` equals `lt` exactly — any promotion that would widen
//! or change the sign of the left operand's storage is rejected.

use crate::array::ArrayEntry;
use crate::dtype::DType;
use crate::error::{KernelError, KernelResult};
use crate::kernel::bigint::bin_op_vv_bigint;
use crate::kernel::non_bigint::bin_op_vv;
use crate::kernel::scalar_variants::bin_op_vs;
use crate::operator::{OpCategory, Operator};
use crate::promotion::{common_dtype, div_dtype};
use crate::scalar::Scalar;

fn promoted_dtype(op: Operator, lt: DType, rt: DType) -> DType {
    match op.category() {
        OpCategory::BitwiseLogic | OpCategory::BitwiseRot => common_dtype(lt, rt, false),
        OpCategory::BitwiseShift => common_dtype(lt, rt, true),
        OpCategory::BasicArithmetic => common_dtype(lt, rt, false),
        OpCategory::FancyArithmetic => common_dtype(lt, rt, true),
        OpCategory::TrueDivision => div_dtype(lt, rt),
        OpCategory::Comparison => DType::Bool,
    }
}

/// `true` iff `lt op= rt` is legal: not a comparison, and the promoted
/// type of the triple equals `lt` exactly.
pub fn compound_assign_legal(lt: DType, rt: DType, op: Operator) -> bool {
    op.is_compound_eligible() && promoted_dtype(op, lt, rt) == lt
}

/// `l op= r`, mutating `l.buffer` (and, for `BigInt`, `l.max_bits`) in place.
pub fn op_eq_vv(op: Operator, l: &mut ArrayEntry, r: &ArrayEntry) -> KernelResult<()> {
    if !compound_assign_legal(l.dtype, r.dtype, op) {
        return Err(KernelError::unsupported_result_type(
            "opeqvv",
            l.dtype,
            r.dtype,
        ));
    }
    let lhs_max_bits = l.max_bits;
    let result = if l.dtype == DType::BigInt || r.dtype == DType::BigInt {
        bin_op_vv_bigint("opeqvv", op, &*l, r, lhs_max_bits)?
    } else {
        bin_op_vv("opeqvv", op, &*l, r)?
    };
    l.buffer = result.buffer;
    l.max_bits = result.max_bits;
    Ok(())
}

/// `l op= scalar`, mutating `l` in place.
pub fn op_eq_vs(op: Operator, l: &mut ArrayEntry, scalar: &Scalar) -> KernelResult<()> {
    if !compound_assign_legal(l.dtype, scalar.dtype(), op) {
        return Err(KernelError::unsupported_result_type(
            "opeqvs",
            l.dtype,
            scalar.dtype(),
        ));
    }
    let result = bin_op_vs("opeqvs", op, l, scalar)?;
    l.buffer = result.buffer;
    l.max_bits = result.max_bits;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::ArrayBuffer;

    #[test]
    fn same_width_add_assign_is_legal() {
        assert!(compound_assign_legal(DType::Int64, DType::Int64, Operator::Add));
    }

    #[test]
    fn widening_add_assign_is_rejected() {
        // Int64 += UInt64 would promote to Float64, which does not fit
        // back into an Int64 slot.
        assert!(!compound_assign_legal(
            DType::Int64,
            DType::UInt64,
            Operator::Add
        ));
    }

    #[test]
    fn op_eq_vv_mutates_lhs_in_place() {
        let mut a = ArrayEntry::new(DType::Int64, vec![3], ArrayBuffer::Int64(vec![1, 2, 3]));
        let b = ArrayEntry::new(DType::Int64, vec![3], ArrayBuffer::Int64(vec![10, 10, 10]));
        op_eq_vv(Operator::Add, &mut a, &b).unwrap();
        assert_eq!(a.buffer, ArrayBuffer::Int64(vec![11, 12, 13]));
    }

    #[test]
    fn comparison_is_never_compound_eligible() {
        assert!(!compound_assign_legal(DType::Int64, DType::Int64, Operator::Eq));
    }

    #[test]
    fn bigint_add_assign_against_float_is_rejected() {
        assert!(!compound_assign_legal(DType::BigInt, DType::Float64, Operator::Add));
    }
}
