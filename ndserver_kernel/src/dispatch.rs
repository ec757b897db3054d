//! Front-end dispatcher: turns a routine name plus an operator string
//! into a parsed `Operator`, then routes to the bigint, comparison, or
//! non-bigint kernel family based on the `(kind(lt), kind(rt))` pair.
//! This two-level dispatch is a single dtype-kind check rather than an
//! explicit byte-width match, since every kernel family already
//! re-dispatches on concrete width itself via
//! `with_int_result!`/`with_real_result!`.

use crate::array::ArrayEntry;
use crate::dtype::DType;
use crate::error::{KernelError, KernelResult};
use crate::kernel::{
    bin_op_bigint_cmp, bin_op_cmp, bin_op_sv, bin_op_vs, bin_op_vv, bin_op_vv_bigint,
    compound_assign_legal, op_eq_vs, op_eq_vv,
};
use crate::operator::{OpCategory, Operator};
use crate::scalar::Scalar;

fn parse_operator(routine: &str, op: &str) -> KernelResult<Operator> {
    Operator::parse(op).ok_or_else(|| KernelError::UnsupportedOperator {
        routine: routine.to_string(),
        op: op.to_string(),
    })
}

fn is_bigint_pair(lt: DType, rt: DType) -> bool {
    lt == DType::BigInt || rt == DType::BigInt
}

/// The `max_bits` a bigint result should inherit: whichever operand has
/// a bound, or `None` if neither does. If both operands are bounded
/// bigints, their widths must agree.
fn resolve_max_bits(routine: &str, l: &ArrayEntry, r: &ArrayEntry) -> KernelResult<Option<u32>> {
    match (l.dtype == DType::BigInt, r.dtype == DType::BigInt) {
        (true, true) => match (l.max_bits, r.max_bits) {
            (Some(a), Some(b)) if a != b => Err(KernelError::unsupported_type_combination(
                routine,
                l.dtype,
                "max_bits mismatch",
                r.dtype,
            )),
            (Some(a), _) | (_, Some(a)) => Ok(Some(a)),
            (None, None) => Ok(None),
        },
        (true, false) => Ok(l.max_bits),
        (false, true) => Ok(r.max_bits),
        (false, false) => Ok(None),
    }
}

/// `a op b`, two arrays.
pub fn binop_vv(routine: &str, op: &str, l: &ArrayEntry, r: &ArrayEntry) -> KernelResult<ArrayEntry> {
    let op = parse_operator(routine, op)?;
    if is_bigint_pair(l.dtype, r.dtype) {
        return if op.category() == OpCategory::Comparison {
            bin_op_bigint_cmp(routine, op, l, r)
        } else {
            bin_op_vv_bigint(routine, op, l, r, resolve_max_bits(routine, l, r)?)
        };
    }
    if op.category() == OpCategory::Comparison {
        bin_op_cmp(routine, op, l, r)
    } else {
        bin_op_vv(routine, op, l, r)
    }
}

/// `a op scalar`.
pub fn binop_vs(routine: &str, op: &str, l: &ArrayEntry, scalar: &Scalar) -> KernelResult<ArrayEntry> {
    let op = parse_operator(routine, op)?;
    bin_op_vs(routine, op, l, scalar)
}

/// `scalar op a`.
pub fn binop_sv(routine: &str, op: &str, scalar: &Scalar, r: &ArrayEntry) -> KernelResult<ArrayEntry> {
    let op = parse_operator(routine, op)?;
    bin_op_sv(routine, op, scalar, r)
}

/// `a op= b`, mutating `l` in place.
pub fn opeq_vv(routine: &str, op: &str, l: &mut ArrayEntry, r: &ArrayEntry) -> KernelResult<()> {
    let parsed = parse_operator(routine, op)?;
    op_eq_vv(parsed, l, r)
}

/// `a op= scalar`, mutating `l` in place.
pub fn opeq_vs(routine: &str, op: &str, l: &mut ArrayEntry, scalar: &Scalar) -> KernelResult<()> {
    let parsed = parse_operator(routine, op)?;
    op_eq_vs(parsed, l, scalar)
}

/// `true` iff `op` is a recognized operator string and `lt op= rt`
/// would be a legal compound assignment.
pub fn compound_assign_allowed(lt: DType, rt: DType, op: &str) -> bool {
    Operator::parse(op)
        .map(|parsed| compound_assign_legal(lt, rt, parsed))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::ArrayBuffer;

    #[test]
    fn unknown_operator_is_reported_with_routine_name() {
        let a = ArrayEntry::new(DType::Int64, vec![1], ArrayBuffer::Int64(vec![1]));
        let b = ArrayEntry::new(DType::Int64, vec![1], ArrayBuffer::Int64(vec![1]));
        let err = binop_vv("binopvv", "~", &a, &b).unwrap_err();
        assert_eq!(err.to_string(), "Error: binopvv: unrecognized operator '~'");
    }

    #[test]
    fn bigint_pair_routes_to_bigint_kernel() {
        use num_bigint::BigInt;
        let a = ArrayEntry::new(
            DType::BigInt,
            vec![1],
            ArrayBuffer::BigInt(vec![BigInt::from(10)]),
        )
        .with_max_bits(Some(4));
        let b = ArrayEntry::new(
            DType::BigInt,
            vec![1],
            ArrayBuffer::BigInt(vec![BigInt::from(7)]),
        );
        let out = binop_vv("binopvv", "+", &a, &b).unwrap();
        assert_eq!(out.buffer, ArrayBuffer::BigInt(vec![BigInt::from(1)]));
    }

    #[test]
    fn compound_assign_allowed_rejects_unknown_operator() {
        assert!(!compound_assign_allowed(DType::Int64, DType::Int64, "~"));
    }

    #[test]
    fn mismatched_bigint_max_bits_is_rejected() {
        use num_bigint::BigInt;
        let a = ArrayEntry::new(DType::BigInt, vec![1], ArrayBuffer::BigInt(vec![BigInt::from(1)]))
            .with_max_bits(Some(4));
        let b = ArrayEntry::new(DType::BigInt, vec![1], ArrayBuffer::BigInt(vec![BigInt::from(1)]))
            .with_max_bits(Some(8));
        assert!(binop_vv("binopvv", "+", &a, &b).is_err());
    }
}
