//! Big-integer elementwise kernel. Every result lane is reduced modulo
//! `2^max_bits` when the output array declares a width; `BigInt` arrays
//! with `max_bits = None` are unbounded and only support the operations
//! that don't require a concrete width (rotation does, see
//! `RotationWithoutWidth`).

use crate::array::{ArrayBuffer, ArrayEntry};
use crate::dtype::DType;
use crate::error::{KernelError, KernelResult};
use crate::operator::{OpCategory, Operator};
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rayon::prelude::*;

fn to_bigint_vec(routine: &str, buf: &ArrayBuffer) -> KernelResult<Vec<BigInt>> {
    match buf {
        ArrayBuffer::BigInt(v) => Ok(v.clone()),
        ArrayBuffer::Bool(v) => Ok(v.iter().map(|&b| BigInt::from(b as i64)).collect()),
        ArrayBuffer::Int8(v) => Ok(v.iter().map(|&x| BigInt::from(x)).collect()),
        ArrayBuffer::Int16(v) => Ok(v.iter().map(|&x| BigInt::from(x)).collect()),
        ArrayBuffer::Int32(v) => Ok(v.iter().map(|&x| BigInt::from(x)).collect()),
        ArrayBuffer::Int64(v) => Ok(v.iter().map(|&x| BigInt::from(x)).collect()),
        ArrayBuffer::UInt8(v) => Ok(v.iter().map(|&x| BigInt::from(x)).collect()),
        ArrayBuffer::UInt16(v) => Ok(v.iter().map(|&x| BigInt::from(x)).collect()),
        ArrayBuffer::UInt32(v) => Ok(v.iter().map(|&x| BigInt::from(x)).collect()),
        ArrayBuffer::UInt64(v) => Ok(v.iter().map(|&x| BigInt::from(x)).collect()),
        other => Err(KernelError::unsupported_type_combination(
            routine,
            other.dtype(),
            "bigint",
            other.dtype(),
        )),
    }
}

fn mask_for(max_bits: u32) -> BigInt {
    (BigInt::one() << max_bits) - BigInt::one()
}

/// `l op r -> out`, all `BigInt`. `max_bits` governs masking of the
/// result (inherited from whichever operand's bound binds, resolved by
/// the dispatcher before calling this). `routine` is the command name
/// reported in any error (`"binopvv"`, `"binopvs"`, `"binopsv"`,
/// `"opeqvv"`, `"opeqvs"`), so the client sees the command it actually
/// issued rather than a fixed name.
pub fn bin_op_vv_bigint(
    routine: &str,
    op: Operator,
    l: &ArrayEntry,
    r: &ArrayEntry,
    max_bits: Option<u32>,
) -> KernelResult<ArrayEntry> {
    if l.shape != r.shape {
        return Err(KernelError::ShapeMismatch {
            lhs: l.shape.clone(),
            rhs: r.shape.clone(),
        });
    }
    if l.dtype.is_float() || l.dtype.is_complex() || r.dtype.is_float() || r.dtype.is_complex() {
        return Err(KernelError::unsupported_type_combination(
            routine,
            l.dtype,
            op.as_str(),
            r.dtype,
        ));
    }

    let lv = to_bigint_vec(routine, &l.buffer)?;
    let rv = to_bigint_vec(routine, &r.buffer)?;
    let mask = max_bits.map(mask_for);

    let apply_mask = |mut v: BigInt| -> BigInt {
        if let Some(m) = &mask {
            v &= m;
        }
        v
    };

    let out: Vec<BigInt> = match op.category() {
        OpCategory::BitwiseLogic => lv
            .into_par_iter()
            .zip(rv.into_par_iter())
            .map(|(a, b)| {
                apply_mask(match op {
                    Operator::BitOr => a | b,
                    Operator::BitAnd => a & b,
                    Operator::BitXor => a ^ b,
                    _ => unreachable!(),
                })
            })
            .collect(),
        OpCategory::TrueDivision => lv
            .into_par_iter()
            .zip(rv.into_par_iter())
            .map(|(a, b)| apply_mask(if b.is_zero() { BigInt::zero() } else { a / b }))
            .collect(),
        OpCategory::BitwiseShift => lv
            .into_par_iter()
            .zip(rv.into_par_iter())
            .map(|(a, b)| {
                let amt = bigint_to_u32(&b);
                if matches!(max_bits, Some(bits) if amt >= bits) {
                    BigInt::zero()
                } else {
                    match op {
                        Operator::Shl => apply_mask(a << amt),
                        Operator::Shr => apply_mask(a >> amt),
                        _ => unreachable!(),
                    }
                }
            })
            .collect(),
        OpCategory::BitwiseRot => {
            let bits = max_bits.ok_or_else(|| KernelError::RotationWithoutWidth {
                routine: routine.to_string(),
                dtype: DType::BigInt,
            })?;
            lv.into_par_iter()
                .zip(rv.into_par_iter())
                .map(|(a, b)| {
                    let s = bigint_to_u32(&b) % bits;
                    let wrapped = match op {
                        Operator::RotL => (a.clone() << s) | (a >> (bits - s)),
                        Operator::RotR => (a.clone() >> s) | (a << (bits - s)),
                        _ => unreachable!(),
                    };
                    apply_mask(wrapped)
                })
                .collect()
        }
        OpCategory::FancyArithmetic => {
            if op == Operator::Pow {
                if rv.iter().any(|e| e.is_negative()) {
                    return Err(KernelError::NegativeExponent {
                        base_ty: DType::BigInt,
                    });
                }
            }
            lv.into_par_iter()
                .zip(rv.into_par_iter())
                .map(|(a, b)| match op {
                    // `Integer::div_floor`/`mod_floor` give an exact
                    // floored division directly on the big-integer's own
                    // digits; no lossy f64 round-trip needed here, unlike
                    // the fixed-width real kernels in `non_bigint.rs`.
                    Operator::FloorDiv => {
                        apply_mask(if b.is_zero() { BigInt::zero() } else { a.div_floor(&b) })
                    }
                    Operator::Mod => {
                        apply_mask(if b.is_zero() { BigInt::zero() } else { a.mod_floor(&b) })
                    }
                    Operator::Pow => {
                        let e = bigint_to_u32(&b);
                        apply_mask(match &mask {
                            Some(m) => mod_pow(&a, e, &(m.clone() + BigInt::one())),
                            None => a.pow(e),
                        })
                    }
                    _ => unreachable!(),
                })
                .collect()
        }
        OpCategory::BasicArithmetic => lv
            .into_par_iter()
            .zip(rv.into_par_iter())
            .map(|(a, b)| {
                apply_mask(match op {
                    Operator::Add => a + b,
                    Operator::Sub => a - b,
                    Operator::Mul => a * b,
                    _ => unreachable!(),
                })
            })
            .collect(),
        OpCategory::Comparison => unreachable!("bigint comparisons go through bin_op_bigint_cmp"),
    };

    Ok(ArrayEntry::new(DType::BigInt, l.shape.clone(), ArrayBuffer::BigInt(out)).with_max_bits(max_bits))
}

/// Bool-result comparison over bigint (or mixed bigint/integer) arrays.
pub fn bin_op_bigint_cmp(routine: &str, op: Operator, l: &ArrayEntry, r: &ArrayEntry) -> KernelResult<ArrayEntry> {
    if l.shape != r.shape {
        return Err(KernelError::ShapeMismatch {
            lhs: l.shape.clone(),
            rhs: r.shape.clone(),
        });
    }
    if l.dtype.is_float() || l.dtype.is_complex() || r.dtype.is_float() || r.dtype.is_complex() {
        return Err(KernelError::unsupported_type_combination(
            routine,
            l.dtype,
            op.as_str(),
            r.dtype,
        ));
    }
    let lv = to_bigint_vec(routine, &l.buffer)?;
    let rv = to_bigint_vec(routine, &r.buffer)?;
    let out: Vec<bool> = lv
        .into_par_iter()
        .zip(rv.into_par_iter())
        .map(|(a, b)| match op {
            Operator::Eq => a == b,
            Operator::Ne => a != b,
            Operator::Lt => a < b,
            Operator::Gt => a > b,
            Operator::Le => a <= b,
            Operator::Ge => a >= b,
            _ => unreachable!(),
        })
        .collect();
    Ok(ArrayEntry::new(DType::Bool, l.shape.clone(), ArrayBuffer::Bool(out)))
}

fn bigint_to_u32(v: &BigInt) -> u32 {
    let (sign, digits) = v.to_u32_digits();
    if sign == Sign::Minus {
        return 0;
    }
    digits.first().copied().unwrap_or(0)
}

/// Binary (square-and-multiply) modular exponentiation: `base^exp mod modulus`.
fn mod_pow(base: &BigInt, mut exp: u32, modulus: &BigInt) -> BigInt {
    let mut result = BigInt::one();
    let mut b = base.clone() % modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = (result * &b) % modulus;
        }
        b = (&b * &b) % modulus;
        exp >>= 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bigint_entry(v: Vec<i64>, max_bits: Option<u32>) -> ArrayEntry {
        let len = v.len();
        ArrayEntry::new(
            DType::BigInt,
            vec![len],
            ArrayBuffer::BigInt(v.into_iter().map(BigInt::from).collect()),
        )
        .with_max_bits(max_bits)
    }

    #[test]
    fn scenario_s5_wraps_modulo_two_to_the_max_bits() {
        let a = bigint_entry(vec![10], Some(4));
        let b = bigint_entry(vec![7], None);
        let out = bin_op_vv_bigint("binopvv", Operator::Add, &a, &b, Some(4)).unwrap();
        assert_eq!(out.buffer, ArrayBuffer::BigInt(vec![BigInt::from(1)]));
    }

    #[test]
    fn rotation_without_width_is_an_error() {
        let a = bigint_entry(vec![5], None);
        let b = bigint_entry(vec![1], None);
        let err = bin_op_vv_bigint("binopvv", Operator::RotL, &a, &b, None).unwrap_err();
        assert!(matches!(err, KernelError::RotationWithoutWidth { .. }));
    }

    #[test]
    fn rotation_round_trips_within_width() {
        let a = bigint_entry(vec![0b1011], Some(4));
        let s = bigint_entry(vec![3], None);
        let left = bin_op_vv_bigint("binopvv", Operator::RotL, &a, &s, Some(4)).unwrap();
        let back = bin_op_vv_bigint("binopvv", Operator::RotR, &left, &s, Some(4)).unwrap();
        assert_eq!(back.buffer, ArrayBuffer::BigInt(vec![BigInt::from(0b1011)]));
    }

    #[test]
    fn negative_exponent_is_rejected() {
        let a = bigint_entry(vec![2], None);
        let b = bigint_entry(vec![-1], None);
        let err = bin_op_vv_bigint("binopvv", Operator::Pow, &a, &b, None).unwrap_err();
        assert!(matches!(err, KernelError::NegativeExponent { .. }));
    }

    #[test]
    fn division_by_zero_lane_is_zero() {
        let a = bigint_entry(vec![7, 9], None);
        let b = bigint_entry(vec![0, 3], None);
        let out = bin_op_vv_bigint("binopvv", Operator::TrueDiv, &a, &b, None).unwrap();
        assert_eq!(
            out.buffer,
            ArrayBuffer::BigInt(vec![BigInt::from(0), BigInt::from(3)])
        );
    }

    #[test]
    fn rotation_error_is_reported_under_the_calling_routine_name() {
        let a = bigint_entry(vec![5], None);
        let b = bigint_entry(vec![1], None);
        let err = bin_op_vv_bigint("opeqvv", Operator::RotL, &a, &b, None).unwrap_err();
        assert!(err.to_string().contains("opeqvv"));
    }
}
