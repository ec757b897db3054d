//! Array-array elementwise kernel for every category except bigint and
//! comparison (which return a boolean result and live in
//! `comparison.rs`).

use crate::array::{extract_complex128, ArrayBuffer, ArrayEntry, LaneCast};
use crate::dtype::DType;
use crate::error::{KernelError, KernelResult};
use crate::lane::{FloatLane, IntegerLane, NumericLane};
use crate::math::{floor_div, modulo};
use crate::operator::{OpCategory, Operator};
use crate::{with_int_result, with_real_result};
use num_complex::Complex;
use rayon::prelude::*;

/// Dispatch `l op r` for every non-bigint, non-comparison category.
/// `routine` is the command name reported in any type-combination error
/// (`"binopvv"`, `"binopvs"`, `"binopsv"`, `"opeqvv"`, `"opeqvs"`), so the
/// client sees the command it actually issued rather than a fixed name.
pub fn bin_op_vv(routine: &str, op: Operator, l: &ArrayEntry, r: &ArrayEntry) -> KernelResult<ArrayEntry> {
    if l.shape != r.shape {
        return Err(KernelError::ShapeMismatch {
            lhs: l.shape.clone(),
            rhs: r.shape.clone(),
        });
    }
    let (lt, rt) = (l.dtype, r.dtype);
    let buffer = match op.category() {
        OpCategory::BitwiseLogic => bitwise_logic(routine, op, lt, rt, &l.buffer, &r.buffer)?,
        OpCategory::BitwiseShift => bitwise_shift(routine, op, lt, rt, &l.buffer, &r.buffer)?,
        OpCategory::BitwiseRot => bitwise_rot(routine, op, lt, rt, &l.buffer, &r.buffer)?,
        OpCategory::BasicArithmetic => basic_arithmetic(routine, op, lt, rt, &l.buffer, &r.buffer)?,
        OpCategory::FancyArithmetic => fancy_arithmetic(routine, op, lt, rt, &l.buffer, &r.buffer)?,
        OpCategory::TrueDivision => true_division(routine, lt, rt, &l.buffer, &r.buffer)?,
        OpCategory::Comparison => {
            unreachable!("bin_op_vv: comparisons are routed through bin_op_cmp")
        }
    };
    Ok(ArrayEntry::new(buffer.dtype(), l.shape.clone(), buffer))
}

fn bitwise_logic(
    routine: &str,
    op: Operator,
    lt: DType,
    rt: DType,
    lbuf: &ArrayBuffer,
    rbuf: &ArrayBuffer,
) -> KernelResult<ArrayBuffer> {
    if !(lt.is_integer() || lt.is_bool()) || !(rt.is_integer() || rt.is_bool()) {
        return Err(KernelError::unsupported_type_combination(
            routine,
            lt,
            op.as_str(),
            rt,
        ));
    }
    let et = crate::promotion::common_dtype(lt, rt, false);
    if !(et.is_integer() || et == DType::Bool) {
        // mixed signed/unsigned promotes to Float64, which has no bitwise
        // meaning; reject rather than reinterpreting float bits.
        return Err(KernelError::unsupported_type_combination(
            routine,
            lt,
            op.as_str(),
            rt,
        ));
    }
    if et == DType::Bool {
        let lv = bool::extract_bool(lbuf);
        let rv = bool::extract_bool(rbuf);
        let out = lv
            .into_par_iter()
            .zip(rv.into_par_iter())
            .map(|(a, b)| match op {
                Operator::BitOr => a | b,
                Operator::BitAnd => a & b,
                Operator::BitXor => a ^ b,
                _ => unreachable!(),
            })
            .collect();
        return Ok(ArrayBuffer::Bool(out));
    }
    Ok(with_int_result!(et, T => {
        let lv = T::extract(lbuf);
        let rv = T::extract(rbuf);
        lv.into_par_iter()
            .zip(rv.into_par_iter())
            .map(|(a, b): (T, T)| match op {
                Operator::BitOr => a.bitor_w(b),
                Operator::BitAnd => a.bitand_w(b),
                Operator::BitXor => a.bitxor_w(b),
                _ => unreachable!(),
            })
            .collect::<Vec<T>>()
    }))
}

fn bitwise_shift(
    routine: &str,
    op: Operator,
    lt: DType,
    rt: DType,
    lbuf: &ArrayBuffer,
    rbuf: &ArrayBuffer,
) -> KernelResult<ArrayBuffer> {
    let et = crate::promotion::common_dtype(lt, rt, true);
    if et.is_float() || et.is_complex() || et == DType::Undef {
        return Err(KernelError::unsupported_type_combination(
            routine,
            lt,
            op.as_str(),
            rt,
        ));
    }
    let amounts = i64::extract(rbuf);
    Ok(with_int_result!(et, T => {
        let lv = T::extract(lbuf);
        lv.into_par_iter()
            .zip(amounts.par_iter())
            .map(|(a, &amt): (T, &i64)| {
                if !(0..64).contains(&amt) {
                    T::ZERO
                } else {
                    match op {
                        Operator::Shl => a.shl_w(amt as u32),
                        Operator::Shr => a.shr_w(amt as u32),
                        _ => unreachable!(),
                    }
                }
            })
            .collect::<Vec<T>>()
    }))
}

fn bitwise_rot(
    routine: &str,
    op: Operator,
    lt: DType,
    rt: DType,
    lbuf: &ArrayBuffer,
    rbuf: &ArrayBuffer,
) -> KernelResult<ArrayBuffer> {
    if !(lt.is_integer() || lt.is_bool()) || !(rt.is_integer() || rt.is_bool()) {
        return Err(KernelError::unsupported_type_combination(
            routine,
            lt,
            op.as_str(),
            rt,
        ));
    }
    let et = crate::promotion::common_dtype(lt, rt, false);
    if !et.is_integer() {
        return Err(KernelError::unsupported_type_combination(
            routine,
            lt,
            op.as_str(),
            rt,
        ));
    }
    let amounts = i64::extract(rbuf);
    Ok(with_int_result!(et, T => {
        let lv = T::extract(lbuf);
        let bits = T::bits();
        lv.into_par_iter()
            .zip(amounts.par_iter())
            .map(|(a, &amt): (T, &i64)| {
                let s = amt.rem_euclid(bits as i64) as u32;
                match op {
                    Operator::RotL => a.rotate_left_w(s),
                    Operator::RotR => a.rotate_right_w(s),
                    _ => unreachable!(),
                }
            })
            .collect::<Vec<T>>()
    }))
}

fn basic_arithmetic(
    routine: &str,
    op: Operator,
    lt: DType,
    rt: DType,
    lbuf: &ArrayBuffer,
    rbuf: &ArrayBuffer,
) -> KernelResult<ArrayBuffer> {
    if lt.is_bool() && rt.is_bool() {
        return Err(KernelError::unsupported_type_combination(
            routine,
            lt,
            op.as_str(),
            rt,
        ));
    }
    let et = crate::promotion::common_dtype(lt, rt, false);
    if et.is_complex() {
        let lv = extract_complex128(lbuf);
        let rv = extract_complex128(rbuf);
        let out: Vec<Complex<f64>> = lv
            .into_par_iter()
            .zip(rv.into_par_iter())
            .map(|(a, b)| match op {
                Operator::Add => a + b,
                Operator::Sub => a - b,
                Operator::Mul => a * b,
                _ => unreachable!(),
            })
            .collect();
        return Ok(downcast_complex(et, out));
    }
    if et == DType::Undef {
        return Err(KernelError::unsupported_type_combination(
            routine,
            lt,
            op.as_str(),
            rt,
        ));
    }
    Ok(with_real_result!(et, T => {
        let lv = T::extract(lbuf);
        let rv = T::extract(rbuf);
        lv.into_par_iter()
            .zip(rv.into_par_iter())
            .map(|(a, b): (T, T)| match op {
                Operator::Add => a.add_w(b),
                Operator::Sub => a.sub_w(b),
                Operator::Mul => a.mul_w(b),
                _ => unreachable!(),
            })
            .collect::<Vec<T>>()
    }))
}

fn fancy_arithmetic(
    routine: &str,
    op: Operator,
    lt: DType,
    rt: DType,
    lbuf: &ArrayBuffer,
    rbuf: &ArrayBuffer,
) -> KernelResult<ArrayBuffer> {
    let et = crate::promotion::common_dtype(lt, rt, true);

    if et.is_complex() {
        if op != Operator::Pow {
            return Err(KernelError::unsupported_type_combination(
                routine,
                lt,
                op.as_str(),
                rt,
            ));
        }
        let lv = extract_complex128(lbuf);
        let rv = extract_complex128(rbuf);
        let out: Vec<Complex<f64>> = lv
            .into_par_iter()
            .zip(rv.into_par_iter())
            .map(|(a, b)| a.powc(b))
            .collect();
        return Ok(downcast_complex(et, out));
    }

    if et.is_integer() {
        let leff = if lt.is_bool() { DType::Int8 } else { lt };
        let reff = if rt.is_bool() { DType::Int8 } else { rt };
        let same_signedness = leff.is_signed() == reff.is_signed();

        if op == Operator::Pow {
            if !same_signedness {
                return Err(KernelError::unsupported_type_combination(
                    routine, lt, "**", rt,
                ));
            }
            let exps = i64::extract(rbuf);
            if exps.iter().any(|&e| e < 0) {
                return Err(KernelError::NegativeExponent { base_ty: et });
            }
            return Ok(with_int_result!(et, T => {
                let lv = T::extract(lbuf);
                lv.into_par_iter()
                    .zip(exps.par_iter())
                    .map(|(a, &e): (T, &i64)| a.pow_w(e as u32))
                    .collect::<Vec<T>>()
            }));
        }

        if same_signedness {
            return Ok(with_int_result!(et, T => {
                let lv = T::extract(lbuf);
                let rv = T::extract(rbuf);
                lv.into_par_iter()
                    .zip(rv.into_par_iter())
                    .map(|(a, b): (T, T)| {
                        if b.is_zero() {
                            T::ZERO
                        } else {
                            match op {
                                Operator::FloorDiv => a.div_w(b),
                                Operator::Mod => a.rem_w(b),
                                _ => unreachable!(),
                            }
                        }
                    })
                    .collect::<Vec<T>>()
            }));
        }

        // mixed signed/unsigned: real-valued floor_div/modulo, cast back.
        let lv = f64::extract(lbuf);
        let rv = f64::extract(rbuf);
        return Ok(with_int_result!(et, T => {
            lv.par_iter()
                .zip(rv.par_iter())
                .map(|(&a, &b): (&f64, &f64)| {
                    let v = match op {
                        Operator::FloorDiv => floor_div(a, b),
                        Operator::Mod => modulo(a, b),
                        _ => unreachable!(),
                    };
                    T::from_f64(v)
                })
                .collect::<Vec<T>>()
        }));
    }

    // real (float) involved
    Ok(with_real_result!(et, T => {
        let lv = T::extract(lbuf);
        let rv = T::extract(rbuf);
        lv.into_par_iter()
            .zip(rv.into_par_iter())
            .map(|(a, b): (T, T)| match op {
                Operator::FloorDiv => T::from_f64(floor_div(a.to_f64(), b.to_f64())),
                Operator::Mod => T::from_f64(modulo(a.to_f64(), b.to_f64())),
                Operator::Pow => T::from_f64(a.to_f64().powf(b.to_f64())),
                _ => unreachable!(),
            })
            .collect::<Vec<T>>()
    }))
}

fn true_division(
    routine: &str,
    lt: DType,
    rt: DType,
    lbuf: &ArrayBuffer,
    rbuf: &ArrayBuffer,
) -> KernelResult<ArrayBuffer> {
    let et = crate::promotion::div_dtype(lt, rt);
    if et == DType::Undef {
        return Err(KernelError::unsupported_type_combination(
            routine, lt, "/", rt,
        ));
    }
    if et.is_complex() {
        let lv = extract_complex128(lbuf);
        let rv = extract_complex128(rbuf);
        let out: Vec<Complex<f64>> = lv
            .into_par_iter()
            .zip(rv.into_par_iter())
            .map(|(a, b)| a / b)
            .collect();
        return Ok(downcast_complex(et, out));
    }
    Ok(with_real_result!(et, T => {
        let lv = T::extract(lbuf);
        let rv = T::extract(rbuf);
        lv.into_par_iter()
            .zip(rv.into_par_iter())
            .map(|(a, b): (T, T)| a.div_f(b))
            .collect::<Vec<T>>()
    }))
}

fn downcast_complex(et: DType, values: Vec<Complex<f64>>) -> ArrayBuffer {
    match et {
        DType::Complex64 => ArrayBuffer::Complex64(
            values
                .into_iter()
                .map(|c| Complex::new(c.re as f32, c.im as f32))
                .collect(),
        ),
        _ => ArrayBuffer::Complex128(values),
    }
}

/// `bool` has no `LaneCast`/`NumericLane` impl (it is not a numeric
/// lane: it has no wrapping arithmetic). `BitwiseLogic` is the one
/// category whose result can itself be `Bool`, so it gets this small
/// direct extractor instead.
trait BoolExtract {
    fn extract_bool(buf: &ArrayBuffer) -> Vec<bool>;
}

impl BoolExtract for bool {
    fn extract_bool(buf: &ArrayBuffer) -> Vec<bool> {
        match buf {
            ArrayBuffer::Bool(v) => v.clone(),
            other => unreachable!("extract_bool: non-bool buffer {:?}", other.dtype()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::ArrayEntry;

    fn entry_i64(v: Vec<i64>) -> ArrayEntry {
        let len = v.len();
        ArrayEntry::new(DType::Int64, vec![len], ArrayBuffer::Int64(v))
    }

    #[test]
    fn scenario_s1_elementwise_add() {
        let a = entry_i64(vec![1, 2, 3]);
        let b = entry_i64(vec![4, 5, 6]);
        let out = bin_op_vv("binopvv", Operator::Add, &a, &b).unwrap();
        assert_eq!(out.buffer, ArrayBuffer::Int64(vec![5, 7, 9]));
    }

    #[test]
    fn scenario_s2_floor_div_by_zero_is_zero() {
        let a = entry_i64(vec![1, 2, 3]);
        let b = entry_i64(vec![2, 2, 0]);
        let out = bin_op_vv("binopvv", Operator::FloorDiv, &a, &b).unwrap();
        assert_eq!(out.buffer, ArrayBuffer::Int64(vec![0, 1, 0]));
    }

    #[test]
    fn scenario_s3_negative_exponent_errors() {
        let a = entry_i64(vec![7]);
        let b = entry_i64(vec![-2]);
        let err = bin_op_vv("binopvv", Operator::Pow, &a, &b).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Attempt to exponentiate base of type int64 to negative exponent"
        );
    }

    #[test]
    fn scenario_s6_mixed_signedness_widens_to_real() {
        let a = ArrayEntry::new(DType::Int64, vec![1], ArrayBuffer::Int64(vec![5]));
        let b = ArrayEntry::new(DType::UInt64, vec![1], ArrayBuffer::UInt64(vec![2]));
        let out = bin_op_vv("binopvv", Operator::Add, &a, &b).unwrap();
        assert_eq!(out.buffer, ArrayBuffer::Float64(vec![7.0]));
    }

    #[test]
    fn bitwise_logic_rejects_float_operands() {
        let a = ArrayEntry::new(DType::Float64, vec![1], ArrayBuffer::Float64(vec![1.0]));
        let b = ArrayEntry::new(DType::Float64, vec![1], ArrayBuffer::Float64(vec![2.0]));
        assert!(bin_op_vv("binopvv", Operator::BitAnd, &a, &b).is_err());
    }

    #[test]
    fn type_errors_are_reported_under_the_calling_routine_name() {
        let a = ArrayEntry::new(DType::Float64, vec![1], ArrayBuffer::Float64(vec![1.0]));
        let b = ArrayEntry::new(DType::Float64, vec![1], ArrayBuffer::Float64(vec![2.0]));
        let err = bin_op_vv("binopvs", Operator::BitAnd, &a, &b).unwrap_err();
        assert!(err.to_string().starts_with("Error: binopvs: "));
    }
}
