//! Bounded min/max clip: `clip(a, min, max)[i] = min(max(a[i], lo), hi)`.
//!
//! Four variants exist depending on whether `min`/`max` are scalars or
//! arrays. The original system conflated these into one routine with a
//! `hasMin`/`hasMax` pair of flags that could be mismatched on one code
//! path; this crate instead gives each combination its own entry point
//! so the dispatcher picks the right one by inspecting argument shapes,
//! with no flag state to get out of sync.

use crate::array::{ArrayBuffer, ArrayEntry, LaneCast};
use crate::dtype::DType;
use crate::error::{KernelError, KernelResult};
use crate::lane::NumericLane;
use crate::scalar::Scalar;
use crate::with_real_result;
use rayon::prelude::*;

const ROUTINE: &str = "clip";

fn check_dtype(d: DType) -> KernelResult<()> {
    if d.is_integer() || d.is_bool() || d == DType::Float64 {
        Ok(())
    } else {
        Err(KernelError::unsupported_type_combination(
            ROUTINE, d, "clip", d,
        ))
    }
}

fn clamp<T: NumericLane>(v: T, lo: T, hi: T) -> T {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

fn clamp_bool(v: bool, lo: bool, hi: bool) -> bool {
    v.max(lo).min(hi)
}

fn bool_vec(buf: &ArrayBuffer) -> Vec<bool> {
    match buf {
        ArrayBuffer::Bool(v) => v.clone(),
        other => unreachable!("clip: non-bool buffer {:?} on a Bool array", other.dtype()),
    }
}

/// scalar min, scalar max.
pub fn clip_ss(a: &ArrayEntry, min: &Scalar, max: &Scalar) -> KernelResult<ArrayEntry> {
    check_dtype(a.dtype)?;
    let buffer = if a.dtype == DType::Bool {
        let lo = min.as_bool().unwrap_or(false);
        let hi = max.as_bool().unwrap_or(true);
        ArrayBuffer::Bool(
            bool_vec(&a.buffer)
                .into_par_iter()
                .map(|v| clamp_bool(v, lo, hi))
                .collect(),
        )
    } else {
        with_real_result!(a.dtype, T => {
            let av = T::extract(&a.buffer);
            let lo: T = min.cast_lane();
            let hi: T = max.cast_lane();
            av.into_par_iter().map(|v| clamp(v, lo, hi)).collect::<Vec<T>>()
        })
    };
    Ok(ArrayEntry::new(a.dtype, a.shape.clone(), buffer).with_max_bits(a.max_bits))
}

/// scalar min, array max.
pub fn clip_sa(a: &ArrayEntry, min: &Scalar, max: &ArrayEntry) -> KernelResult<ArrayEntry> {
    check_dtype(a.dtype)?;
    let buffer = if a.dtype == DType::Bool {
        let lo = min.as_bool().unwrap_or(false);
        let hiv = bool_vec(&max.buffer);
        ArrayBuffer::Bool(
            bool_vec(&a.buffer)
                .into_par_iter()
                .zip(hiv.into_par_iter())
                .map(|(v, hi)| clamp_bool(v, lo, hi))
                .collect(),
        )
    } else {
        with_real_result!(a.dtype, T => {
            let av = T::extract(&a.buffer);
            let lo: T = min.cast_lane();
            let hiv = T::extract(&max.buffer);
            av.into_par_iter()
                .zip(hiv.into_par_iter())
                .map(|(v, hi): (T, T)| clamp(v, lo, hi))
                .collect::<Vec<T>>()
        })
    };
    Ok(ArrayEntry::new(a.dtype, a.shape.clone(), buffer).with_max_bits(a.max_bits))
}

/// array min, scalar max.
pub fn clip_as(a: &ArrayEntry, min: &ArrayEntry, max: &Scalar) -> KernelResult<ArrayEntry> {
    check_dtype(a.dtype)?;
    let buffer = if a.dtype == DType::Bool {
        let lov = bool_vec(&min.buffer);
        let hi = max.as_bool().unwrap_or(true);
        ArrayBuffer::Bool(
            bool_vec(&a.buffer)
                .into_par_iter()
                .zip(lov.into_par_iter())
                .map(|(v, lo)| clamp_bool(v, lo, hi))
                .collect(),
        )
    } else {
        with_real_result!(a.dtype, T => {
            let av = T::extract(&a.buffer);
            let lov = T::extract(&min.buffer);
            let hi: T = max.cast_lane();
            av.into_par_iter()
                .zip(lov.into_par_iter())
                .map(|(v, lo): (T, T)| clamp(v, lo, hi))
                .collect::<Vec<T>>()
        })
    };
    Ok(ArrayEntry::new(a.dtype, a.shape.clone(), buffer).with_max_bits(a.max_bits))
}

/// array min, array max.
pub fn clip_aa(a: &ArrayEntry, min: &ArrayEntry, max: &ArrayEntry) -> KernelResult<ArrayEntry> {
    check_dtype(a.dtype)?;
    let buffer = if a.dtype == DType::Bool {
        let lov = bool_vec(&min.buffer);
        let hiv = bool_vec(&max.buffer);
        ArrayBuffer::Bool(
            bool_vec(&a.buffer)
                .into_par_iter()
                .zip(lov.into_par_iter().zip(hiv.into_par_iter()))
                .map(|(v, (lo, hi))| clamp_bool(v, lo, hi))
                .collect(),
        )
    } else {
        with_real_result!(a.dtype, T => {
            let av = T::extract(&a.buffer);
            let lov = T::extract(&min.buffer);
            let hiv = T::extract(&max.buffer);
            av.into_par_iter()
                .zip(lov.into_par_iter().zip(hiv.into_par_iter()))
                .map(|(v, (lo, hi)): (T, (T, T))| clamp(v, lo, hi))
                .collect::<Vec<T>>()
        })
    };
    Ok(ArrayEntry::new(a.dtype, a.shape.clone(), buffer).with_max_bits(a.max_bits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_s7_clip_scalar_bounds() {
        let a = ArrayEntry::new(DType::Int64, vec![3], ArrayBuffer::Int64(vec![3, -2, 0]));
        let out = clip_ss(&a, &Scalar::Int(0), &Scalar::Int(2)).unwrap();
        assert_eq!(out.buffer, ArrayBuffer::Int64(vec![2, 0, 0]));
    }

    #[test]
    fn clip_rejects_complex_arrays() {
        use num_complex::Complex;
        let a = ArrayEntry::new(
            DType::Complex128,
            vec![1],
            ArrayBuffer::Complex128(vec![Complex::new(1.0, 0.0)]),
        );
        assert!(clip_ss(&a, &Scalar::Real(0.0), &Scalar::Real(1.0)).is_err());
    }

    #[test]
    fn clip_array_bounds_vary_per_lane() {
        let a = ArrayEntry::new(DType::Float64, vec![2], ArrayBuffer::Float64(vec![5.0, -5.0]));
        let lo = ArrayEntry::new(DType::Float64, vec![2], ArrayBuffer::Float64(vec![0.0, -1.0]));
        let hi = ArrayEntry::new(DType::Float64, vec![2], ArrayBuffer::Float64(vec![1.0, 1.0]));
        let out = clip_aa(&a, &lo, &hi).unwrap();
        assert_eq!(out.buffer, ArrayBuffer::Float64(vec![1.0, -1.0]));
    }
}
