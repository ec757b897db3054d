//! Per-element ("lane") numeric traits the generic kernels are bounded
//! by, plus the `with_int_lane!` / `with_real_lane!` macros that turn a
//! runtime `DType` into a compile-time `T` for one match arm.
//!
//! This is the mechanism that keeps the kernels monomorphic: each
//! category implementation is written once, generic over `T: ...Lane`,
//! and the macros below generate the dtype-to-`T` dispatch, compiling
//! one specialization per concrete type instead of dispatching at
//! runtime.

/// Common ground for every fixed-width numeric lane (signed, unsigned,
/// and float): wrapping arithmetic plus a lossy real-valued view used by
/// the mixed-kind promotion paths (`floor_div`/`modulo`/comparisons).
pub trait NumericLane: Copy + Send + Sync + PartialOrd + 'static {
    const ZERO: Self;
    fn add_w(self, other: Self) -> Self;
    fn sub_w(self, other: Self) -> Self;
    fn mul_w(self, other: Self) -> Self;
    fn to_f64(self) -> f64;
    fn from_f64(v: f64) -> Self;
    /// Exact (non-lossy, wrapping-on-narrow) conversion from a signed
    /// scalar, used instead of `from_f64` wherever full `i64` precision
    /// matters (e.g. widening a scalar operand into a `BigInt`-adjacent
    /// integer lane).
    fn from_i64(v: i64) -> Self;
    fn from_u64(v: u64) -> Self;
    fn is_zero(self) -> bool {
        self.to_f64() == 0.0
    }
}

/// Integer-only lanes: division/remainder with an explicit zero policy,
/// wrapping power, bitwise logic, shifts, and rotation.
pub trait IntegerLane: NumericLane + Eq + Ord {
    fn div_w(self, other: Self) -> Self;
    fn rem_w(self, other: Self) -> Self;
    fn pow_w(self, exp: u32) -> Self;
    fn bitand_w(self, other: Self) -> Self;
    fn bitor_w(self, other: Self) -> Self;
    fn bitxor_w(self, other: Self) -> Self;
    fn shl_w(self, amount: u32) -> Self;
    fn shr_w(self, amount: u32) -> Self;
    fn rotate_left_w(self, amount: u32) -> Self;
    fn rotate_right_w(self, amount: u32) -> Self;
    fn is_negative(self) -> bool;
    fn bits() -> u32;
}

/// Float-only lanes.
pub trait FloatLane: NumericLane {
    fn div_f(self, other: Self) -> Self;
    fn powf_w(self, exp: Self) -> Self;
    fn powi_w(self, exp: i32) -> Self;
}

macro_rules! impl_numeric_lane_int {
    ($t:ty) => {
        impl NumericLane for $t {
            const ZERO: Self = 0;
            fn add_w(self, other: Self) -> Self {
                self.wrapping_add(other)
            }
            fn sub_w(self, other: Self) -> Self {
                self.wrapping_sub(other)
            }
            fn mul_w(self, other: Self) -> Self {
                self.wrapping_mul(other)
            }
            fn to_f64(self) -> f64 {
                self as f64
            }
            fn from_f64(v: f64) -> Self {
                v as $t
            }
            fn from_i64(v: i64) -> Self {
                v as $t
            }
            fn from_u64(v: u64) -> Self {
                v as $t
            }
        }
    };
}

macro_rules! impl_integer_lane {
    ($t:ty, $signed:expr) => {
        impl_numeric_lane_int!($t);
        impl IntegerLane for $t {
            fn div_w(self, other: Self) -> Self {
                self.wrapping_div(other)
            }
            fn rem_w(self, other: Self) -> Self {
                self.wrapping_rem(other)
            }
            fn pow_w(self, exp: u32) -> Self {
                self.wrapping_pow(exp)
            }
            fn bitand_w(self, other: Self) -> Self {
                self & other
            }
            fn bitor_w(self, other: Self) -> Self {
                self | other
            }
            fn bitxor_w(self, other: Self) -> Self {
                self ^ other
            }
            fn shl_w(self, amount: u32) -> Self {
                self.wrapping_shl(amount)
            }
            fn shr_w(self, amount: u32) -> Self {
                self.wrapping_shr(amount)
            }
            fn rotate_left_w(self, amount: u32) -> Self {
                self.rotate_left(amount)
            }
            fn rotate_right_w(self, amount: u32) -> Self {
                self.rotate_right(amount)
            }
            fn is_negative(self) -> bool {
                #[allow(unused_comparisons)]
                {
                    $signed && self < 0
                }
            }
            fn bits() -> u32 {
                (std::mem::size_of::<$t>() * 8) as u32
            }
        }
    };
}

impl_integer_lane!(u8, false);
impl_integer_lane!(u16, false);
impl_integer_lane!(u32, false);
impl_integer_lane!(u64, false);
impl_integer_lane!(i8, true);
impl_integer_lane!(i16, true);
impl_integer_lane!(i32, true);
impl_integer_lane!(i64, true);

macro_rules! impl_float_lane {
    ($t:ty) => {
        impl NumericLane for $t {
            const ZERO: Self = 0.0;
            fn add_w(self, other: Self) -> Self {
                self + other
            }
            fn sub_w(self, other: Self) -> Self {
                self - other
            }
            fn mul_w(self, other: Self) -> Self {
                self * other
            }
            fn to_f64(self) -> f64 {
                self as f64
            }
            fn from_f64(v: f64) -> Self {
                v as $t
            }
            fn from_i64(v: i64) -> Self {
                v as $t
            }
            fn from_u64(v: u64) -> Self {
                v as $t
            }
        }
        impl FloatLane for $t {
            fn div_f(self, other: Self) -> Self {
                self / other
            }
            fn powf_w(self, exp: Self) -> Self {
                self.powf(exp)
            }
            fn powi_w(self, exp: i32) -> Self {
                self.powi(exp)
            }
        }
    };
}

impl_float_lane!(f32);
impl_float_lane!(f64);

/// Evaluate `$body` with `$T` bound to the Rust primitive type matching
/// `$dtype`, for every integer lane (`Bool` included, pre-widened to
/// `i8` by the caller via `special_bool` promotion). Panics on a
/// non-integer dtype: callers only reach this after the dispatcher has
/// already checked the category/dtype combination.
#[macro_export]
macro_rules! with_int_lane {
    ($dtype:expr, $T:ident => $body:expr) => {
        match $dtype {
            $crate::dtype::DType::UInt8 => {
                type $T = u8;
                $body
            }
            $crate::dtype::DType::UInt16 => {
                type $T = u16;
                $body
            }
            $crate::dtype::DType::UInt32 => {
                type $T = u32;
                $body
            }
            $crate::dtype::DType::UInt64 => {
                type $T = u64;
                $body
            }
            $crate::dtype::DType::Int8 => {
                type $T = i8;
                $body
            }
            $crate::dtype::DType::Int16 => {
                type $T = i16;
                $body
            }
            $crate::dtype::DType::Int32 => {
                type $T = i32;
                $body
            }
            $crate::dtype::DType::Int64 => {
                type $T = i64;
                $body
            }
            other => unreachable!("with_int_lane: non-integer dtype {other:?} reached a kernel"),
        }
    };
}

/// Like `with_int_lane!`, but also covers the two float lanes (for
/// categories that accept real operands, e.g. `FancyArithmetic`).
#[macro_export]
macro_rules! with_real_lane {
    ($dtype:expr, $T:ident => $body:expr) => {
        match $dtype {
            $crate::dtype::DType::Float32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::DType::Float64 => {
                type $T = f64;
                $body
            }
            other => $crate::with_int_lane!(other, $T => $body),
        }
    };
}

/// Like `with_int_lane!`, but `$body` produces a `Vec<$T>` that is
/// immediately wrapped in the `ArrayBuffer` variant matching `$dtype`.
#[macro_export]
macro_rules! with_int_result {
    ($dtype:expr, $T:ident => $body:expr) => {
        match $dtype {
            $crate::dtype::DType::UInt8 => {
                type $T = u8;
                $crate::array::ArrayBuffer::UInt8($body)
            }
            $crate::dtype::DType::UInt16 => {
                type $T = u16;
                $crate::array::ArrayBuffer::UInt16($body)
            }
            $crate::dtype::DType::UInt32 => {
                type $T = u32;
                $crate::array::ArrayBuffer::UInt32($body)
            }
            $crate::dtype::DType::UInt64 => {
                type $T = u64;
                $crate::array::ArrayBuffer::UInt64($body)
            }
            $crate::dtype::DType::Int8 => {
                type $T = i8;
                $crate::array::ArrayBuffer::Int8($body)
            }
            $crate::dtype::DType::Int16 => {
                type $T = i16;
                $crate::array::ArrayBuffer::Int16($body)
            }
            $crate::dtype::DType::Int32 => {
                type $T = i32;
                $crate::array::ArrayBuffer::Int32($body)
            }
            $crate::dtype::DType::Int64 => {
                type $T = i64;
                $crate::array::ArrayBuffer::Int64($body)
            }
            other => unreachable!("with_int_result: non-integer dtype {other:?} reached a kernel"),
        }
    };
}

/// Like `with_int_result!`, but also covers the two float lanes.
#[macro_export]
macro_rules! with_real_result {
    ($dtype:expr, $T:ident => $body:expr) => {
        match $dtype {
            $crate::dtype::DType::Float32 => {
                type $T = f32;
                $crate::array::ArrayBuffer::Float32($body)
            }
            $crate::dtype::DType::Float64 => {
                type $T = f64;
                $crate::array::ArrayBuffer::Float64($body)
            }
            other => $crate::with_int_result!(other, $T => $body),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_arithmetic_matches_numpy_overflow_policy() {
        assert_eq!(u8::MAX.add_w(1), 0);
        assert_eq!(0i8.sub_w(1).add_w(u8::MAX as i8), -2);
    }

    #[test]
    fn rotate_round_trips() {
        let x: u32 = 0b1011;
        let rotated = x.rotate_left_w(3).rotate_right_w(3);
        assert_eq!(rotated, x);
    }

    #[test]
    fn lane_macro_picks_correct_width() {
        use crate::dtype::DType;
        let bits = with_int_lane!(DType::Int16, T => T::bits());
        assert_eq!(bits, 16);
    }
}
