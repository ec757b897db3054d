//! In-memory backing store for a server-resident array: one contiguous
//! `Vec<T>` per concrete dtype, addressed through `ArrayEntry`.
//!
//! A real distributed-array server would shard this buffer across
//! locales; here it stands in as a single-process analogue, with
//! `rayon` providing the data-parallel iteration a multi-locale runtime
//! would otherwise give for free.

use crate::dtype::DType;
use crate::lane::NumericLane;
use num_bigint::BigInt;
use num_complex::Complex;

/// The element storage for one array, tagged by dtype. Each variant's
/// `Vec` is the full flat buffer; `ArrayEntry::shape` gives it meaning.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayBuffer {
    Bool(Vec<bool>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    UInt8(Vec<u8>),
    UInt16(Vec<u16>),
    UInt32(Vec<u32>),
    UInt64(Vec<u64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Complex64(Vec<Complex<f32>>),
    Complex128(Vec<Complex<f64>>),
    BigInt(Vec<BigInt>),
    Str(Vec<String>),
}

impl ArrayBuffer {
    pub fn dtype(&self) -> DType {
        match self {
            ArrayBuffer::Bool(_) => DType::Bool,
            ArrayBuffer::Int8(_) => DType::Int8,
            ArrayBuffer::Int16(_) => DType::Int16,
            ArrayBuffer::Int32(_) => DType::Int32,
            ArrayBuffer::Int64(_) => DType::Int64,
            ArrayBuffer::UInt8(_) => DType::UInt8,
            ArrayBuffer::UInt16(_) => DType::UInt16,
            ArrayBuffer::UInt32(_) => DType::UInt32,
            ArrayBuffer::UInt64(_) => DType::UInt64,
            ArrayBuffer::Float32(_) => DType::Float32,
            ArrayBuffer::Float64(_) => DType::Float64,
            ArrayBuffer::Complex64(_) => DType::Complex64,
            ArrayBuffer::Complex128(_) => DType::Complex128,
            ArrayBuffer::BigInt(_) => DType::BigInt,
            ArrayBuffer::Str(_) => DType::Str,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ArrayBuffer::Bool(v) => v.len(),
            ArrayBuffer::Int8(v) => v.len(),
            ArrayBuffer::Int16(v) => v.len(),
            ArrayBuffer::Int32(v) => v.len(),
            ArrayBuffer::Int64(v) => v.len(),
            ArrayBuffer::UInt8(v) => v.len(),
            ArrayBuffer::UInt16(v) => v.len(),
            ArrayBuffer::UInt32(v) => v.len(),
            ArrayBuffer::UInt64(v) => v.len(),
            ArrayBuffer::Float32(v) => v.len(),
            ArrayBuffer::Float64(v) => v.len(),
            ArrayBuffer::Complex64(v) => v.len(),
            ArrayBuffer::Complex128(v) => v.len(),
            ArrayBuffer::BigInt(v) => v.len(),
            ArrayBuffer::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a zero-filled buffer of `dtype` with `count` elements.
    /// `Str` zero-fills to empty strings; `Undef` has no buffer form.
    pub fn zeros(dtype: DType, count: usize) -> Option<ArrayBuffer> {
        Some(match dtype {
            DType::Bool => ArrayBuffer::Bool(vec![false; count]),
            DType::Int8 => ArrayBuffer::Int8(vec![0; count]),
            DType::Int16 => ArrayBuffer::Int16(vec![0; count]),
            DType::Int32 => ArrayBuffer::Int32(vec![0; count]),
            DType::Int64 => ArrayBuffer::Int64(vec![0; count]),
            DType::UInt8 => ArrayBuffer::UInt8(vec![0; count]),
            DType::UInt16 => ArrayBuffer::UInt16(vec![0; count]),
            DType::UInt32 => ArrayBuffer::UInt32(vec![0; count]),
            DType::UInt64 => ArrayBuffer::UInt64(vec![0; count]),
            DType::Float32 => ArrayBuffer::Float32(vec![0.0; count]),
            DType::Float64 => ArrayBuffer::Float64(vec![0.0; count]),
            DType::Complex64 => ArrayBuffer::Complex64(vec![Complex::new(0.0, 0.0); count]),
            DType::Complex128 => ArrayBuffer::Complex128(vec![Complex::new(0.0, 0.0); count]),
            DType::BigInt => ArrayBuffer::BigInt(vec![BigInt::from(0); count]),
            DType::Str => ArrayBuffer::Str(vec![String::new(); count]),
            DType::Undef => return None,
        })
    }
}

/// A named array resident on the server: its element type, shape, flat
/// storage, and (for `BigInt` arrays only) an optional bit-width bound.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayEntry {
    pub dtype: DType,
    pub shape: Vec<usize>,
    pub buffer: ArrayBuffer,
    /// `Some(bits)` masks every `BigInt` result to `2^bits` and makes
    /// `<<< >>>` well-defined; `None` on every non-`BigInt` array, and
    /// on `BigInt` arrays with no declared width.
    pub max_bits: Option<u32>,
}

impl ArrayEntry {
    pub fn new(dtype: DType, shape: Vec<usize>, buffer: ArrayBuffer) -> Self {
        debug_assert_eq!(buffer.dtype(), dtype);
        debug_assert_eq!(shape.iter().product::<usize>(), buffer.len());
        ArrayEntry {
            dtype,
            shape,
            buffer,
            max_bits: None,
        }
    }

    pub fn with_max_bits(mut self, max_bits: Option<u32>) -> Self {
        self.max_bits = max_bits;
        self
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// Elementwise, `as`-cast extraction of a real numeric buffer into a
/// concrete lane type `Self`. Every non-bigint, non-complex, non-string
/// `ArrayBuffer` variant can be read this way; the dispatcher never
/// calls this on `Complex64/128`, `BigInt`, or `Str` buffers, since
/// those are rejected by the category preconditions before a kernel
/// is reached.
pub trait LaneCast: NumericLane {
    fn extract(buf: &ArrayBuffer) -> Vec<Self>;
}

macro_rules! impl_lane_cast {
    ($t:ty) => {
        impl LaneCast for $t {
            fn extract(buf: &ArrayBuffer) -> Vec<$t> {
                match buf {
                    ArrayBuffer::Bool(v) => v.iter().map(|&x| x as u8 as $t).collect(),
                    ArrayBuffer::Int8(v) => v.iter().map(|&x| x as $t).collect(),
                    ArrayBuffer::Int16(v) => v.iter().map(|&x| x as $t).collect(),
                    ArrayBuffer::Int32(v) => v.iter().map(|&x| x as $t).collect(),
                    ArrayBuffer::Int64(v) => v.iter().map(|&x| x as $t).collect(),
                    ArrayBuffer::UInt8(v) => v.iter().map(|&x| x as $t).collect(),
                    ArrayBuffer::UInt16(v) => v.iter().map(|&x| x as $t).collect(),
                    ArrayBuffer::UInt32(v) => v.iter().map(|&x| x as $t).collect(),
                    ArrayBuffer::UInt64(v) => v.iter().map(|&x| x as $t).collect(),
                    ArrayBuffer::Float32(v) => v.iter().map(|&x| x as $t).collect(),
                    ArrayBuffer::Float64(v) => v.iter().map(|&x| x as $t).collect(),
                    other => unreachable!(
                        "LaneCast::extract: non-numeric buffer {:?} reached a numeric kernel",
                        other.dtype()
                    ),
                }
            }
        }
    };
}

impl_lane_cast!(u8);
impl_lane_cast!(u16);
impl_lane_cast!(u32);
impl_lane_cast!(u64);
impl_lane_cast!(i8);
impl_lane_cast!(i16);
impl_lane_cast!(i32);
impl_lane_cast!(i64);
impl_lane_cast!(f32);
impl_lane_cast!(f64);

/// Widen any real or complex buffer into `Complex<f64>`, putting real
/// values on the real axis with a zero imaginary part. Used by the
/// kernels' complex branches so they only need to implement one
/// precision and downcast the result to `Complex64` if `et` calls for it.
pub fn extract_complex128(buf: &ArrayBuffer) -> Vec<Complex<f64>> {
    match buf {
        ArrayBuffer::Complex64(v) => v.iter().map(|c| Complex::new(c.re as f64, c.im as f64)).collect(),
        ArrayBuffer::Complex128(v) => v.clone(),
        other => f64::extract(other).into_iter().map(|r| Complex::new(r, 0.0)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_cast_widens_every_source_kind() {
        assert_eq!(i32::extract(&ArrayBuffer::Bool(vec![true, false])), vec![1, 0]);
        assert_eq!(
            f64::extract(&ArrayBuffer::Int16(vec![-3, 7])),
            vec![-3.0, 7.0]
        );
    }

    #[test]
    fn zeros_produces_matching_dtype_and_length() {
        let buf = ArrayBuffer::zeros(DType::Int32, 4).unwrap();
        assert_eq!(buf.dtype(), DType::Int32);
        assert_eq!(buf.len(), 4);
        assert!(matches!(buf, ArrayBuffer::Int32(v) if v == vec![0, 0, 0, 0]));
    }

    #[test]
    fn undef_has_no_zero_buffer() {
        assert!(ArrayBuffer::zeros(DType::Undef, 3).is_none());
    }

    #[test]
    fn entry_shape_matches_buffer_length() {
        let entry = ArrayEntry::new(
            DType::Float64,
            vec![2, 3],
            ArrayBuffer::zeros(DType::Float64, 6).unwrap(),
        );
        assert_eq!(entry.len(), 6);
        assert!(entry.max_bits.is_none());
    }
}
