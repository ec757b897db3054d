//! Element-type catalog for array-server values.
//!
//! `DType` is a closed tag identifying the element type of an array or
//! scalar. It never grows new concrete variants at runtime: the wire
//! protocol, the promotion algebra, and the kernels all close over the
//! same fixed set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Element-type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Complex64,
    Complex128,
    BigInt,
    Str,
    /// Sentinel for "no dtype" (e.g. an array that failed to resolve).
    Undef,
}

/// Coarse classification used by the promotion algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DTypeKind {
    Integer,
    Float,
    Complex,
    Bool,
    Other,
}

impl DType {
    /// In-memory footprint of one element, in bytes.
    pub fn byte_size(self) -> usize {
        match self {
            DType::Bool | DType::Int8 | DType::UInt8 => 1,
            DType::Int16 | DType::UInt16 => 2,
            DType::Int32 | DType::UInt32 | DType::Float32 => 4,
            DType::Int64 | DType::UInt64 | DType::Float64 => 8,
            DType::Complex64 => 8,
            DType::Complex128 => 16,
            // Arbitrary-precision; reported as a nominal estimate only.
            DType::BigInt => 16,
            DType::Undef | DType::Str => 0,
        }
    }

    /// Coarse scalar-kind classification used by the promotion tables.
    pub fn kind(self) -> DTypeKind {
        match self {
            DType::Bool => DTypeKind::Bool,
            DType::Int8
            | DType::Int16
            | DType::Int32
            | DType::Int64
            | DType::UInt8
            | DType::UInt16
            | DType::UInt32
            | DType::UInt64
            | DType::BigInt => DTypeKind::Integer,
            DType::Float32 | DType::Float64 => DTypeKind::Float,
            DType::Complex64 | DType::Complex128 => DTypeKind::Complex,
            DType::Str | DType::Undef => DTypeKind::Other,
        }
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            DType::Int8 | DType::Int16 | DType::Int32 | DType::Int64 | DType::BigInt
        )
    }

    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            DType::UInt8 | DType::UInt16 | DType::UInt32 | DType::UInt64
        )
    }

    pub fn is_integer(self) -> bool {
        matches!(self.kind(), DTypeKind::Integer)
    }

    pub fn is_float(self) -> bool {
        matches!(self.kind(), DTypeKind::Float)
    }

    pub fn is_complex(self) -> bool {
        matches!(self.kind(), DTypeKind::Complex)
    }

    pub fn is_bool(self) -> bool {
        matches!(self, DType::Bool)
    }

    pub fn is_real(self) -> bool {
        matches!(self.kind(), DTypeKind::Integer | DTypeKind::Float | DTypeKind::Bool)
    }

    /// Parse the canonical wire name for a dtype, e.g. `"int64"` -> `Int64`.
    pub fn str_to_dtype(s: &str) -> DType {
        match s {
            "bool" => DType::Bool,
            "int8" => DType::Int8,
            "int16" => DType::Int16,
            "int32" => DType::Int32,
            "int64" => DType::Int64,
            "uint8" => DType::UInt8,
            "uint16" => DType::UInt16,
            "uint32" => DType::UInt32,
            "uint64" => DType::UInt64,
            "float32" => DType::Float32,
            "float64" => DType::Float64,
            "complex64" => DType::Complex64,
            "complex128" => DType::Complex128,
            "bigint" => DType::BigInt,
            "str" => DType::Str,
            _ => DType::Undef,
        }
    }

    /// Canonical wire name for a dtype. Round-trips with `str_to_dtype` for
    /// every concrete (non-`Undef`) variant.
    pub fn dtype_to_str(self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::Int8 => "int8",
            DType::Int16 => "int16",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::UInt8 => "uint8",
            DType::UInt16 => "uint16",
            DType::UInt32 => "uint32",
            DType::UInt64 => "uint64",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::Complex64 => "complex64",
            DType::Complex128 => "complex128",
            DType::BigInt => "bigint",
            DType::Str => "str",
            DType::Undef => "undef",
        }
    }

    /// The operand with the greater byte size; `a` wins on a tie.
    pub fn max_dtype(a: DType, b: DType) -> DType {
        if b.byte_size() > a.byte_size() {
            b
        } else {
            a
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dtype_to_str())
    }
}
