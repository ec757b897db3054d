//! Error taxonomy for the promotion algebra and elementwise kernels.

use crate::dtype::DType;
use thiserror::Error;

/// Errors the kernel layer can raise. Precondition failures (bad
/// operator, negative exponent, rotation without a width) are caught
/// before any lane of the result is written; per-lane arithmetic hazards
/// (division by zero) are not represented here because they are not
/// errors — see `KernelError` doc on `UnsupportedTypeCombination` and
/// the module-level design notes.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KernelError {
    /// `op` is not one of the closed operator strings.
    #[error("Error: {routine}: unrecognized operator '{op}'")]
    UnsupportedOperator { routine: String, op: String },

    /// The `(lt, op, rt)` triple has no legal specialization at all
    /// (e.g. a bitwise op on `Str`, or a bigint kernel fed a complex
    /// operand).
    #[error("Error: {routine}: not implemented for ({lt}, {op}, {rt})")]
    UnsupportedTypeCombination {
        routine: String,
        lt: DType,
        op: String,
        rt: DType,
    },

    /// The caller supplied (or the dispatcher computed) a result buffer
    /// whose dtype does not equal the promoted type for this operator.
    #[error("Error: {routine}: unrecognized type ({lt}, {rt})")]
    UnsupportedResultTypeForOperator {
        routine: String,
        lt: DType,
        rt: DType,
    },

    /// `**` with a negative integer exponent and an integer base that
    /// cannot represent the result.
    #[error("Attempt to exponentiate base of type {base_ty} to negative exponent")]
    NegativeExponent { base_ty: DType },

    /// A bigint rotation (`<<< >>>`) was requested on an array with no
    /// `max_bits`, so there is no well-defined width to rotate within.
    #[error("Error: {routine}: rotation requires a bounded max_bits, got unbounded {dtype}")]
    RotationWithoutWidth { routine: String, dtype: DType },

    /// A symbol-table lookup for `name` found nothing.
    #[error("Error: unknown symbol '{name}'")]
    UndefinedSymbol { name: String },

    /// Operand shapes did not match (operands are assumed same-shape;
    /// this crate does not broadcast).
    #[error("Error: shape mismatch: {lhs:?} vs {rhs:?}")]
    ShapeMismatch { lhs: Vec<usize>, rhs: Vec<usize> },
}

pub type KernelResult<T> = Result<T, KernelError>;

impl KernelError {
    pub fn unsupported_type_combination(
        routine: impl Into<String>,
        lt: DType,
        op: impl Into<String>,
        rt: DType,
    ) -> Self {
        KernelError::UnsupportedTypeCombination {
            routine: routine.into(),
            lt,
            op: op.into(),
            rt,
        }
    }

    pub fn unsupported_result_type(routine: impl Into<String>, lt: DType, rt: DType) -> Self {
        KernelError::UnsupportedResultTypeForOperator {
            routine: routine.into(),
            lt,
            rt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_message_templates_match_spec() {
        let err = KernelError::unsupported_type_combination(
            "binopvv",
            DType::Str,
            "&",
            DType::Str,
        );
        assert_eq!(
            err.to_string(),
            "Error: binopvv: not implemented for (str, &, str)"
        );

        let err = KernelError::NegativeExponent {
            base_ty: DType::Int64,
        };
        assert_eq!(
            err.to_string(),
            "Attempt to exponentiate base of type int64 to negative exponent"
        );
    }
}
