//! Type-promotion algebra and elementwise binary-operation kernel for
//! a distributed array server's numeric core.

pub mod array;
pub mod dispatch;
pub mod dtype;
pub mod error;
pub mod kernel;
pub mod lane;
pub mod math;
pub mod operator;
pub mod promotion;
pub mod scalar;

pub mod prelude {
    pub use crate::array::{ArrayBuffer, ArrayEntry, LaneCast};
    pub use crate::dispatch::{binop_sv, binop_vs, binop_vv, compound_assign_allowed, opeq_vs, opeq_vv};
    pub use crate::dtype::{DType, DTypeKind};
    pub use crate::error::{KernelError, KernelResult};
    pub use crate::operator::{is_valid_operator, OpCategory, Operator};
    pub use crate::promotion::{common_dtype, div_dtype};
    pub use crate::scalar::Scalar;
}

pub use prelude::*;
