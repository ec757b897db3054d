//! Elementwise kernel families: non-bigint (`bin_op_vv`), comparison
//! (`bin_op_cmp`), and bigint (`bin_op_vv_bigint`). Scalar/broadcast
//! variants and compound-assign live in their own submodules since they
//! share the same per-category logic through the array-array kernels.

pub mod bigint;
pub mod clip;
pub mod comparison;
pub mod compound_assign;
pub mod non_bigint;
pub mod scalar_variants;

pub use bigint::{bin_op_bigint_cmp, bin_op_vv_bigint};
pub use clip::{clip_aa, clip_as, clip_sa, clip_ss};
pub use comparison::bin_op_cmp;
pub use compound_assign::{compound_assign_legal, op_eq_vs, op_eq_vv};
pub use non_bigint::bin_op_vv;
pub use scalar_variants::{bin_op_sv, bin_op_vs};
