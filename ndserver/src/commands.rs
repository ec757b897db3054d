//! Command handlers: the thin layer between a parsed argument struct
//! and the kernel dispatcher. Each handler looks up its operands in the
//! symbol table, calls into `ndserver_kernel::dispatch`, and wraps the
//! result (or error) in a `ReplyMsg`. No promotion or elementwise logic
//! lives here — that is the kernel's job.

use crate::args::{BinOpArgs, BinOpScalarArgs, ClipArgs, ClipBound};
use crate::envelope::ReplyMsg;
use crate::error::ServerResult;
use crate::symtab::SymbolTable;
use ndserver_kernel::{binop_sv, binop_vs, binop_vv, opeq_vs, opeq_vv};
use ndserver_kernel::kernel::{clip_aa, clip_as, clip_sa, clip_ss};
use tracing::{debug, instrument};

/// `binopvv name = a op b`: allocate a new array for the result and
/// publish it under a fresh server-assigned name.
#[instrument(skip(symtab), fields(op = %args.op))]
pub fn binopvv(symtab: &SymbolTable, args: &BinOpArgs) -> ReplyMsg {
    match run_binopvv(symtab, args) {
        Ok(name) => {
            debug!(result = %name, "binopvv ok");
            ReplyMsg::normal(name)
        }
        Err(e) => e.into(),
    }
}

fn run_binopvv(symtab: &SymbolTable, args: &BinOpArgs) -> ServerResult<String> {
    let a = symtab.lookup(&args.a)?;
    let b = symtab.lookup(&args.b)?;
    let out = binop_vv("binopvv", &args.op, &a, &b)?;
    Ok(symtab.add_entry(out))
}

/// `binopvs name = a op scalar`.
#[instrument(skip(symtab), fields(op = %args.op))]
pub fn binopvs(symtab: &SymbolTable, args: &BinOpScalarArgs) -> ReplyMsg {
    match run_binopvs(symtab, args) {
        Ok(name) => ReplyMsg::normal(name),
        Err(e) => e.into(),
    }
}

fn run_binopvs(symtab: &SymbolTable, args: &BinOpScalarArgs) -> ServerResult<String> {
    let a = symtab.lookup(&args.a)?;
    let scalar = args.scalar()?;
    let out = binop_vs("binopvs", &args.op, &a, &scalar)?;
    Ok(symtab.add_entry(out))
}

/// `binopsv name = scalar op a`.
#[instrument(skip(symtab), fields(op = %args.op))]
pub fn binopsv(symtab: &SymbolTable, args: &BinOpScalarArgs) -> ReplyMsg {
    match run_binopsv(symtab, args) {
        Ok(name) => ReplyMsg::normal(name),
        Err(e) => e.into(),
    }
}

fn run_binopsv(symtab: &SymbolTable, args: &BinOpScalarArgs) -> ServerResult<String> {
    let a = symtab.lookup(&args.a)?;
    let scalar = args.scalar()?;
    let out = binop_sv("binopsv", &args.op, &scalar, &a)?;
    Ok(symtab.add_entry(out))
}

/// `opeqvv a op= b`: mutate `a` in place, no new array.
#[instrument(skip(symtab), fields(op = %args.op))]
pub fn opeqvv(symtab: &SymbolTable, args: &BinOpArgs) -> ReplyMsg {
    match run_opeqvv(symtab, args) {
        Ok(()) => ReplyMsg::normal(""),
        Err(e) => e.into(),
    }
}

fn run_opeqvv(symtab: &SymbolTable, args: &BinOpArgs) -> ServerResult<()> {
    let b = symtab.lookup(&args.b)?;
    symtab.with_mut(&args.a, |a| Ok(opeq_vv("opeqvv", &args.op, a, &b)?))
}

/// `opeqvs a op= scalar`.
#[instrument(skip(symtab), fields(op = %args.op))]
pub fn opeqvs(symtab: &SymbolTable, args: &BinOpScalarArgs) -> ReplyMsg {
    match run_opeqvs(symtab, args) {
        Ok(()) => ReplyMsg::normal(""),
        Err(e) => e.into(),
    }
}

fn run_opeqvs(symtab: &SymbolTable, args: &BinOpScalarArgs) -> ServerResult<()> {
    let scalar = args.scalar()?;
    symtab.with_mut(&args.a, |a| Ok(opeq_vs("opeqvs", &args.op, a, &scalar)?))
}

/// `clip name = clip(target, min, max)`: dispatches on whether each
/// bound is a scalar or an array name, via an explicit four-way split
/// rather than a pair of `hasMin`/`hasMax` flags alongside always-set
/// scalar fields.
#[instrument(skip(symtab))]
pub fn clip(symtab: &SymbolTable, args: &ClipArgs) -> ReplyMsg {
    match run_clip(symtab, args) {
        Ok(name) => ReplyMsg::normal(name),
        Err(e) => e.into(),
    }
}

fn run_clip(symtab: &SymbolTable, args: &ClipArgs) -> ServerResult<String> {
    let target = symtab.lookup(&args.name)?;
    let out = match (&args.min, &args.max) {
        (ClipBound::Scalar { .. }, ClipBound::Scalar { .. }) => {
            clip_ss(&target, &args.min.as_scalar()?, &args.max.as_scalar()?)?
        }
        (ClipBound::Scalar { .. }, ClipBound::Array(max_name)) => {
            let max = symtab.lookup(max_name)?;
            clip_sa(&target, &args.min.as_scalar()?, &max)?
        }
        (ClipBound::Array(min_name), ClipBound::Scalar { .. }) => {
            let min = symtab.lookup(min_name)?;
            clip_as(&target, &min, &args.max.as_scalar()?)?
        }
        (ClipBound::Array(min_name), ClipBound::Array(max_name)) => {
            let min = symtab.lookup(min_name)?;
            let max = symtab.lookup(max_name)?;
            clip_aa(&target, &min, &max)?
        }
    };
    Ok(symtab.add_entry(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndserver_kernel::{ArrayBuffer, ArrayEntry, DType};

    fn seeded_symtab() -> (SymbolTable, String, String) {
        let tab = SymbolTable::new();
        let a = tab.add_entry(ArrayEntry::new(
            DType::Int64,
            vec![3],
            ArrayBuffer::Int64(vec![1, 2, 3]),
        ));
        let b = tab.add_entry(ArrayEntry::new(
            DType::Int64,
            vec![3],
            ArrayBuffer::Int64(vec![4, 5, 6]),
        ));
        (tab, a, b)
    }

    #[test]
    fn binopvv_publishes_a_new_array() {
        let (tab, a, b) = seeded_symtab();
        let reply = binopvv(
            &tab,
            &BinOpArgs {
                op: "+".to_string(),
                a,
                b,
            },
        );
        assert!(!reply.is_error());
        let out = tab.lookup(&reply.msg).unwrap();
        assert_eq!(out.buffer, ArrayBuffer::Int64(vec![5, 7, 9]));
    }

    #[test]
    fn binopvv_reports_undefined_symbol() {
        let tab = SymbolTable::new();
        let reply = binopvv(
            &tab,
            &BinOpArgs {
                op: "+".to_string(),
                a: "missing_a".to_string(),
                b: "missing_b".to_string(),
            },
        );
        assert!(reply.is_error());
        assert!(reply.msg.contains("missing_a"));
    }

    #[test]
    fn opeqvv_mutates_lhs_without_allocating() {
        let (tab, a, b) = seeded_symtab();
        let before_len = tab.len();
        let reply = opeqvv(
            &tab,
            &BinOpArgs {
                op: "+".to_string(),
                a: a.clone(),
                b,
            },
        );
        assert!(!reply.is_error());
        assert_eq!(tab.len(), before_len);
        assert_eq!(
            tab.lookup(&a).unwrap().buffer,
            ArrayBuffer::Int64(vec![5, 7, 9])
        );
    }

    #[test]
    fn clip_with_scalar_bounds() {
        let tab = SymbolTable::new();
        let a = tab.add_entry(ArrayEntry::new(
            DType::Int64,
            vec![3],
            ArrayBuffer::Int64(vec![3, -2, 0]),
        ));
        let reply = clip(
            &tab,
            &ClipArgs {
                name: a,
                min: ClipBound::Scalar {
                    value: "0".to_string(),
                    dtype: "int64".to_string(),
                },
                max: ClipBound::Scalar {
                    value: "2".to_string(),
                    dtype: "int64".to_string(),
                },
            },
        );
        assert!(!reply.is_error());
        let out = tab.lookup(&reply.msg).unwrap();
        assert_eq!(out.buffer, ArrayBuffer::Int64(vec![2, 0, 0]));
    }
}
