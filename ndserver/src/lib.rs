//! Symbol table, command registry, and request/response envelope for the
//! array-server binary-operation commands.
//!
//! The kernel in `ndserver_kernel` is the hard part: pure promotion
//! algebra and elementwise dispatch over already-resolved arrays. This
//! crate is the mechanical glue around it — a named array store, a
//! small set of command handlers that parse already-structured argument
//! structs (standing in for a parsed wire request) and call into the
//! kernel, and a normal/error/warning response envelope. None of it
//! participates in the promotion or kernel logic itself.

pub mod args;
pub mod commands;
pub mod config;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod symtab;

pub mod prelude {
    pub use crate::args::{BinOpArgs, BinOpScalarArgs, ClipArgs, ClipBound};
    pub use crate::config::ServerConfig;
    pub use crate::envelope::{MsgType, ReplyMsg};
    pub use crate::error::{ServerError, ServerResult};
    pub use crate::registry::CommandRegistry;
    pub use crate::symtab::SymbolTable;
}

pub use prelude::*;
