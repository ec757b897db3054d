//! Command registry: maps a command name to the handler that parses its
//! JSON argument payload and calls into `commands`. Stands in for the
//! real server's dispatch table from wire command name to handler
//! function.

use crate::args::{BinOpArgs, BinOpScalarArgs, ClipArgs};
use crate::commands;
use crate::envelope::ReplyMsg;
use crate::symtab::SymbolTable;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

type Handler = fn(&SymbolTable, &Value) -> ReplyMsg;

/// The six commands registered as the server's command surface.
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Handler>,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn parse_args<T: serde::de::DeserializeOwned>(raw: &Value) -> Result<T, String> {
    serde_json::from_value(raw.clone()).map_err(|e| e.to_string())
}

fn handle_binopvv(symtab: &SymbolTable, raw: &Value) -> ReplyMsg {
    match parse_args::<BinOpArgs>(raw) {
        Ok(args) => commands::binopvv(symtab, &args),
        Err(e) => ReplyMsg::error(format!("Error: binopvv: malformed arguments: {e}")),
    }
}

fn handle_binopvs(symtab: &SymbolTable, raw: &Value) -> ReplyMsg {
    match parse_args::<BinOpScalarArgs>(raw) {
        Ok(args) => commands::binopvs(symtab, &args),
        Err(e) => ReplyMsg::error(format!("Error: binopvs: malformed arguments: {e}")),
    }
}

fn handle_binopsv(symtab: &SymbolTable, raw: &Value) -> ReplyMsg {
    match parse_args::<BinOpScalarArgs>(raw) {
        Ok(args) => commands::binopsv(symtab, &args),
        Err(e) => ReplyMsg::error(format!("Error: binopsv: malformed arguments: {e}")),
    }
}

fn handle_opeqvv(symtab: &SymbolTable, raw: &Value) -> ReplyMsg {
    match parse_args::<BinOpArgs>(raw) {
        Ok(args) => commands::opeqvv(symtab, &args),
        Err(e) => ReplyMsg::error(format!("Error: opeqvv: malformed arguments: {e}")),
    }
}

fn handle_opeqvs(symtab: &SymbolTable, raw: &Value) -> ReplyMsg {
    match parse_args::<BinOpScalarArgs>(raw) {
        Ok(args) => commands::opeqvs(symtab, &args),
        Err(e) => ReplyMsg::error(format!("Error: opeqvs: malformed arguments: {e}")),
    }
}

fn handle_clip(symtab: &SymbolTable, raw: &Value) -> ReplyMsg {
    match parse_args::<ClipArgs>(raw) {
        Ok(args) => commands::clip(symtab, &args),
        Err(e) => ReplyMsg::error(format!("Error: clip: malformed arguments: {e}")),
    }
}

impl CommandRegistry {
    /// Build the registry with every registered command wired up.
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Handler> = HashMap::new();
        handlers.insert("binopvv", handle_binopvv);
        handlers.insert("binopvs", handle_binopvs);
        handlers.insert("binopsv", handle_binopsv);
        handlers.insert("opeqvv", handle_opeqvv);
        handlers.insert("opeqvs", handle_opeqvs);
        handlers.insert("clip", handle_clip);
        CommandRegistry { handlers }
    }

    /// Route `command` to its handler, passing `symtab` and the raw
    /// JSON argument payload. An unrecognized command name never
    /// touches the symbol table.
    pub fn dispatch(&self, symtab: &SymbolTable, command: &str, args: &Value) -> ReplyMsg {
        match self.handlers.get(command) {
            Some(handler) => handler(symtab, args),
            None => {
                warn!(command, "unrecognized command");
                ReplyMsg::error(format!("Error: unrecognized command '{command}'"))
            }
        }
    }

    pub fn commands(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndserver_kernel::{ArrayBuffer, ArrayEntry, DType};
    use serde_json::json;

    #[test]
    fn dispatch_routes_binopvv_by_name() {
        let tab = SymbolTable::new();
        let a = tab.add_entry(ArrayEntry::new(DType::Int64, vec![2], ArrayBuffer::Int64(vec![1, 2])));
        let b = tab.add_entry(ArrayEntry::new(DType::Int64, vec![2], ArrayBuffer::Int64(vec![3, 4])));
        let registry = CommandRegistry::new();
        let reply = registry.dispatch(&tab, "binopvv", &json!({"op": "+", "a": a, "b": b}));
        assert!(!reply.is_error());
    }

    #[test]
    fn dispatch_rejects_unknown_command() {
        let tab = SymbolTable::new();
        let registry = CommandRegistry::new();
        let reply = registry.dispatch(&tab, "nope", &json!({}));
        assert!(reply.is_error());
    }

    #[test]
    fn dispatch_reports_malformed_arguments() {
        let tab = SymbolTable::new();
        let registry = CommandRegistry::new();
        let reply = registry.dispatch(&tab, "binopvv", &json!({"op": "+"}));
        assert!(reply.is_error());
    }

    #[test]
    fn registry_exposes_every_spec_command() {
        let registry = CommandRegistry::new();
        let mut names: Vec<_> = registry.commands().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec!["binopsv", "binopvs", "binopvv", "clip", "opeqvs", "opeqvv"]
        );
    }
}
