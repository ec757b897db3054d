//! In-process stand-in for the array server's symbol table: a named,
//! typed registry of `ArrayEntry` values.
//!
//! The symbol table is the only shared mutable state and is touched
//! only at the boundaries of an operation (lookup at entry, insert at
//! exit). A single `RwLock` guards the whole map; operand
//! reads take a read lock, and result publication / compound-assign
//! mutation take a write lock scoped to just the map access, never held
//! across the kernel call itself. A poisoned lock recovers its inner
//! map rather than panicking the handling thread, so one panicking
//! request can't take down every request after it.

use crate::error::{ServerError, ServerResult};
use ndserver_kernel::ArrayEntry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: RwLock<HashMap<String, ArrayEntry>>,
    next_id: AtomicU64,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            entries: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Insert `entry` under a freshly server-assigned name and return it.
    pub fn add_entry(&self, entry: ArrayEntry) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let name = format!("id_{id}");
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(name.clone(), entry);
        name
    }

    /// Insert `entry` under an explicit `name`, rejecting a collision.
    pub fn insert_named(&self, name: impl Into<String>, entry: ArrayEntry) -> ServerResult<()> {
        let name = name.into();
        let mut guard = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if guard.contains_key(&name) {
            return Err(ServerError::DuplicateSymbol(name));
        }
        guard.insert(name, entry);
        Ok(())
    }

    /// A read-only snapshot of the named array.
    pub fn lookup(&self, name: &str) -> ServerResult<ArrayEntry> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(name)
            .cloned()
            .ok_or_else(|| ServerError::UndefinedSymbol(name.to_string()))
    }

    /// Mutate the named array in place, holding the write lock for the
    /// duration of `f` — this is how compound-assign kernels get
    /// exclusive ownership of the LHS buffer.
    pub fn with_mut<T>(
        &self,
        name: &str,
        f: impl FnOnce(&mut ArrayEntry) -> ServerResult<T>,
    ) -> ServerResult<T> {
        let mut guard = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let entry = guard
            .get_mut(name)
            .ok_or_else(|| ServerError::UndefinedSymbol(name.to_string()))?;
        f(entry)
    }

    pub fn remove(&self, name: &str) -> ServerResult<ArrayEntry> {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(name)
            .ok_or_else(|| ServerError::UndefinedSymbol(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndserver_kernel::{ArrayBuffer, DType};

    fn sample() -> ArrayEntry {
        ArrayEntry::new(DType::Int64, vec![3], ArrayBuffer::Int64(vec![1, 2, 3]))
    }

    #[test]
    fn add_entry_assigns_distinct_names() {
        let tab = SymbolTable::new();
        let a = tab.add_entry(sample());
        let b = tab.add_entry(sample());
        assert_ne!(a, b);
        assert_eq!(tab.len(), 2);
    }

    #[test]
    fn lookup_of_missing_name_is_undefined_symbol() {
        let tab = SymbolTable::new();
        assert!(matches!(
            tab.lookup("nope"),
            Err(ServerError::UndefinedSymbol(_))
        ));
    }

    #[test]
    fn insert_named_rejects_duplicate() {
        let tab = SymbolTable::new();
        tab.insert_named("a", sample()).unwrap();
        assert!(matches!(
            tab.insert_named("a", sample()),
            Err(ServerError::DuplicateSymbol(_))
        ));
    }

    #[test]
    fn with_mut_exposes_exclusive_access() {
        let tab = SymbolTable::new();
        let name = tab.add_entry(sample());
        tab.with_mut(&name, |entry| {
            entry.buffer = ArrayBuffer::Int64(vec![9, 9, 9]);
            Ok(())
        })
        .unwrap();
        assert_eq!(tab.lookup(&name).unwrap().buffer, ArrayBuffer::Int64(vec![9, 9, 9]));
    }
}
