//! Operation Log
//!
//! Append-only statement list shared by a context and every handle it
//! creates, so handle statements interleave with context statements in call
//! order.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::literal::Arg;

/// Ordered, shared, append-only sequence of statements
#[derive(Debug, Clone, Default)]
pub struct OpLog {
    statements: Rc<RefCell<Vec<String>>>,
}

impl OpLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one statement. The content is not validated.
    pub fn append(&self, statement: impl Into<String>) {
        let statement = statement.into();
        tracing::trace!(target: "fos_canvas_recorder::ops", %statement);
        self.statements.borrow_mut().push(statement);
    }

    pub fn len(&self) -> usize {
        self.statements.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.borrow().is_empty()
    }

    /// Copy of all statements in insertion order
    pub fn statements(&self) -> Vec<String> {
        self.statements.borrow().clone()
    }

    /// Statements joined with `separator`; `""` when empty
    pub fn join(&self, separator: &str) -> String {
        self.statements.borrow().join(separator)
    }

    /// Whether both values refer to the same underlying log
    pub fn shares_with(&self, other: &OpLog) -> bool {
        Rc::ptr_eq(&self.statements, &other.statements)
    }
}

/// Named reference to an opaque object created by a context
#[derive(Clone)]
pub struct Handle {
    name: String,
    log: OpLog,
}

impl Handle {
    pub(crate) fn new(name: String, log: OpLog) -> Self {
        Self { name, log }
    }

    /// Variable name used in the script
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read-only view of the owning context's log
    pub fn statements(&self) -> Vec<String> {
        self.log.statements()
    }

    pub(crate) fn log(&self) -> &OpLog {
        &self.log
    }

    pub(crate) fn arg(&self) -> Arg {
        Arg::reference(self.name.as_str())
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.name).finish()
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.log.shares_with(&other.log)
    }
}

/// Mints `<context>_<K>` names, K counting from 0 per context
#[derive(Debug)]
pub(crate) struct HandleNamer {
    prefix: String,
    next: Cell<u32>,
}

impl HandleNamer {
    pub(crate) fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: Cell::new(0),
        }
    }

    pub(crate) fn next_name(&self) -> String {
        let ix = self.next.get();
        self.next.set(ix + 1);
        format!("{}_{}", self.prefix, ix)
    }
}
