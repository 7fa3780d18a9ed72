// Journal layer - where a ledger reports what it accepted and rejected.
// A journal is handed to the ledger at construction; nothing here touches
// process-wide logging state.

mod file;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub use file::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Append-only sink for ledger events.
pub trait Journal {
    fn write(&mut self, level: Level, message: &str);

    fn info(&mut self, message: &str) {
        self.write(Level::Info, message);
    }

    fn error(&mut self, message: &str) {
        self.write(Level::Error, message);
    }
}

/// Discards every entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullJournal;

impl Journal for NullJournal {
    fn write(&mut self, _level: Level, _message: &str) {}
}

/// Keeps entries in memory. Clones share the same buffer, so a test can keep
/// one handle and give the other to a ledger.
#[derive(Debug, Default, Clone)]
pub struct MemoryJournal {
    entries: Rc<RefCell<Vec<(Level, String)>>>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Messages logged at the given level, oldest first.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Journal for MemoryJournal {
    fn write(&mut self, level: Level, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}
