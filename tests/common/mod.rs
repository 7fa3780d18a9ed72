// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use chrono::NaiveDate;
use daybook::journal::MemoryJournal;
use daybook::{DateFormat, Ledger};

/// Helper to create a ledger journalling into memory
pub fn test_ledger(date_format: DateFormat) -> (Ledger, MemoryJournal) {
    let journal = MemoryJournal::new();
    let ledger = Ledger::new(date_format, Box::new(journal.clone()));
    (ledger, journal)
}

/// Helper to create a ISO ledger whose console output is captured
pub fn captured_ledger() -> (Ledger, MemoryJournal, SharedBuffer) {
    let (ledger, journal) = test_ledger(DateFormat::Iso);
    let console = SharedBuffer::default();
    (ledger.with_console(console.clone()), journal, console)
}

/// Helper to build a NaiveDate
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// In-memory writer whose clones share one buffer.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
