use std::io::{self, Write};
use std::panic::Location;

use crate::domain::{
    Amount, DateFormat, Kind, Summary, Transaction, is_valid_amount, summarize,
};
use crate::journal::{FileJournal, Journal, NullJournal};

use super::{LedgerConfig, LedgerError};

/// In-memory, append-only record of income and expense transactions.
/// This is the primary interface for any client (CLI, tests, embedding code).
pub struct Ledger {
    transactions: Vec<Transaction>,
    date_format: DateFormat,
    journal: Box<dyn Journal>,
    console: Box<dyn Write>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(DateFormat::default(), Box::new(NullJournal))
    }
}

impl Ledger {
    /// Create an empty ledger accepting dates in `date_format` and
    /// reporting to `journal`. Rejections from [`Ledger::record`] go to stdout.
    pub fn new(date_format: DateFormat, journal: Box<dyn Journal>) -> Self {
        Self {
            transactions: Vec::new(),
            date_format,
            journal,
            console: Box::new(io::stdout()),
        }
    }

    /// Build a ledger from configuration, opening the journal file if one is set.
    pub fn from_config(config: &LedgerConfig) -> io::Result<Self> {
        let journal: Box<dyn Journal> = match &config.log_file {
            Some(path) => Box::new(FileJournal::open(path)?),
            None => Box::new(NullJournal),
        };
        Ok(Self::new(config.date_format, journal))
    }

    /// Replace the stream [`Ledger::record`] prints rejections to.
    pub fn with_console(mut self, console: impl Write + 'static) -> Self {
        self.console = Box::new(console);
        self
    }

    pub fn date_format(&self) -> DateFormat {
        self.date_format
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    // ========================
    // Recording
    // ========================

    /// Validate and append a transaction.
    ///
    /// Checks run in order kind, date, amount; the first failure is returned
    /// and nothing is stored. Every call leaves one journal entry: INFO when
    /// accepted, ERROR with the caller's source location when rejected.
    #[track_caller]
    pub fn append(
        &mut self,
        date_text: &str,
        description: &str,
        amount: Amount,
        kind: &str,
    ) -> Result<&Transaction, LedgerError> {
        let location = Location::caller();

        let transaction = match self.validate(date_text, description, amount, kind) {
            Ok(tx) => tx,
            Err(e) => {
                tracing::warn!(error = %e, %location, "transaction rejected");
                self.journal.error(&format!(
                    "Error adding transaction: {} (at {})",
                    e, location
                ));
                return Err(e);
            }
        };

        tracing::debug!(%transaction, "transaction added");
        self.journal
            .info(&format!("Transaction added: {}", transaction));

        let index = self.transactions.len();
        self.transactions.push(transaction);
        Ok(&self.transactions[index])
    }

    /// Like [`Ledger::append`], but a rejection is only printed to the console
    /// stream and the call returns normally.
    ///
    /// Callers cannot tell whether the transaction was stored other than by
    /// comparing [`Ledger::len`] before and after.
    #[track_caller]
    pub fn record(&mut self, date_text: &str, description: &str, amount: Amount, kind: &str) {
        if let Err(e) = self.append(date_text, description, amount, kind) {
            if let Err(write_err) = writeln!(self.console, "Error adding transaction: {}", e) {
                tracing::error!(error = %write_err, rejection = %e, "failed to print rejection");
            }
        }
    }

    fn validate(
        &self,
        date_text: &str,
        description: &str,
        amount: Amount,
        kind: &str,
    ) -> Result<Transaction, LedgerError> {
        let kind: Kind = kind
            .parse()
            .map_err(|_| LedgerError::InvalidKind(kind.to_string()))?;

        let date = self
            .date_format
            .parse(date_text)
            .ok_or_else(|| LedgerError::InvalidDateFormat {
                input: date_text.to_string(),
                expected: self.date_format,
            })?;

        if !is_valid_amount(amount) {
            return Err(LedgerError::InvalidAmount(amount));
        }

        Ok(Transaction::new(date, description, amount, kind))
    }

    // ========================
    // Reporting
    // ========================

    /// Income and expense totals over everything recorded so far.
    pub fn summarize(&self) -> Summary {
        summarize(&self.transactions)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::NaiveDate;

    use super::*;
    use crate::journal::{Level, MemoryJournal};

    #[derive(Clone, Default)]
    struct Console(Rc<RefCell<Vec<u8>>>);

    impl Console {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl Write for Console {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn test_ledger() -> (Ledger, MemoryJournal) {
        let journal = MemoryJournal::new();
        let ledger = Ledger::new(DateFormat::Iso, Box::new(journal.clone()));
        (ledger, journal)
    }

    #[test]
    fn test_append_normalizes_kind() {
        let (mut ledger, _) = test_ledger();

        let tx = ledger
            .append("2025-06-19", "salary", 1000.0, "Income")
            .unwrap();

        assert_eq!(tx.kind, Kind::Income);
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 6, 19).unwrap());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_validation_order_kind_first() {
        let (mut ledger, _) = test_ledger();

        let err = ledger
            .append("19/06/2025", "x", -1.0, "transfer")
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidKind("transfer".into()));
    }

    #[test]
    fn test_validation_order_date_before_amount() {
        let (mut ledger, _) = test_ledger();

        let err = ledger.append("19/06/2025", "x", -1.0, "income").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidDateFormat { .. }));
    }

    #[test]
    fn test_append_journals_success_and_failure() {
        let (mut ledger, journal) = test_ledger();

        ledger
            .append("2025-06-19", "salary", 1000.0, "income")
            .unwrap();
        let _ = ledger.append("2025-06-19", "rent", -50.0, "expense");

        let entries = journal.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0],
            (
                Level::Info,
                "Transaction added: 2025-06-19 | salary | 1000.00 | income".to_string()
            )
        );
        assert_eq!(entries[1].0, Level::Error);
        assert!(entries[1].1.contains("Invalid amount -50"));
        assert!(entries[1].1.contains("src/application/ledger.rs"));
    }

    #[test]
    fn test_record_swallows_and_prints() {
        let (ledger, journal) = test_ledger();
        let console = Console::default();
        let mut ledger = ledger.with_console(console.clone());

        ledger.record("2025-06-19", "rent", 0.0, "expense");

        assert!(ledger.is_empty());
        assert_eq!(
            console.contents(),
            "Error adding transaction: Invalid amount 0. Amount must be greater than zero\n"
        );
        assert_eq!(journal.messages(Level::Error).len(), 1);
    }

    #[test]
    fn test_record_accepts_valid_input_silently() {
        let (ledger, _) = test_ledger();
        let console = Console::default();
        let mut ledger = ledger.with_console(console.clone());

        ledger.record("2025-06-19", "salary", 10.0, "income");

        assert_eq!(ledger.len(), 1);
        assert!(console.contents().is_empty());
    }

    struct BrokenConsole;

    impl Write for BrokenConsole {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_record_survives_console_write_failure() {
        let (ledger, journal) = test_ledger();
        let mut ledger = ledger.with_console(BrokenConsole);

        ledger.record("2025-06-19", "rent", -5.0, "expense");
        ledger.record("2025-06-19", "salary", 5.0, "income");

        assert_eq!(ledger.len(), 1);
        assert_eq!(journal.messages(Level::Error).len(), 1);
    }

    #[test]
    fn test_default_ledger_is_empty_and_iso() {
        let ledger = Ledger::default();
        assert!(ledger.is_empty());
        assert_eq!(ledger.date_format(), DateFormat::Iso);
        assert_eq!(ledger.summarize(), Summary::default());
    }
}
