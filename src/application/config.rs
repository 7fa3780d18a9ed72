use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::DateFormat;

/// How a ledger is built: which date layout it accepts and where it journals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub date_format: DateFormat,
    /// Journal file; `None` disables journalling.
    pub log_file: Option<PathBuf>,
}

impl LedgerConfig {
    pub fn with_date_format(mut self, date_format: DateFormat) -> Self {
        self.date_format = date_format;
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }
}
