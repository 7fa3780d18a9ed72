use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};

use super::{Journal, Level};

pub const DEFAULT_LOG_FILE: &str = "daybook.log";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Render one journal line: `<timestamp> - <LEVEL> - <message>`.
pub fn format_line<Tz: TimeZone>(timestamp: &DateTime<Tz>, level: Level, message: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{} - {} - {}",
        timestamp.format(TIMESTAMP_FORMAT),
        level,
        message
    )
}

/// Journal backed by a file opened in append mode for the journal's lifetime.
#[derive(Debug)]
pub struct FileJournal {
    path: PathBuf,
    file: File,
}

impl FileJournal {
    /// Open (or create) the file at `path`. Existing content is kept.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Journal for FileJournal {
    fn write(&mut self, level: Level, message: &str) {
        let line = format_line(&Local::now(), level, message);
        // A lost journal line must not turn into a failed ledger operation.
        if let Err(e) = writeln!(self.file, "{}", line) {
            tracing::error!(path = %self.path.display(), error = %e, "failed to write journal entry");
        }
    }
}
