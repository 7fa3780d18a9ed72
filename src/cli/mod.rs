use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::application::{Ledger, LedgerConfig};
use crate::domain::{Amount, DateFormat, ParseAmountError, format_amount, parse_amount};
use crate::journal::DEFAULT_LOG_FILE;

/// Daybook - in-memory income and expense journal
#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Record income and expenses from stdin and report totals")]
#[command(version)]
pub struct Cli {
    /// Accepted date layout: iso (YYYY-MM-DD) or dmy (DD/MM/YYYY)
    #[arg(long, default_value = "iso")]
    pub date_format: String,

    /// Journal file, appended to on every add
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Do not write a journal file
    #[arg(long, conflicts_with = "log_file")]
    pub no_log: bool,

    /// Stop at the first rejected transaction with a non-zero exit code
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn config(&self) -> Result<LedgerConfig> {
        let date_format: DateFormat = self.date_format.parse().map_err(|e| {
            anyhow::anyhow!(
                "Invalid date format '{}'. Valid formats: iso, dmy. Error: {}",
                self.date_format,
                e
            )
        })?;

        let mut config = LedgerConfig::default().with_date_format(date_format);
        if !self.no_log {
            config = config.with_log_file(&self.log_file);
        }
        Ok(config)
    }

    pub fn run(self) -> Result<()> {
        init_tracing(self.verbose);

        let config = self.config()?;
        let mut ledger = Ledger::from_config(&config).with_context(|| {
            format!("Failed to open journal file '{}'", self.log_file.display())
        })?;
        tracing::debug!(?config, "ledger ready");

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        run_session(&mut ledger, stdin.lock(), &mut stdout, self.strict)
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("daybook=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("daybook=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add {
        date: String,
        amount: Amount,
        kind: String,
        description: String,
    },
    Summary {
        json: bool,
    },
    List,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid amount: {0}")]
    Amount(#[from] ParseAmountError),
}

const ADD_USAGE: &str = "add <date> <amount> <kind> [description...]";
const SUMMARY_USAGE: &str = "summary [--json]";

const HELP: &str = "\
Commands:
  add <date> <amount> <kind> [description...]   record an income or expense
  summary [--json]                              show income and expense totals
  list                                          show recorded transactions
  help                                          show this message
  quit                                          end the session";

impl Command {
    /// Parse a command line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let command = match verb.to_lowercase().as_str() {
            "add" => {
                let (Some(date), Some(amount), Some(kind)) = (words.next(), words.next(), words.next())
                else {
                    return Err(CommandError::Usage(ADD_USAGE));
                };
                Command::Add {
                    date: date.to_string(),
                    amount: parse_amount(amount)?,
                    kind: kind.to_string(),
                    description: words.collect::<Vec<_>>().join(" "),
                }
            }
            "summary" => match words.next() {
                None => Command::Summary { json: false },
                Some("--json") => Command::Summary { json: true },
                Some(_) => return Err(CommandError::Usage(SUMMARY_USAGE)),
            },
            "list" => Command::List,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

/// Drive `ledger` from commands read on `input` until quit or end of input.
///
/// In strict mode the first rejected transaction ends the session with an error;
/// otherwise rejections are reported and the session goes on.
pub fn run_session<R: BufRead, W: Write>(
    ledger: &mut Ledger,
    input: R,
    output: &mut W,
    strict: bool,
) -> Result<()> {
    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read input")?;

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(output, "{}", e)?;
                continue;
            }
        };

        match command {
            Command::Add {
                date,
                amount,
                kind,
                description,
            } => {
                if strict {
                    let tx = ledger
                        .append(&date, &description, amount, &kind)
                        .with_context(|| format!("Rejected transaction on line {}", index + 1))?;
                    writeln!(output, "Recorded: {}", tx)?;
                } else {
                    let before = ledger.len();
                    ledger.record(&date, &description, amount, &kind);
                    if ledger.len() > before {
                        if let Some(tx) = ledger.transactions().last() {
                            writeln!(output, "Recorded: {}", tx)?;
                        }
                    }
                }
            }

            Command::Summary { json } => {
                let summary = ledger.summarize();
                if json {
                    writeln!(output, "{}", serde_json::to_string_pretty(&summary)?)?;
                } else {
                    writeln!(output, "{:<10} {:>12}", "INCOME", format_amount(summary.income_total))?;
                    writeln!(output, "{:<10} {:>12}", "EXPENSE", format_amount(summary.expense_total))?;
                }
            }

            Command::List => {
                if ledger.is_empty() {
                    writeln!(output, "No transactions recorded.")?;
                } else {
                    writeln!(
                        output,
                        "{:<12} {:<8} {:>12}  {}",
                        "DATE", "KIND", "AMOUNT", "DESCRIPTION"
                    )?;
                    writeln!(output, "{}", "-".repeat(48))?;
                    for tx in ledger.transactions() {
                        writeln!(
                            output,
                            "{:<12} {:<8} {:>12}  {}",
                            tx.date.format("%Y-%m-%d"),
                            tx.kind,
                            format_amount(tx.amount),
                            tx.description
                        )?;
                    }
                }
            }

            Command::Help => writeln!(output, "{}", HELP)?,

            Command::Quit => break,
        }
    }

    output.flush()?;
    Ok(())
}
