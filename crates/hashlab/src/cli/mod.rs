pub mod algorithms;
pub mod app;
pub mod compare;
pub mod completions;
pub mod file;
pub mod hmac;
pub mod pepper;
pub mod salt;
pub mod text;

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::Result;
use hashlab_digest::{DigestError, DigestRecord, TextEncoding};

use crate::cli::app::{App, Commands};
use crate::config::Config;
use crate::error::CliError;
use crate::secrets::SecretSource;
use crate::ui::output::{OutputFormat, render};
use crate::ui::tracker::{ProgressTracker, ProgressTrackerConfig};

/// How a successful command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// A comparison or verification ran and the values differ.
    Mismatch,
}

/// Everything a command needs besides its own arguments.
pub struct Ctx<'a> {
    pub config: Config,
    pub output: OutputFormat,
    pub label: Option<String>,
    pub quiet: bool,
    pub secrets: &'a dyn SecretSource,
}

impl Ctx<'_> {
    pub fn label_or(&self, default: impl Into<String>) -> String {
        self.label.clone().unwrap_or_else(|| default.into())
    }

    pub fn emit(&self, records: &[DigestRecord], out: &mut dyn Write) -> Result<()> {
        render(records, self.output, out)?;
        Ok(())
    }

    pub fn tracker(&self, len: Option<u64>) -> ProgressTracker {
        ProgressTracker::new(ProgressTrackerConfig {
            len,
            limit: Some(self.config.max_input_bytes),
            hidden: self.quiet,
        })
    }
}

pub fn run(app: App, secrets: &dyn SecretSource, out: &mut dyn Write) -> Result<Status> {
    // completions must work even with a broken config
    if let Commands::Completions(arg) = &app.cmd {
        return completions::run(arg, out);
    }

    let ctx = Ctx {
        config: Config::load(app.config.as_deref())?,
        output: app.output,
        label: app.label,
        quiet: app.quiet,
        secrets,
    };

    match app.cmd {
        Commands::Text(arg) => text::run(arg, &ctx, out),
        Commands::File(arg) => file::run(arg, &ctx, out),
        Commands::Compare(arg) => compare::run(arg, out),
        Commands::Salt(arg) => salt::run(arg, &ctx, out),
        Commands::Pepper(arg) => pepper::run(arg, &ctx, out),
        Commands::Hmac(arg) => hmac::run(arg, &ctx, out),
        Commands::Algorithms => algorithms::run(out),
        Commands::Completions(_) => unreachable!("handled above"),
    }
}

/// Resolve a text argument; `-` reads stdin up to `limit` bytes, minus one trailing newline.
pub(crate) fn read_text(value: &str, limit: u64) -> Result<String> {
    read_text_from(value, limit, io::stdin().lock())
}

fn read_text_from(value: &str, limit: u64, stdin: impl Read) -> Result<String> {
    if value != "-" {
        if value.len() as u64 > limit {
            return Err(CliError::InputTooLarge { limit }.into());
        }
        return Ok(value.to_string());
    }

    let mut bytes = Vec::new();
    stdin
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(DigestError::SourceReadError)?;

    if bytes.len() as u64 > limit {
        return Err(CliError::InputTooLarge { limit }.into());
    }

    let mut text = String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        DigestError::EncodingError {
            encoding: TextEncoding::Utf8,
            position: String::from_utf8_lossy(valid).chars().count(),
        }
    })?;
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}

/// Open a file for chunked hashing after checking its size against `limit`.
pub(crate) fn open_limited(path: &Path, limit: u64) -> Result<(File, u64)> {
    let file = File::open(path).map_err(DigestError::SourceReadError)?;
    let len = file.metadata().map_err(DigestError::SourceReadError)?.len();
    if len > limit {
        return Err(CliError::InputTooLarge { limit }.into());
    }
    Ok((file, len))
}

/// Map an observer-initiated cancel back to the size limit that caused it.
pub(crate) fn limit_exceeded<T>(
    outcome: hashlab_digest::Result<T>,
    tracker: &ProgressTracker,
    limit: u64,
) -> Result<T> {
    match outcome {
        Err(DigestError::Cancelled { .. }) if tracker.exceeded() => {
            Err(CliError::InputTooLarge { limit }.into())
        }
        other => Ok(other?),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::secrets::FixedSecrets;

    pub const NO_SECRETS: FixedSecrets = FixedSecrets {
        pepper: None,
        hmac_key: None,
    };

    pub fn ctx(secrets: &dyn SecretSource) -> Ctx<'_> {
        Ctx {
            config: Config::default(),
            output: OutputFormat::Plain,
            label: None,
            quiet: true,
            secrets,
        }
    }

    pub fn stdout_of(out: Vec<u8>) -> String { String::from_utf8(out).unwrap() }
}
