use std::io::Write;

use anyhow::Result;
use hashlab_digest::DigestAlgorithm;

use crate::cli::Status;
use crate::error::CliError;
use crate::ui::table::{AlgorithmRow, FormatConfig, Formatter};

pub fn run(out: &mut dyn Write) -> Result<Status> {
    let table = Formatter::table(
        DigestAlgorithm::ALL.into_iter().map(AlgorithmRow::from),
        FormatConfig {
            footer: Some(format!("default: {}", DigestAlgorithm::default())),
        },
    );
    writeln!(out, "{table}").map_err(CliError::Output)?;
    Ok(Status::Success)
}
