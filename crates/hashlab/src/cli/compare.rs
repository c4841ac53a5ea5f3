use std::io::Write;

use anyhow::Result;
use clap::Args;
use hashlab_digest::{DigestAlgorithm, DigestResult, digests_equal, hex_digests_equal};

use crate::cli::Status;
use crate::error::CliError;

#[derive(Args, Clone, Debug)]
pub struct CompareArg {
    /// First hex digest
    first: String,
    /// Second hex digest
    second: String,
    /// Validate both values as digests of this algorithm first
    #[arg(short, long)]
    algorithm: Option<DigestAlgorithm>,
}

pub fn run(arg: CompareArg, out: &mut dyn Write) -> Result<Status> {
    let equal = match arg.algorithm {
        Some(algorithm) => {
            let first = DigestResult::from_hex(algorithm, &arg.first)?;
            let second = DigestResult::from_hex(algorithm, &arg.second)?;
            digests_equal(&first, &second)
        }
        None => hex_digests_equal(&arg.first, &arg.second),
    };

    tracing::debug!(equal, "compared digests");
    let (word, status) = if equal { ("match", Status::Success) } else { ("mismatch", Status::Mismatch) };
    writeln!(out, "{word}").map_err(CliError::Output)?;
    Ok(status)
}
