use std::io;
use std::path::PathBuf;

use hashlab_digest::DigestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error(transparent)]
    Config(#[from] figment::Error),

    #[error("input exceeds the {limit} byte limit (max_input_bytes)")]
    InputTooLarge { limit: u64 },

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),

    #[error("failed to encode output: {0}")]
    Csv(#[from] csv::Error),
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self { CliError::Output(e.into()) }
}

/// Process exit status for a failed command.
///
/// `2` means fix the invocation or the environment, `3` means the input itself is the problem.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<DigestError>() {
            return if e.is_input_error() { 3 } else { 2 };
        }
        if let Some(e) = cause.downcast_ref::<CliError>() {
            return match e {
                CliError::InputTooLarge { .. } | CliError::Output(_) | CliError::Csv(_) => 3,
                CliError::ConfigNotFound(_) | CliError::Config(_) => 2,
            };
        }
    }
    2
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_missing_secret_is_setup_error() {
        let err: anyhow::Error = Err::<(), _>(DigestError::MissingPepper)
            .context("set HASHLAB_PEPPER")
            .unwrap_err();
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_cancelled_is_input_error() {
        let err = anyhow::Error::from(DigestError::Cancelled { bytes_processed: 1 });
        assert_eq!(exit_code(&err), 3);
    }

    #[test]
    fn test_too_large_is_input_error() {
        let err = anyhow::Error::from(CliError::InputTooLarge { limit: 10 });
        assert_eq!(exit_code(&err), 3);
    }
}
