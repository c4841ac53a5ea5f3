use std::io::Write;

use anyhow::Result;
use clap::Args;
use hashlab_digest::{DigestAlgorithm, DigestRecord, TextEncoding, digest_text};

use crate::cli::{Ctx, Status, read_text};

#[derive(Args, Clone, Debug)]
pub struct TextArg {
    /// Text to hash, `-` reads stdin
    text: String,
    #[arg(short, long, help = "Digest algorithm [default: from config]")]
    algorithm: Option<DigestAlgorithm>,
    #[arg(short, long, help = "Text encoding [default: from config]")]
    encoding: Option<TextEncoding>,
}

pub fn run(arg: TextArg, ctx: &Ctx, out: &mut dyn Write) -> Result<Status> {
    let algorithm = arg.algorithm.unwrap_or(ctx.config.algorithm);
    let encoding = arg.encoding.unwrap_or(ctx.config.encoding);

    let text = read_text(&arg.text, ctx.config.max_input_bytes)?;
    let result = digest_text(algorithm, &text, encoding)?;

    ctx.emit(&[DigestRecord::new(ctx.label_or("text"), &result, None)], out)?;
    Ok(Status::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testing::{NO_SECRETS, ctx, stdout_of};
    use crate::error::{CliError, exit_code};
    use hashlab_digest::DigestError;

    fn arg(text: &str) -> TextArg {
        TextArg {
            text: text.into(),
            algorithm: None,
            encoding: None,
        }
    }

    #[test]
    fn test_default_sha256() {
        let mut out = Vec::new();
        run(arg("hola mundo"), &ctx(&NO_SECRETS), &mut out).unwrap();
        assert_eq!(
            stdout_of(out),
            "0b894166d3336435c800bea36ff21b29eaa801a52f584c006c49289a0dcf6e2f\n"
        );
    }

    #[test]
    fn test_ascii_rejects_accents() {
        let mut text = arg("canción");
        text.encoding = Some(TextEncoding::Ascii);
        let err = run(text, &ctx(&NO_SECRETS), &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DigestError>(),
            Some(DigestError::EncodingError { position: 5, .. })
        ));
        assert_eq!(exit_code(&err), 3);
    }

    #[test]
    fn test_limit_applies_to_arguments() {
        let mut ctx = ctx(&NO_SECRETS);
        ctx.config.max_input_bytes = 4;
        let err = run(arg("hola mundo"), &ctx, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::InputTooLarge { limit: 4 })
        ));
    }
}
