use std::io::Write;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use hashlab_digest::{DigestAlgorithm, Salt, Seasoning, generate_salt};

use crate::cli::{Ctx, Status, read_text};
use crate::error::CliError;
use crate::secrets::PEPPER_VAR;

#[derive(Args, Clone, Debug)]
pub struct SaltArg {
    #[command(subcommand)]
    cmd: SaltCommand,
}

#[derive(Clone, Debug, Subcommand)]
enum SaltCommand {
    /// Print a fresh random salt (base64)
    #[command(alias = "gen")]
    Generate {
        #[arg(long, help = "Random bytes before encoding [default: from config]")]
        length: Option<usize>,
    },
    /// Hash `salt$text`, generating the salt when none is given
    Apply {
        /// Text to hash, `-` reads stdin
        text: String,
        #[arg(short, long, help = "Salt to reuse, e.g. one printed earlier")]
        salt: Option<String>,
        #[arg(short, long, help = "Also prepend the pepper from HASHLAB_PEPPER")]
        pepper: bool,
        #[arg(short, long, help = "Digest algorithm [default: from config]")]
        algorithm: Option<DigestAlgorithm>,
    },
}

pub fn run(arg: SaltArg, ctx: &Ctx, out: &mut dyn Write) -> Result<Status> {
    match arg.cmd {
        SaltCommand::Generate { length } => {
            let salt = generate_salt(length.unwrap_or(ctx.config.salt_length))?;
            writeln!(out, "{salt}").map_err(CliError::Output)?;
        }
        SaltCommand::Apply {
            text,
            salt,
            pepper,
            algorithm,
        } => {
            let algorithm = algorithm.unwrap_or(ctx.config.algorithm);
            let salt = match salt {
                Some(salt) => Salt::new(salt)?,
                None => generate_salt(ctx.config.salt_length)?,
            };

            let mut seasoning = Seasoning::new().salt(salt);
            if pepper {
                seasoning = seasoning.pepper(ctx.secrets.pepper()).require_pepper();
            }

            let text = read_text(&text, ctx.config.max_input_bytes)?;
            let seasoned = seasoning
                .digest(algorithm, text.as_bytes())
                .with_context(|| format!("set {PEPPER_VAR} or drop --pepper"))?;
            ctx.emit(&[seasoned.record(ctx.label_or("text"))], out)?;
        }
    }
    Ok(Status::Success)
}
