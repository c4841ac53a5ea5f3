use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use hashlab_digest::{DigestAlgorithm, Salt, Seasoning, require_pepper};

use crate::cli::{Ctx, Status, read_text};
use crate::secrets::PEPPER_VAR;

#[derive(Args, Clone, Debug)]
pub struct PepperArg {
    /// Text to hash, `-` reads stdin
    text: String,
    #[arg(short, long, help = "Digest algorithm [default: from config]")]
    algorithm: Option<DigestAlgorithm>,
    #[arg(short, long, help = "Salt to apply as well, giving `pepper$salt$text`")]
    salt: Option<String>,
}

pub fn run(arg: PepperArg, ctx: &Ctx, out: &mut dyn Write) -> Result<Status> {
    let algorithm = arg.algorithm.unwrap_or(ctx.config.algorithm);
    let pepper = require_pepper(ctx.secrets.pepper()).with_context(|| format!("{PEPPER_VAR} is not set"))?;

    let mut seasoning = Seasoning::new().pepper(Some(pepper));
    if let Some(salt) = arg.salt {
        seasoning = seasoning.salt(Salt::new(salt)?);
    }

    let text = read_text(&arg.text, ctx.config.max_input_bytes)?;
    let seasoned = seasoning.digest(algorithm, text.as_bytes())?;
    ctx.emit(&[seasoned.record(ctx.label_or("text"))], out)?;
    Ok(Status::Success)
}
