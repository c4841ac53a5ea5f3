use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueHint};
use hashlab_digest::{
    DigestAlgorithm, DigestRecord, DigestResult, HmacKey, StreamOptions, compute_hmac, digests_equal, hmac_stream,
};

use crate::cli::{Ctx, Status, limit_exceeded, open_limited, read_text};
use crate::secrets::HMAC_KEY_VAR;

#[derive(Args, Clone, Debug)]
pub struct HmacArg {
    /// Message to authenticate, `-` reads stdin
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    text: Option<String>,
    /// Authenticate a file instead of a text
    #[arg(long, value_hint = ValueHint::FilePath)]
    file: Option<PathBuf>,
    #[arg(short, long, help = "Digest algorithm [default: from config]")]
    algorithm: Option<DigestAlgorithm>,
    /// Expected hex tag; exits 1 when it differs
    #[arg(long, value_name = "HEX")]
    verify: Option<String>,
}

pub fn run(arg: HmacArg, ctx: &Ctx, out: &mut dyn Write) -> Result<Status> {
    let algorithm = arg.algorithm.unwrap_or(ctx.config.algorithm);
    let limit = ctx.config.max_input_bytes;
    let key = HmacKey::require(ctx.secrets.hmac_key()).with_context(|| format!("{HMAC_KEY_VAR} is not set"))?;

    let expected = arg
        .verify
        .as_deref()
        .map(|hex| DigestResult::from_hex(algorithm, hex))
        .transpose()?;

    let (tag, label) = match (arg.file, arg.text) {
        (Some(path), _) => {
            let (file, len) =
                open_limited(&path, limit).with_context(|| format!("cannot authenticate {}", path.display()))?;
            let options = StreamOptions::default().chunk_size(ctx.config.chunk_size).total_bytes(len);

            let mut tracker = ctx.tracker(Some(len));
            let outcome = hmac_stream(algorithm, &key, file, &options, &mut tracker);
            tracker.finish();
            (limit_exceeded(outcome, &tracker, limit)?, path.display().to_string())
        }
        (None, Some(text)) => {
            let text = read_text(&text, limit)?;
            (compute_hmac(algorithm, &key, text.as_bytes())?, "text".to_string())
        }
        (None, None) => unreachable!("clap requires text or --file"),
    };

    ctx.emit(&[DigestRecord::new(ctx.label_or(label), &tag, None)], out)?;

    match expected {
        Some(expected) if !digests_equal(&tag, &expected) => {
            eprintln!("mismatch: tag does not verify");
            Ok(Status::Mismatch)
        }
        _ => Ok(Status::Success),
    }
}
