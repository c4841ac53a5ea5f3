use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueHint};
use hashlab_digest::{DigestAlgorithm, DigestRecord, DigestResult, StreamOptions, digests_equal, hash_stream};

use crate::cli::{Ctx, Status, limit_exceeded, open_limited};

#[derive(Args, Clone, Debug)]
pub struct FileArg {
    /// File to hash, `-` reads stdin
    #[arg(value_hint = ValueHint::FilePath)]
    path: PathBuf,
    #[arg(short, long, help = "Digest algorithm [default: from config]")]
    algorithm: Option<DigestAlgorithm>,
    #[arg(long, help = "Bytes read per chunk [default: from config]")]
    chunk_size: Option<usize>,
    /// Expected hex digest; exits 1 when it differs
    #[arg(long, value_name = "HEX")]
    expect: Option<String>,
}

pub fn run(arg: FileArg, ctx: &Ctx, out: &mut dyn Write) -> Result<Status> {
    let algorithm = arg.algorithm.unwrap_or(ctx.config.algorithm);
    let limit = ctx.config.max_input_bytes;
    let mut options = StreamOptions::default().chunk_size(arg.chunk_size.unwrap_or(ctx.config.chunk_size));

    // a malformed expectation fails before any input is read
    let expected = arg
        .expect
        .as_deref()
        .map(|hex| DigestResult::from_hex(algorithm, hex))
        .transpose()?;

    let (result, label) = if arg.path.as_os_str() == "-" {
        let mut tracker = ctx.tracker(None);
        let outcome = hash_stream(algorithm, io::stdin().lock(), &options, &mut tracker);
        tracker.finish();
        (limit_exceeded(outcome, &tracker, limit)?, "stdin".to_string())
    } else {
        let (file, len) = open_limited(&arg.path, limit)
            .with_context(|| format!("cannot hash {}", arg.path.display()))?;
        options = options.total_bytes(len);

        let mut tracker = ctx.tracker(Some(len));
        let outcome = hash_stream(algorithm, file, &options, &mut tracker);
        tracker.finish();
        (limit_exceeded(outcome, &tracker, limit)?, arg.path.display().to_string())
    };

    ctx.emit(&[DigestRecord::new(ctx.label_or(label), &result, None)], out)?;

    match expected {
        Some(expected) if !digests_equal(&result, &expected) => {
            eprintln!("mismatch: expected {}", expected.hex());
            Ok(Status::Mismatch)
        }
        _ => Ok(Status::Success),
    }
}
