use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::cli::{compare, completions, file, hmac, pepper, salt, text};
use crate::ui::output::OutputFormat;

#[derive(Clone, Debug, Parser)]
#[command(name = "hashlab", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
#[command(after_help = AFTER_HELP)]
pub struct App {
    /// Settings file (defaults to ./hashlab.toml when present)
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// How results are printed
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Label stored in the exported record
    #[arg(short, long, global = true)]
    pub label: Option<String>,

    /// Hide progress bars
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "t", name = "text", about = "Digest of a text")]
    Text(text::TextArg),
    #[command(alias = "f", name = "file", about = "Chunked digest of a file or stdin")]
    File(file::FileArg),
    #[command(alias = "cmp", name = "compare", about = "Constant-time comparison of two hex digests")]
    Compare(compare::CompareArg),
    #[command(name = "salt", about = "Generate salts and hash salted input")]
    Salt(salt::SaltArg),
    #[command(name = "pepper", about = "Digest with the pepper from HASHLAB_PEPPER")]
    Pepper(pepper::PepperArg),
    #[command(name = "hmac", about = "HMAC tag with the key from HASHLAB_HMAC_KEY")]
    Hmac(hmac::HmacArg),
    #[command(alias = "algs", name = "algorithms", about = "List supported algorithms")]
    Algorithms,
    #[command(name = "completions", about = "Print a shell completion script")]
    Completions(completions::CompletionsArg),
}

const AFTER_HELP: &str = "\
SECRETS:
  HASHLAB_PEPPER     pepper for `pepper` and `salt apply --pepper`
  HASHLAB_HMAC_KEY   key for `hmac`
  Secrets are never printed or exported.

SETTINGS (hashlab.toml or HASHLAB_<KEY>):
  algorithm, chunk_size, max_input_bytes, salt_length, encoding

EXAMPLES:
  hashlab text \"hola mundo\"                 # SHA-256 of a string
  hashlab file big.iso -a blake3             # chunked file digest with progress
  hashlab salt generate                      # fresh base64 salt
  hashlab salt apply secret --salt c2FsdA==  # salted digest
  hashlab hmac mensaje -o json               # HMAC tag as a JSON record
  hashlab compare <hex-a> <hex-b>            # exit 0 on match, 1 otherwise
";
