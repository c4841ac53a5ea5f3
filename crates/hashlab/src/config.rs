use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use hashlab_digest::{DEFAULT_CHUNK_SIZE, DEFAULT_SALT_LENGTH, DigestAlgorithm, TextEncoding};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

pub const CONFIG_FILE: &str = "hashlab.toml";

pub const ENV_PREFIX: &str = "HASHLAB_";

/// Default cap on hashed input, 10 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

// Only these keys may come from `HASHLAB_*`; secrets share the prefix and must never land here.
const ENV_KEYS: [&str; 5] = ["algorithm", "chunk_size", "max_input_bytes", "salt_length", "encoding"];

/// Non-secret settings, layered: defaults, then `hashlab.toml`, then `HASHLAB_*` variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub algorithm: DigestAlgorithm,
    pub chunk_size: usize,
    pub max_input_bytes: u64,
    pub salt_length: usize,
    pub encoding: TextEncoding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            algorithm:       DigestAlgorithm::default(),
            chunk_size:      DEFAULT_CHUNK_SIZE,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            salt_length:     DEFAULT_SALT_LENGTH,
            encoding:        TextEncoding::default(),
        }
    }
}

impl Config {
    /// Load from `path`, or from `hashlab.toml` in the working directory when it exists.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let file = match path {
            Some(path) if !path.is_file() => {
                return Err(CliError::ConfigNotFound(path.to_path_buf()));
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(CONFIG_FILE),
        };

        let config: Config = Self::figment(&file).extract()?;
        tracing::debug!(?config, file = %file.display(), "configuration loaded");
        Ok(config)
    }

    fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).only(&ENV_KEYS))
    }
}
