use hashlab_digest::{DigestAlgorithm, DigestRecord};
use tabled::settings::{Panel, Style};
use tabled::{Table, Tabled};

pub struct Formatter;

#[derive(Debug, Clone, Default)]
pub struct FormatConfig {
    /// Panel spanning the last row, e.g. a note on defaults.
    pub footer: Option<String>,
}

impl Formatter {
    pub fn table<T: Tabled>(data: impl IntoIterator<Item = T>, config: FormatConfig) -> Table {
        let mut table = Table::new(data);
        if let Some(footer) = config.footer {
            table.with(Panel::footer(footer));
        }

        table.with(Style::sharp());
        table
    }
}

#[derive(Debug, Tabled)]
pub struct RecordRow {
    #[tabled(rename = "label")]
    pub input_label: String,
    pub algorithm: String,
    pub salt: String,
    #[tabled(rename = "digest")]
    pub digest_hex: String,
    #[tabled(rename = "bytes")]
    pub byte_count: u64,
}

impl From<&DigestRecord> for RecordRow {
    fn from(record: &DigestRecord) -> Self {
        Self {
            input_label: record.input_label.clone(),
            algorithm:   record.algorithm.to_string(),
            salt:        record.salt.clone().unwrap_or_else(|| "-".to_string()),
            digest_hex:  record.digest_hex.clone(),
            byte_count:  record.byte_count,
        }
    }
}

#[derive(Debug, Tabled)]
pub struct AlgorithmRow {
    pub algorithm: &'static str,
    pub bits: usize,
    #[tabled(rename = "collision resistant")]
    pub collision_resistant: &'static str,
    pub hmac: &'static str,
}

impl From<DigestAlgorithm> for AlgorithmRow {
    fn from(algorithm: DigestAlgorithm) -> Self {
        let yes_no = |b: bool| if b { "yes" } else { "no" };
        Self {
            algorithm:           algorithm.as_str(),
            bits:                algorithm.digest_length() * 8,
            collision_resistant: yes_no(algorithm.is_collision_resistant()),
            hmac:                yes_no(algorithm.supports_hmac()),
        }
    }
}
