use std::io::Write;

use clap::ValueEnum;
use hashlab_digest::DigestRecord;

use crate::error::CliError;
use crate::ui::table::{FormatConfig, Formatter, RecordRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Digest hex only, salt on a second line when present
    #[default]
    Plain,
    Table,
    Json,
    /// `input_label,algorithm,salt,digest_hex,byte_count` with a header row
    Csv,
}

pub fn render(records: &[DigestRecord], format: OutputFormat, out: &mut dyn Write) -> Result<(), CliError> {
    match format {
        OutputFormat::Plain => {
            for record in records {
                writeln!(out, "{}", record.digest_hex).map_err(CliError::Output)?;
                if let Some(salt) = &record.salt {
                    writeln!(out, "salt: {salt}").map_err(CliError::Output)?;
                }
            }
        }
        OutputFormat::Table => {
            let table = Formatter::table(records.iter().map(RecordRow::from), FormatConfig::default());
            writeln!(out, "{table}").map_err(CliError::Output)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out).map_err(CliError::Output)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush().map_err(CliError::Output)?;
        }
    }
    Ok(())
}
