use std::{
    fs,
    io::{self, BufWriter, SeekFrom, Write},
    path::PathBuf,
};

use clap::{Args, ValueEnum};
use eyre::Context;
use lexbits_bit_buf::{BitSeeker, ByteSource, SeekError};
use serde::Serialize;

use super::Command;
use crate::{
    cli::{HYPHEN, InputSource, OutputSource},
    utils,
};

/// Subcommand for reading fields at an arbitrary bit offset.
#[derive(Debug, Args)]
pub struct Peek {
    /// The file to read from.
    ///
    /// When the value is "-", input will be read from stdin.
    input: String,

    /// The bit offset of the first field.
    #[clap(long, default_value_t = 0)]
    offset: u64,

    /// Comma-separated widths of the fields to read, in order.
    #[clap(short, long, value_delimiter = ',', required = true)]
    widths: Vec<u32>,

    /// The representation of the decoded fields.
    #[clap(short, long, value_enum, env = "LEXBITS_FORMAT", default_value_t = Format::Json)]
    format: Format,

    /// An optional output file for the decoded fields.
    ///
    /// Defaults to "-" for printing output to stdout.
    #[clap(short, default_value = HYPHEN)]
    output: PathBuf,
}

/// Output formats for decoded fields.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Format {
    /// An array of JSON objects.
    Json,
    /// One line of text per field.
    Text,
}

/// A field decoded from the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FieldRecord {
    pub offset: u64,
    pub width: u32,
    pub value: u64,
}

/// Reads consecutive fields of the given widths, starting at bit
/// `offset` of `source`.
pub fn read_fields<S: ByteSource + ?Sized>(
    source: &S,
    offset: u64,
    widths: &[u32],
) -> Result<Vec<FieldRecord>, SeekError> {
    let mut seeker = BitSeeker::new(source);
    seeker.seek(SeekFrom::Start(offset))?;

    widths
        .iter()
        .map(|&width| {
            let offset = seeker.tell();
            let value = seeker.read_bits(width)?;

            Ok(FieldRecord {
                offset,
                width,
                value,
            })
        })
        .collect()
}

fn write_text(out: &OutputSource, records: &[FieldRecord]) -> eyre::Result<()> {
    let mut writer: Box<dyn Write> = match out {
        OutputSource::Stdout => Box::new(io::stdout().lock()),
        OutputSource::File(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create '{}'", path.display()))?;
            Box::new(BufWriter::new(file))
        }
    };

    for record in records {
        writeln!(
            writer,
            "{:>12}  {:>2}  {:#x}",
            record.offset, record.width, record.value
        )?;
    }

    writer.flush()?;
    Ok(())
}

impl Command for Peek {
    fn handle(self) -> eyre::Result<()> {
        let bytes = InputSource::evaluate(&self.input).open()?;
        let records = read_fields(&bytes, self.offset, &self.widths)?;

        let out = OutputSource::evaluate(&self.output);
        match self.format {
            Format::Json => utils::write_json(&out, &records),
            Format::Text => write_text(&out, &records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_consecutive_fields() {
        let data = [0xBA, 0xFF, 0xC0];
        let records = read_fields(&data[..], 0, &[3, 5, 10]).unwrap();

        assert_eq!(
            records,
            [
                FieldRecord { offset: 0, width: 3, value: 0b101 },
                FieldRecord { offset: 3, width: 5, value: 0b11010 },
                FieldRecord { offset: 8, width: 10, value: 0x3FF },
            ]
        );
    }

    #[test]
    fn read_from_offset() {
        let data = [0xFF, 0x00];
        let records = read_fields(&data[..], 6, &[4]).unwrap();

        assert_eq!(records[0].value, 0xC);
    }

    #[test]
    fn read_past_end_fails() {
        let data = [0xFF];
        assert!(matches!(
            read_fields(&data[..], 4, &[8]),
            Err(SeekError::Io(..))
        ));
    }

    #[test]
    fn text_output_names_unwritable_path() {
        let path = std::env::temp_dir()
            .join(format!("lexbits-missing-{}", std::process::id()))
            .join("fields.txt");
        let out = OutputSource::File(path.clone());

        let err = write_text(&out, &[]).unwrap_err();
        let message = err.to_string();

        assert!(message.starts_with("failed to create"));
        assert!(message.contains(&path.display().to_string()));
    }
}
