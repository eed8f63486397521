use std::{fs, path::PathBuf};

use clap::Args;
use eyre::Context;
use lexbits_bit_buf::{BitWriter, ByteSink};
use lexbits_utils::align::{bytes_for_bits, low_mask};
use serde::Deserialize;

use super::Command;
use crate::{
    cli::{HYPHEN, OutputSource},
    utils,
};

/// Subcommand for packing a list of fields into a bit stream.
#[derive(Debug, Args)]
pub struct Pack {
    /// Path to a JSON file describing the fields to pack.
    ///
    /// The file holds an array of `{"width": <bits>, "value": <int>}`
    /// objects which are packed in order, MSB-first and without any
    /// padding in between.
    ///
    /// When the value is "-", the description is read from stdin.
    input: String,

    /// The output file for the packed bytes.
    ///
    /// Defaults to "-" for writing to stdout.
    #[clap(short, default_value = HYPHEN)]
    output: PathBuf,
}

/// A single field to pack.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Field {
    /// The width of the field in bits, at most 64.
    pub width: u32,
    /// The value to store; only its low `width` bits are kept.
    pub value: u64,
}

/// Packs `fields` into `sink` and closes it afterwards.
///
/// Returns the number of bits written, not counting padding.
pub fn pack_fields<W: ByteSink>(sink: W, fields: &[Field]) -> eyre::Result<u64> {
    let mut writer = BitWriter::new(sink);

    for (idx, field) in fields.iter().enumerate() {
        if field.value & !low_mask(field.width) != 0 {
            log::warn!(
                "Field {idx} does not fit into {} bits, truncating {:#x}",
                field.width,
                field.value
            );
        }

        writer
            .write_bits(field.value, field.width)
            .with_context(|| format!("failed to pack field {idx}"))?;
    }

    let bits = writer.written_bits();
    writer.close().context("failed to finish packed output")?;

    Ok(bits)
}

impl Command for Pack {
    fn handle(self) -> eyre::Result<()> {
        let fields: Vec<Field> = if self.input == HYPHEN {
            serde_json::from_reader(utils::stdin_reader())?
        } else {
            let raw = fs::read(&self.input)
                .with_context(|| format!("failed to read '{}'", self.input))?;
            serde_json::from_slice(&raw)
                .with_context(|| format!("failed to parse field list '{}'", self.input))?
        };

        let sink = OutputSource::evaluate(&self.output).create()?;
        let bits = pack_fields(sink, &fields)?;

        log::info!(
            "Packed {} fields ({bits} bits) into {} bytes",
            fields.len(),
            bytes_for_bits(bits)
        );

        Ok(())
    }
}
