use std::{
    fmt::Write as _,
    io::{self, SeekFrom, Write},
};

use clap::Args;
use lexbits_bit_buf::{BitSeeker, ByteSource, SeekError};

use super::Command;
use crate::cli::InputSource;

const GROUPS_PER_ROW: usize = 4;

/// Subcommand for printing the raw bits of an input.
#[derive(Debug, Args)]
pub struct Dump {
    /// The file to dump.
    ///
    /// When the value is "-", input will be read from stdin.
    input: String,

    /// The bit offset to start dumping at.
    #[clap(long, default_value_t = 0)]
    offset: u64,

    /// The number of bits to dump.
    ///
    /// Defaults to everything after the offset.
    #[clap(short, long)]
    len: Option<u64>,
}

/// Renders the bits in `offset..end` as rows of binary digits.
///
/// Every row is labeled with the bit position it starts at. Digits
/// are grouped by the bytes they belong to.
pub fn dump_rows<S: ByteSource + ?Sized>(
    source: &S,
    offset: u64,
    end: u64,
) -> Result<Vec<String>, SeekError> {
    let mut seeker = BitSeeker::new(source);
    seeker.seek(SeekFrom::Start(offset))?;

    let mut rows = Vec::new();
    while seeker.tell() < end {
        let mut row = format!("{:>12}:", seeker.tell());

        for _ in 0..GROUPS_PER_ROW {
            let left = end - seeker.tell();
            if left == 0 {
                break;
            }

            let width = left.min((8 - seeker.bit_offset()) as u64) as usize;
            let bits = seeker.read_bits(width as u32)?;
            let _ = write!(row, " {bits:0width$b}");
        }

        rows.push(row);
    }

    Ok(rows)
}

impl Command for Dump {
    fn handle(self) -> eyre::Result<()> {
        let bytes = InputSource::evaluate(&self.input).open()?;
        let total = bytes.bit_len();

        if self.offset > total {
            eyre::bail!("offset {} is past the input's {total} bits", self.offset);
        }

        let end = match self.len {
            Some(len) => match self.offset.checked_add(len) {
                Some(end) if end <= total => end,
                _ => eyre::bail!("requested range exceeds the input's {total} bits"),
            },
            None => total,
        };

        log::debug!("Dumping bits {}..{end} of {} bytes", self.offset, bytes.len());

        let mut stdout = io::stdout().lock();
        for row in dump_rows(&bytes, self.offset, end)? {
            writeln!(stdout, "{row}")?;
        }

        Ok(())
    }
}
