use std::{
    fs,
    io::{self, BufWriter, IsTerminal, Read},
    path::{Path, PathBuf},
};

use eyre::Context;
use lexbits_bit_buf::{ByteSink, ByteSource};
use memmap2::Mmap;

use crate::{cli::HYPHEN, utils};

/// An input source for commands which read packed data.
#[derive(Clone, Debug)]
pub enum InputSource {
    /// The input will be read from stdin.
    Stdin,
    /// The input will be read from a single file.
    File(PathBuf),
}

impl InputSource {
    /// Evaluates a command line argument into an input source.
    ///
    /// The value "-" selects stdin, everything else is a file path.
    pub fn evaluate(input: &str) -> Self {
        if input == HYPHEN {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(input))
        }
    }

    /// Loads the input as random-access bytes.
    pub fn open(&self) -> eyre::Result<InputBytes> {
        match self {
            Self::Stdin => open_stdin(),
            Self::File(path) => open_file(path),
        }
    }
}

/// An output sink for commands which produce packed data.
#[derive(Clone, Debug)]
pub enum OutputSource {
    /// The output will be written to stdout.
    Stdout,
    /// The output will be written to a single file.
    File(PathBuf),
}

impl OutputSource {
    /// Evaluates a command line argument into an output source.
    ///
    /// The value "-" selects stdout, everything else is a file path.
    pub fn evaluate(output: &Path) -> Self {
        if output.as_os_str() == HYPHEN {
            Self::Stdout
        } else {
            Self::File(output.to_owned())
        }
    }

    /// Creates the byte sink for binary output.
    ///
    /// Refuses to write binary data to a terminal.
    pub fn create(&self) -> eyre::Result<Box<dyn ByteSink>> {
        match self {
            Self::Stdout => {
                let stdout = io::stdout();
                if stdout.is_terminal() {
                    eyre::bail!("refusing to write binary output to a terminal; use -o <FILE>");
                }

                Ok(Box::new(stdout))
            }

            Self::File(path) => {
                let file = fs::File::create(path)
                    .with_context(|| format!("failed to create '{}'", path.display()))?;
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }
}

/// The bytes of a loaded input.
pub enum InputBytes {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl InputBytes {
    /// Gets the number of bytes in the input.
    pub fn len(&self) -> usize {
        match self {
            Self::Owned(buf) => buf.len(),
            Self::Mapped(map) => map.len(),
        }
    }

    /// Gets the number of bits in the input.
    pub fn bit_len(&self) -> u64 {
        (self.len() as u64) << 3
    }
}

impl ByteSource for InputBytes {
    fn read_byte_at(&self, offset: u64) -> io::Result<u8> {
        match self {
            Self::Owned(buf) => buf.read_byte_at(offset),
            Self::Mapped(map) => map.read_byte_at(offset),
        }
    }
}

fn open_stdin() -> eyre::Result<InputBytes> {
    let mut stdin = utils::stdin_reader();
    let mut buf = Vec::new();
    stdin.read_to_end(&mut buf)?;

    Ok(InputBytes::Owned(buf))
}

fn open_file(path: &Path) -> eyre::Result<InputBytes> {
    let file =
        fs::File::open(path).with_context(|| format!("failed to open '{}'", path.display()))?;

    // Zero-length mappings are rejected on some platforms.
    if file.metadata()?.len() == 0 {
        return Ok(InputBytes::Owned(Vec::new()));
    }

    // SAFETY: The mapping is read-only and we accept that concurrent
    // modification of the file by other processes is undefined.
    let map = unsafe { Mmap::map(&file) }
        .with_context(|| format!("failed to map '{}'", path.display()))?;
    log::debug!("Mapped {} bytes from '{}'", map.len(), path.display());

    Ok(InputBytes::Mapped(map))
}
