use clap::{Parser, Subcommand};

use crate::cmd::*;

mod args;

pub mod io;
pub use io::*;

pub const HYPHEN: &str = "-";

/// The CLI interface for the lexbits application.
#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    /// The selected command.
    #[clap(subcommand)]
    pub command: LexbitsCommand,

    #[clap(flatten)]
    pub verbosity: args::Verbosity,
}

/// The top-level commands supported by lexbits.
#[derive(Debug, Subcommand)]
pub enum LexbitsCommand {
    Dump(dump::Dump),
    Pack(pack::Pack),
    Peek(peek::Peek),
}

impl Command for LexbitsCommand {
    fn handle(self) -> eyre::Result<()> {
        match self {
            Self::Dump(dump) => dump.handle(),
            Self::Pack(pack) => pack.handle(),
            Self::Peek(peek) => peek.handle(),
        }
    }
}
