use std::{
    fs,
    io::{self, BufWriter, IsTerminal, Write},
};

use eyre::Context;
use serde::Serialize;

use crate::cli::OutputSource;

/// Serializes the given value as JSON to the respective output source.
///
/// Terminals get a pretty-printed representation, files and pipes a
/// minified one.
pub fn write_json<T: Serialize>(out: &OutputSource, value: &T) -> eyre::Result<()> {
    match out {
        OutputSource::File(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create '{}'", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, value)?;
            writer.flush()?;
        }

        OutputSource::Stdout => {
            let mut stdout = io::stdout().lock();

            if stdout.is_terminal() {
                serde_json::to_writer_pretty(&mut stdout, value)?;
                writeln!(stdout)?;
            } else {
                serde_json::to_writer(&mut stdout, value)?;
            }
        }
    }

    Ok(())
}
