//! Discovery output: one JSON object per line.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::events::Event;

/// Writes `events` as JSON lines to `path`, or to stdout when `path` is `None`.
pub fn write_discoveries(events: &[Event], path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            write_json_lines(events, BufWriter::new(file))
        }
        None => write_json_lines(events, io::stdout().lock()),
    }
}

/// Serializes each event on its own line and flushes the writer.
pub fn write_json_lines<W: Write>(events: &[Event], mut writer: W) -> Result<()> {
    for event in events {
        serde_json::to_writer(&mut writer, event).context("Failed to serialize discovery")?;
        writer.write_all(b"\n")?;
    }
    writer.flush().context("Failed to flush discoveries")?;
    Ok(())
}
