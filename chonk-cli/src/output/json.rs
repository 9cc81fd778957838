//! JSON record formatters

use super::OutputFormatter;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::io::Write;

/// A `{"text": ...}` record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    /// The chunk text
    pub text: String,
}

/// An instruction-tuning record with only the output filled in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlpacaRecord {
    /// Left empty
    pub instruction: String,
    /// Left empty
    pub input: String,
    /// The chunk text
    pub output: String,
}

impl AlpacaRecord {
    fn from_chunk(chunk: &str) -> Self {
        Self {
            instruction: String::new(),
            input: String::new(),
            output: chunk.to_string(),
        }
    }
}

/// Write `records` as a JSON array indented with four spaces
fn write_pretty<W: Write, T: Serialize>(writer: &mut W, records: &T) -> Result<()> {
    {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut *writer, formatter);
        records.serialize(&mut serializer)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// JSON Lines formatter - one record per line, written as chunks arrive
pub struct JsonlFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonlFormatter<W> {
    /// Create a new JSON Lines formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonlFormatter<W> {
    fn format_chunk(&mut self, chunk: &str) -> Result<()> {
        let record = TextRecord {
            text: chunk.to_string(),
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// JSON formatter - outputs chunks as a JSON array of text records
pub struct JsonFormatter<W: Write> {
    writer: W,
    records: Vec<TextRecord>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_chunk(&mut self, chunk: &str) -> Result<()> {
        self.records.push(TextRecord {
            text: chunk.to_string(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        write_pretty(&mut self.writer, &self.records)
    }
}

/// Alpaca formatter - outputs chunks as instruction-tuning records
pub struct AlpacaFormatter<W: Write> {
    writer: W,
    records: Vec<AlpacaRecord>,
}

impl<W: Write> AlpacaFormatter<W> {
    /// Create a new Alpaca formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for AlpacaFormatter<W> {
    fn format_chunk(&mut self, chunk: &str) -> Result<()> {
        self.records.push(AlpacaRecord::from_chunk(chunk));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        write_pretty(&mut self.writer, &self.records)
    }
}
