//! Human-readable debug dump

use super::OutputFormatter;
use anyhow::Result;
use chonk_core::SizeMetric;
use std::io::Write;

/// Separator written between consecutive chunks
pub const CHUNK_SEPARATOR: &str = "\n\n#####\n\n";

/// Debug formatter - each chunk under a header with its index and size
pub struct DebugFormatter<W: Write> {
    writer: W,
    metric: SizeMetric,
    total: usize,
    written: usize,
}

impl<W: Write> DebugFormatter<W> {
    /// Create a debug formatter for `total` chunks measured with `metric`
    pub fn new(writer: W, metric: SizeMetric, total: usize) -> Self {
        Self {
            writer,
            metric,
            total,
            written: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for DebugFormatter<W> {
    fn format_chunk(&mut self, chunk: &str) -> Result<()> {
        if self.written > 0 {
            self.writer.write_all(CHUNK_SEPARATOR.as_bytes())?;
        }
        self.written += 1;

        writeln!(
            self.writer,
            "--- CHUNK {} / {} | SIZE: {} {} ---",
            self.written,
            self.total,
            self.metric.measure(chunk),
            self.metric.unit()
        )?;
        self.writer.write_all(chunk.as_bytes())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
