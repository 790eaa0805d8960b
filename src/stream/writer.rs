//! Writes consecutive AMF0 values to a byte sink.

use std::io::Write;

use crate::amf0::encode::encode_value;
use crate::error::Result;
use crate::types::AmfValue;

/// Streams AMF0 values to a `Write` sink as they are encoded.
pub struct AmfWriter<W> {
    writer: W,
}

impl<W: Write> AmfWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_value(&mut self, value: &AmfValue) -> Result<()> {
        encode_value(&mut self.writer, value)
    }

    /// Writes each value in order, stopping at the first failure.
    pub fn write_all(&mut self, values: &[AmfValue]) -> Result<()> {
        for value in values {
            self.write_value(value)?;
        }
        Ok(())
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
