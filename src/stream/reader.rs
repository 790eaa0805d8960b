//! Reads consecutive AMF0 values from a byte stream.

use std::io::Read;

use super::rewind::RewindReader;
use crate::amf0::decode::read_value;
use crate::error::Result;
use crate::options::Options;
use crate::types::AmfValue;

/// Reads top-level AMF0 values one after another from a `Read` source.
///
/// The source may deliver bytes in arbitrarily small pieces; reads block
/// until each field is complete.
pub struct AmfReader<R> {
    source: RewindReader<R>,
    options: Options,
}

impl<R: Read> AmfReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, Options::default())
    }

    pub fn with_options(reader: R, options: Options) -> Self {
        Self {
            source: RewindReader::new(reader),
            options,
        }
    }

    /// Reads the next value. Fails with `UnexpectedEndOfStream` if the source
    /// is already exhausted.
    pub fn read_value(&mut self) -> Result<AmfValue> {
        read_value(&mut self.source, &self.options)
    }

    /// Reads the next value, or `None` if the stream ends cleanly at a value boundary.
    pub fn next_value(&mut self) -> Result<Option<AmfValue>> {
        if self.source.at_eof()? {
            return Ok(None);
        }
        self.read_value().map(Some)
    }

    /// Reads values until the stream ends.
    pub fn read_all(&mut self) -> Result<Vec<AmfValue>> {
        let mut values = Vec::new();
        while let Some(value) = self.next_value()? {
            values.push(value);
        }
        Ok(values)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }
}

impl<R: Read> Iterator for AmfReader<R> {
    type Item = Result<AmfValue>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_value().transpose()
    }
}
