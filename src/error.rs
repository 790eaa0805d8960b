//! Error types for AMF0 encoding and decoding.

use std::fmt;
use std::io;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AmfError>;

/// Errors that can occur while encoding or decoding AMF0 data.
///
/// Every error aborts the call that produced it; no partially decoded value
/// is ever returned alongside one.
#[derive(Debug, thiserror::Error)]
pub enum AmfError {
    #[error("unexpected end of stream")]
    UnexpectedEndOfStream,

    #[error("unsupported AMF0 wire type {name} (marker 0x{marker:02X})")]
    UnsupportedWireType { marker: u8, name: &'static str },

    #[error("object-end marker outside of an object or ECMA array")]
    UnexpectedObjectEnd,

    #[error("string of {len} bytes exceeds the 65535-byte AMF0 string limit")]
    StringTooLong { len: usize },

    #[error("length {len} does not fit a 32-bit length field")]
    LengthOverflow { len: usize },

    #[error("AMF0 object keys must be strings, got {0}")]
    NonStringKey(String),

    #[error("unsupported native type: {0}")]
    UnsupportedNativeType(String),

    #[error("invalid UTF-8 in string payload")]
    InvalidUtf8,

    #[error("nesting depth exceeds limit of {limit}")]
    NestingTooDeep { limit: usize },

    #[error("composite declares {count} elements, limit is {limit}")]
    TooManyElements { count: usize, limit: usize },

    #[error("I/O error: {0}")]
    Io(#[source] io::Error),

    #[error("{0}")]
    Message(String),
}

impl AmfError {
    /// Builds a free-form error, as raised by user `Serialize`/`Deserialize` impls.
    pub fn custom(msg: impl fmt::Display) -> Self {
        Self::Message(msg.to_string())
    }
}

impl From<io::Error> for AmfError {
    fn from(e: io::Error) -> Self {
        // `read_exact` reports a short source as UnexpectedEof.
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEndOfStream
        } else {
            Self::Io(e)
        }
    }
}

impl serde::ser::Error for AmfError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Message(msg.to_string())
    }
}

impl serde::de::Error for AmfError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Message(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_read_maps_to_end_of_stream() {
        let e = io::Error::new(io::ErrorKind::UnexpectedEof, "short");
        assert!(matches!(AmfError::from(e), AmfError::UnexpectedEndOfStream));
    }

    #[test]
    fn other_io_errors_are_wrapped() {
        let e = io::Error::new(io::ErrorKind::BrokenPipe, "gone");
        assert!(matches!(AmfError::from(e), AmfError::Io(_)));
    }

    #[test]
    fn wire_type_message_names_marker() {
        let err = AmfError::UnsupportedWireType {
            marker: 0x07,
            name: "Reference",
        };
        assert_eq!(
            err.to_string(),
            "unsupported AMF0 wire type Reference (marker 0x07)"
        );
    }
}
