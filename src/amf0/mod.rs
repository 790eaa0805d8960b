//! The AMF0 wire format.
//!
//! Each value is a one-byte type marker followed by a type-specific payload.
//! All multi-byte integers and floats are big-endian.

pub mod byteorder;
pub mod decode;
pub mod encode;
pub mod marker;

pub use decode::{decode_value, decode_value_with, read_value};
pub use encode::encode_value;
pub use marker::WireType;
