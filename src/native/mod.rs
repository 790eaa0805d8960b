//! Conversion between Rust values and the AMF0 value model.
//!
//! Any `Serialize` type converts into an [`AmfValue`] tree and any
//! `Deserialize` type can be read back out of one:
//!
//! | Rust                                   | AMF0                         |
//! |----------------------------------------|------------------------------|
//! | integers, floats                       | Number                       |
//! | `bool`                                 | Boolean                      |
//! | `char`, `str`, `String`, unit variants | String (LongString if promoted) |
//! | `None`, `()`, unit structs             | Null                         |
//! | sequences, tuples                      | StrictArray                  |
//! | maps with string keys, structs         | Object                       |
//! | `DateTime<Utc>` via [`date`]           | Date                         |
//!
//! Byte arrays, `i128`/`u128` and data-carrying enum variants have no AMF0
//! counterpart and fail with `UnsupportedNativeType`.

pub mod date;
mod de;
mod ser;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::options::Options;
use crate::types::AmfValue;

/// Newtype-struct name that routes a millisecond value to `AmfValue::Date`.
pub(crate) const DATE_TOKEN: &str = "$amfr::private::Date";

/// Converts a value into an `AmfValue` with default options.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<AmfValue> {
    to_value_with(value, &Options::default())
}

/// Converts a value into an `AmfValue`, applying the string policy in `options`.
pub fn to_value_with<T: Serialize + ?Sized>(value: &T, options: &Options) -> Result<AmfValue> {
    value.serialize(ser::ValueSerializer::new(options))
}

/// Reads a Rust value out of an `AmfValue`.
pub fn from_value<T: DeserializeOwned>(value: AmfValue) -> Result<T> {
    T::deserialize(de::ValueDeserializer::new(value))
}
