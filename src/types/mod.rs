//! AMF0 value model.

mod date;
mod value;

pub use date::AmfDate;
pub use value::{AmfObject, AmfValue};
