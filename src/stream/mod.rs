//! Byte-stream plumbing: the rewindable source used by the decoder and
//! readers/writers for consecutive top-level values.

pub mod reader;
pub mod rewind;
pub mod writer;

pub use reader::AmfReader;
pub use rewind::RewindReader;
pub use writer::AmfWriter;
