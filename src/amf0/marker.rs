//! AMF0 marker byte constants and the wire type registry.

pub const NUMBER: u8 = 0x00;
pub const BOOLEAN: u8 = 0x01;
pub const STRING: u8 = 0x02;
pub const OBJECT: u8 = 0x03;
pub const MOVIE_CLIP: u8 = 0x04;
pub const NULL: u8 = 0x05;
pub const UNDEFINED: u8 = 0x06;
pub const REFERENCE: u8 = 0x07;
pub const ECMA_ARRAY: u8 = 0x08;
pub const OBJECT_END: u8 = 0x09;
pub const STRICT_ARRAY: u8 = 0x0A;
pub const DATE: u8 = 0x0B;
pub const LONG_STRING: u8 = 0x0C;
pub const UNSUPPORTED: u8 = 0x0D;
pub const RECORD_SET: u8 = 0x0E;
pub const XML_DOCUMENT: u8 = 0x0F;
pub const TYPED_OBJECT: u8 = 0x10;

/// Terminator of an Object or ECMA array: empty key followed by `OBJECT_END`.
pub const OBJECT_END_SEQUENCE: [u8; 3] = [0x00, 0x00, OBJECT_END];

/// Largest UTF-8 byte length that fits the 16-bit String layout.
pub const MAX_SHORT_STRING: usize = 0xFFFF;

/// Every marker the format defines, including the ones this crate refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    Number,
    Boolean,
    String,
    Object,
    MovieClip,
    Null,
    Undefined,
    Reference,
    EcmaArray,
    ObjectEnd,
    StrictArray,
    Date,
    LongString,
    Unsupported,
    RecordSet,
    XmlDocument,
    TypedObject,
}

impl WireType {
    pub const fn marker(self) -> u8 {
        match self {
            Self::Number => NUMBER,
            Self::Boolean => BOOLEAN,
            Self::String => STRING,
            Self::Object => OBJECT,
            Self::MovieClip => MOVIE_CLIP,
            Self::Null => NULL,
            Self::Undefined => UNDEFINED,
            Self::Reference => REFERENCE,
            Self::EcmaArray => ECMA_ARRAY,
            Self::ObjectEnd => OBJECT_END,
            Self::StrictArray => STRICT_ARRAY,
            Self::Date => DATE,
            Self::LongString => LONG_STRING,
            Self::Unsupported => UNSUPPORTED,
            Self::RecordSet => RECORD_SET,
            Self::XmlDocument => XML_DOCUMENT,
            Self::TypedObject => TYPED_OBJECT,
        }
    }

    /// Resolves a marker byte; `None` for bytes the format does not define.
    pub const fn from_marker(m: u8) -> Option<Self> {
        Some(match m {
            NUMBER => Self::Number,
            BOOLEAN => Self::Boolean,
            STRING => Self::String,
            OBJECT => Self::Object,
            MOVIE_CLIP => Self::MovieClip,
            NULL => Self::Null,
            UNDEFINED => Self::Undefined,
            REFERENCE => Self::Reference,
            ECMA_ARRAY => Self::EcmaArray,
            OBJECT_END => Self::ObjectEnd,
            STRICT_ARRAY => Self::StrictArray,
            DATE => Self::Date,
            LONG_STRING => Self::LongString,
            UNSUPPORTED => Self::Unsupported,
            RECORD_SET => Self::RecordSet,
            XML_DOCUMENT => Self::XmlDocument,
            TYPED_OBJECT => Self::TypedObject,
            _ => return None,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::String => "String",
            Self::Object => "Object",
            Self::MovieClip => "MovieClip",
            Self::Null => "Null",
            Self::Undefined => "Undefined",
            Self::Reference => "Reference",
            Self::EcmaArray => "EcmaArray",
            Self::ObjectEnd => "ObjectEnd",
            Self::StrictArray => "StrictArray",
            Self::Date => "Date",
            Self::LongString => "LongString",
            Self::Unsupported => "Unsupported",
            Self::RecordSet => "RecordSet",
            Self::XmlDocument => "XmlDocument",
            Self::TypedObject => "TypedObject",
        }
    }
}
