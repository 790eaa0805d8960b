//! AMF0 value types.

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use super::date::AmfDate;
use crate::amf0::marker::{MAX_SHORT_STRING, WireType};

/// Property bag of an Object or ECMA array. Keeps insertion order for encoding;
/// equality ignores order.
pub type AmfObject = IndexMap<String, AmfValue>;

/// A value in the AMF0 format, one variant per encodable wire type.
#[derive(Debug, Clone, PartialEq)]
pub enum AmfValue {
    Number(f64),
    Boolean(bool),
    /// Text of at most 65535 UTF-8 bytes (16-bit length prefix).
    String(String),
    Object(AmfObject),
    Null,
    Undefined,
    /// Associative array. Its leading count on the wire is informative only.
    EcmaArray(AmfObject),
    StrictArray(Vec<AmfValue>),
    Date(AmfDate),
    /// Text with a 32-bit length prefix.
    LongString(String),
    Unsupported,
    XmlDocument(String),
}

impl AmfValue {
    /// Wraps text in `String` or `LongString` depending on its UTF-8 length.
    pub fn string(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.len() > MAX_SHORT_STRING {
            Self::LongString(s)
        } else {
            Self::String(s)
        }
    }

    /// The wire type this value encodes as.
    pub fn wire_type(&self) -> WireType {
        match self {
            Self::Number(_) => WireType::Number,
            Self::Boolean(_) => WireType::Boolean,
            Self::String(_) => WireType::String,
            Self::Object(_) => WireType::Object,
            Self::Null => WireType::Null,
            Self::Undefined => WireType::Undefined,
            Self::EcmaArray(_) => WireType::EcmaArray,
            Self::StrictArray(_) => WireType::StrictArray,
            Self::Date(_) => WireType::Date,
            Self::LongString(_) => WireType::LongString,
            Self::Unsupported => WireType::Unsupported,
            Self::XmlDocument(_) => WireType::XmlDocument,
        }
    }

    /// Exact number of bytes this value occupies when encoded, marker included.
    pub fn encoded_len(&self) -> usize {
        fn pairs_len(props: &AmfObject) -> usize {
            props
                .iter()
                .map(|(k, v)| 2 + k.len() + v.encoded_len())
                .sum::<usize>()
                + 3
        }

        1 + match self {
            Self::Null | Self::Undefined | Self::Unsupported => 0,
            Self::Boolean(_) => 1,
            Self::Number(_) => 8,
            Self::Date(_) => 10,
            Self::String(s) => 2 + s.len(),
            Self::LongString(s) | Self::XmlDocument(s) => 4 + s.len(),
            Self::Object(props) => pairs_len(props),
            Self::EcmaArray(props) => 4 + pairs_len(props),
            Self::StrictArray(items) => 4 + items.iter().map(Self::encoded_len).sum::<usize>(),
        }
    }

    /// Text content of String, LongString and XmlDocument values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::LongString(s) | Self::XmlDocument(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Properties of an Object or ECMA array.
    pub fn as_object(&self) -> Option<&AmfObject> {
        match self {
            Self::Object(m) | Self::EcmaArray(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut AmfObject> {
        match self {
            Self::Object(m) | Self::EcmaArray(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[AmfValue]> {
        match self {
            Self::StrictArray(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<AmfDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Null, Undefined and Unsupported all mean "no value" to a host.
    pub fn is_null_or_undefined(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined | Self::Unsupported)
    }

    /// Looks up a property of an Object or ECMA array.
    pub fn get(&self, key: &str) -> Option<&AmfValue> {
        self.as_object()?.get(key)
    }
}

impl Default for AmfValue {
    fn default() -> Self {
        Self::Null
    }
}

// -- Convenience conversions --

impl From<bool> for AmfValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<f64> for AmfValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<f32> for AmfValue {
    fn from(n: f32) -> Self {
        Self::Number(f64::from(n))
    }
}

macro_rules! from_lossless_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for AmfValue {
                fn from(n: $t) -> Self {
                    Self::Number(f64::from(n))
                }
            }
        )*
    };
}

from_lossless_int!(i8, i16, i32, u8, u16, u32);

impl From<String> for AmfValue {
    fn from(s: String) -> Self {
        Self::string(s)
    }
}

impl From<&str> for AmfValue {
    fn from(s: &str) -> Self {
        Self::string(s)
    }
}

impl<V: Into<AmfValue>> From<Vec<V>> for AmfValue {
    fn from(items: Vec<V>) -> Self {
        Self::StrictArray(items.into_iter().map(Into::into).collect())
    }
}

impl From<AmfObject> for AmfValue {
    fn from(props: AmfObject) -> Self {
        Self::Object(props)
    }
}

impl From<AmfDate> for AmfValue {
    fn from(d: AmfDate) -> Self {
        Self::Date(d)
    }
}

impl From<DateTime<Utc>> for AmfValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Date(dt.into())
    }
}

impl<V: Into<AmfValue>> From<Option<V>> for AmfValue {
    fn from(v: Option<V>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<AmfValue>> FromIterator<(K, V)> for AmfValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for AmfValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_props(f: &mut fmt::Formatter<'_>, props: &AmfObject) -> fmt::Result {
            write!(f, "{{")?;
            for (i, (k, v)) in props.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}: {v}")?;
            }
            write!(f, "}}")
        }

        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::String(s) | Self::LongString(s) => write!(f, "\"{s}\""),
            Self::XmlDocument(s) => write!(f, "xml(<{} bytes>)", s.len()),
            Self::Null => write!(f, "null"),
            Self::Undefined => write!(f, "undefined"),
            Self::Unsupported => write!(f, "unsupported"),
            Self::Date(d) => write!(f, "date({d})"),
            Self::Object(props) => write_props(f, props),
            Self::EcmaArray(props) => {
                write!(f, "ecma")?;
                write_props(f, props)
            }
            Self::StrictArray(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_constructor_picks_layout_by_byte_length() {
        assert!(matches!(AmfValue::string("a".repeat(0xFFFF)), AmfValue::String(_)));
        assert!(matches!(AmfValue::string("a".repeat(0x10000)), AmfValue::LongString(_)));
        // Multi-byte chars count by UTF-8 bytes, not chars.
        let s = "é".repeat(0x8000);
        assert_eq!(s.len(), 0x10000);
        assert!(matches!(AmfValue::string(s), AmfValue::LongString(_)));
    }

    #[test]
    fn accessors() {
        let obj: AmfValue = [("app", AmfValue::from("live")), ("fpad", false.into())]
            .into_iter()
            .collect();
        assert_eq!(obj.get("app").and_then(AmfValue::as_str), Some("live"));
        assert_eq!(obj.get("fpad").and_then(AmfValue::as_bool), Some(false));
        assert_eq!(obj.get("missing"), None);

        assert_eq!(AmfValue::from(3u8).as_number(), Some(3.0));
        assert_eq!(AmfValue::XmlDocument("<a/>".into()).as_str(), Some("<a/>"));
        assert!(AmfValue::Unsupported.is_null_or_undefined());
        assert!(!AmfValue::Boolean(false).is_null_or_undefined());
    }

    #[test]
    fn option_and_vec_conversions() {
        assert_eq!(AmfValue::from(None::<f64>), AmfValue::Null);
        assert_eq!(
            AmfValue::from(vec![1i32, 2]),
            AmfValue::StrictArray(vec![AmfValue::Number(1.0), AmfValue::Number(2.0)])
        );
    }

    #[test]
    fn object_equality_ignores_order() {
        let a: AmfValue = [("x", 1.0), ("y", 2.0)].into_iter().collect();
        let b: AmfValue = [("y", 2.0), ("x", 1.0)].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn encoded_len_of_scalars() {
        assert_eq!(AmfValue::Number(1.0).encoded_len(), 9);
        assert_eq!(AmfValue::Boolean(true).encoded_len(), 2);
        assert_eq!(AmfValue::String("hello".into()).encoded_len(), 8);
        assert_eq!(AmfValue::Date(AmfDate::from_millis(0.0)).encoded_len(), 11);
        assert_eq!(AmfValue::Null.encoded_len(), 1);
        assert_eq!(AmfValue::Object(AmfObject::new()).encoded_len(), 4);
        assert_eq!(AmfValue::EcmaArray(AmfObject::new()).encoded_len(), 8);
    }

    #[test]
    fn display_nested() {
        let v = AmfValue::StrictArray(vec![
            AmfValue::Null,
            [("k", AmfValue::from("v"))].into_iter().collect(),
        ]);
        assert_eq!(v.to_string(), "[null, {k: \"v\"}]");
    }
}
