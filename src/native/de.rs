//! `AmfValue` → host values, through `serde::Deserialize`.

use indexmap::map::IntoIter as PropsIntoIter;
use serde::de::{self, DeserializeSeed, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

use super::DATE_TOKEN;
use crate::error::{AmfError, Result};
use crate::types::{AmfObject, AmfValue};

/// Deserializer over an owned `AmfValue` tree.
pub(crate) struct ValueDeserializer {
    value: AmfValue,
}

impl ValueDeserializer {
    pub(crate) fn new(value: AmfValue) -> Self {
        Self { value }
    }
}

/// Integral targets accept a Number only when it has no fractional part and fits.
macro_rules! deserialize_integer {
    ($($method:ident)*) => {$(
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
            match self.value {
                AmfValue::Number(n) if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 => {
                    visitor.visit_i64(n as i64)
                }
                AmfValue::Number(n) if n.fract() == 0.0 && n >= 0.0 && n < u64::MAX as f64 => {
                    visitor.visit_u64(n as u64)
                }
                other => de::Deserializer::deserialize_any(ValueDeserializer::new(other), visitor),
            }
        }
    )*};
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = AmfError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.value {
            AmfValue::Number(n) => visitor.visit_f64(n),
            AmfValue::Boolean(b) => visitor.visit_bool(b),
            AmfValue::String(s) | AmfValue::LongString(s) | AmfValue::XmlDocument(s) => {
                visitor.visit_string(s)
            }
            AmfValue::Object(props) | AmfValue::EcmaArray(props) => {
                visitor.visit_map(MapDeserializer::new(props))
            }
            AmfValue::StrictArray(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            AmfValue::Date(d) => visitor.visit_f64(d.millis()),
            AmfValue::Null | AmfValue::Undefined | AmfValue::Unsupported => visitor.visit_unit(),
        }
    }

    deserialize_integer! {
        deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        if self.value.is_null_or_undefined() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        if name == DATE_TOKEN {
            return match self.value {
                AmfValue::Date(d) => visitor.visit_f64(d.millis()),
                AmfValue::Number(n) => visitor.visit_f64(n),
                other => Err(de::Error::invalid_type(unexpected(&other), &"an AMF0 date")),
            };
        }
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self.value {
            AmfValue::String(s) | AmfValue::LongString(s) => {
                visitor.visit_enum(s.into_deserializer())
            }
            other => Err(de::Error::invalid_type(
                unexpected(&other),
                &"a string naming a unit variant",
            )),
        }
    }

    forward_to_deserialize_any! {
        bool i128 u128 f32 f64 char str string bytes byte_buf unit unit_struct
        seq tuple tuple_struct map struct identifier ignored_any
    }
}

fn unexpected(value: &AmfValue) -> de::Unexpected<'_> {
    match value {
        AmfValue::Number(n) => de::Unexpected::Float(*n),
        AmfValue::Boolean(b) => de::Unexpected::Bool(*b),
        AmfValue::String(s) | AmfValue::LongString(s) | AmfValue::XmlDocument(s) => {
            de::Unexpected::Str(s)
        }
        AmfValue::Object(_) | AmfValue::EcmaArray(_) => de::Unexpected::Map,
        AmfValue::StrictArray(_) => de::Unexpected::Seq,
        AmfValue::Date(_) => de::Unexpected::Other("date"),
        AmfValue::Null | AmfValue::Undefined | AmfValue::Unsupported => de::Unexpected::Unit,
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<AmfValue>,
}

impl SeqDeserializer {
    fn new(items: Vec<AmfValue>) -> Self {
        Self {
            iter: items.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = AmfError;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: PropsIntoIter<String, AmfValue>,
    value: Option<AmfValue>,
}

impl MapDeserializer {
    fn new(props: AmfObject) -> Self {
        Self {
            iter: props.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = AmfError;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(AmfValue::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        let value = self
            .value
            .take()
            .ok_or_else(|| AmfError::custom("map value requested before its key"))?;
        seed.deserialize(ValueDeserializer::new(value))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::native::from_value;
    use crate::types::AmfDate;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Connect {
        app: String,
        #[serde(rename = "objectEncoding")]
        object_encoding: u8,
        fpad: bool,
        #[serde(default)]
        page_url: Option<String>,
    }

    #[test]
    fn struct_from_object() {
        let value: AmfValue = [
            ("app", AmfValue::from("live")),
            ("objectEncoding", AmfValue::Number(0.0)),
            ("fpad", AmfValue::Boolean(false)),
        ]
        .into_iter()
        .collect();
        let connect: Connect = from_value(value).unwrap();
        assert_eq!(
            connect,
            Connect {
                app: "live".into(),
                object_encoding: 0,
                fpad: false,
                page_url: None,
            }
        );
    }

    #[test]
    fn integral_number_coerces_to_integers() {
        assert_eq!(from_value::<i32>(AmfValue::Number(-7.0)).unwrap(), -7);
        assert_eq!(from_value::<u64>(AmfValue::Number(1e15)).unwrap(), 1_000_000_000_000_000);
    }

    #[test]
    fn fractional_number_does_not_coerce() {
        assert!(from_value::<i32>(AmfValue::Number(1.5)).is_err());
        assert!(from_value::<u8>(AmfValue::Number(300.0)).is_err());
        assert!(from_value::<u32>(AmfValue::Number(-1.0)).is_err());
    }

    #[test]
    fn absent_kinds_become_none() {
        for value in [AmfValue::Null, AmfValue::Undefined, AmfValue::Unsupported] {
            assert_eq!(from_value::<Option<f64>>(value).unwrap(), None);
        }
        assert_eq!(
            from_value::<Option<f64>>(AmfValue::Number(2.0)).unwrap(),
            Some(2.0)
        );
    }

    #[test]
    fn every_text_kind_is_a_string() {
        for value in [
            AmfValue::String("a".into()),
            AmfValue::LongString("a".into()),
            AmfValue::XmlDocument("a".into()),
        ] {
            assert_eq!(from_value::<String>(value).unwrap(), "a");
        }
    }

    #[test]
    fn ecma_array_reads_as_map() {
        let mut props = AmfObject::new();
        props.insert("duration".into(), AmfValue::Number(12.5));
        props.insert("width".into(), AmfValue::Number(640.0));
        let map: indexmap::IndexMap<String, f64> =
            from_value(AmfValue::EcmaArray(props)).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["duration", "width"]);
        assert_eq!(map["duration"], 12.5);
    }

    #[test]
    fn strict_array_reads_as_seq_and_tuple() {
        let value = AmfValue::StrictArray(vec![AmfValue::Number(1.0), AmfValue::from("x")]);
        let (n, s): (f64, String) = from_value(value).unwrap();
        assert_eq!((n, s.as_str()), (1.0, "x"));
    }

    #[test]
    fn date_reads_as_millis() {
        let millis: f64 = from_value(AmfValue::Date(AmfDate::from_millis(2500.0))).unwrap();
        assert_eq!(millis, 2500.0);
    }

    #[test]
    fn unit_variant_from_string() {
        #[derive(Debug, Deserialize, PartialEq)]
        enum Level {
            #[serde(rename = "status")]
            Status,
            #[serde(rename = "error")]
            Error,
        }
        assert_eq!(from_value::<Level>(AmfValue::from("status")).unwrap(), Level::Status);
        assert_eq!(from_value::<Level>(AmfValue::from("error")).unwrap(), Level::Error);
        assert!(from_value::<Level>(AmfValue::Number(0.0)).is_err());
    }

    #[test]
    fn type_mismatch_is_reported() {
        let err = from_value::<bool>(AmfValue::from("yes")).unwrap_err();
        assert!(matches!(err, AmfError::Message(_)));
    }
}
