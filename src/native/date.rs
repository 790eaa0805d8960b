//! Serde helpers mapping `chrono::DateTime<Utc>` to the AMF0 Date type.
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Recording {
//!     #[serde(with = "amfr::native::date")]
//!     started: DateTime<Utc>,
//! }
//! ```
//!
//! With other serde formats the field travels as a plain millisecond number.
//!
//! `DateTime<Utc>` covers a narrower range than AMF0 dates: values beyond
//! about ±8.2e15 ms (chrono's year 262143 limit, while ECMAScript allows
//! ±8.64e15) fail to deserialize through this helper. Use a plain `f64`
//! field to accept every decodable date.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;

use super::DATE_TOKEN;
use crate::types::AmfDate;

pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_newtype_struct(DATE_TOKEN, &AmfDate::from(*value).millis())
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    deserializer.deserialize_newtype_struct(DATE_TOKEN, DateVisitor)
}

struct DateVisitor;

impl<'de> Visitor<'de> for DateVisitor {
    type Value = DateTime<Utc>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("milliseconds since the Unix epoch")
    }

    fn visit_f64<E: de::Error>(self, millis: f64) -> Result<Self::Value, E> {
        AmfDate::from_millis(millis)
            .to_datetime()
            .ok_or_else(|| E::custom(format!("date {millis} ms is out of range")))
    }

    fn visit_i64<E: de::Error>(self, millis: i64) -> Result<Self::Value, E> {
        self.visit_f64(millis as f64)
    }

    fn visit_u64<E: de::Error>(self, millis: u64) -> Result<Self::Value, E> {
        self.visit_f64(millis as f64)
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_f64(self)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde::{Deserialize, Serialize};

    use crate::native::{from_value, to_value};
    use crate::types::{AmfDate, AmfValue};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Recording {
        name: String,
        #[serde(with = "crate::native::date")]
        started: chrono::DateTime<chrono::Utc>,
    }

    #[test]
    fn date_field_maps_to_date_variant() {
        let started = chrono::Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let value = to_value(&Recording {
            name: "cam1".into(),
            started,
        })
        .unwrap();
        assert_eq!(
            value.get("started").and_then(AmfValue::as_date).map(|d| d.millis()),
            Some(1_700_000_000_123.0)
        );

        let back: Recording = from_value(value).unwrap();
        assert_eq!(back.started, started);
    }

    #[test]
    fn date_beyond_chrono_range_fails_but_reads_as_millis() {
        let value: AmfValue = [
            ("name", AmfValue::from("far")),
            ("started", AmfValue::Date(AmfDate::from_millis(8.64e15))),
        ]
        .into_iter()
        .collect();
        assert!(from_value::<Recording>(value.clone()).is_err());

        let started = value.get("started").cloned().unwrap();
        assert_eq!(from_value::<f64>(started).unwrap(), 8.64e15);
    }

    #[test]
    fn non_date_value_is_rejected() {
        let value: AmfValue = [("name", AmfValue::from("x")), ("started", AmfValue::from("now"))]
            .into_iter()
            .collect();
        assert!(from_value::<Recording>(value).is_err());
    }
}
