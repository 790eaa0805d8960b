//! AMF0 decoding: bytes → `AmfValue`.

use std::io::Read;

use super::byteorder::{from_be16, from_be32};
use super::marker::{OBJECT_END_SEQUENCE, WireType};
use crate::error::{AmfError, Result};
use crate::options::Options;
use crate::stream::RewindReader;
use crate::types::{AmfDate, AmfObject, AmfValue};

/// Upper bound on slots reserved up front for a strict array, whatever its
/// declared count.
const MAX_PREALLOC: usize = 1024;

/// Decodes a single value from `reader` with default [`Options`].
pub fn decode_value<R: Read>(reader: R) -> Result<AmfValue> {
    decode_value_with(reader, &Options::default())
}

/// Decodes a single value from `reader`.
///
/// A successful decode consumes exactly the bytes of one value, so the
/// reader can be reused for the next one.
pub fn decode_value_with<R: Read>(reader: R, options: &Options) -> Result<AmfValue> {
    let mut source = RewindReader::new(reader);
    let value = read_value(&mut source, options)?;
    // Every lookahead window is re-read by the key that follows it.
    debug_assert_eq!(source.buffered(), 0);
    Ok(value)
}

/// Decodes a single value from a rewindable source.
pub fn read_value<R: Read>(source: &mut RewindReader<R>, options: &Options) -> Result<AmfValue> {
    Decoder {
        source,
        options,
        depth: 0,
    }
    .value()
}

/// Per-call decode state. Nothing here outlives one top-level value.
struct Decoder<'a, R> {
    source: &'a mut RewindReader<R>,
    options: &'a Options,
    depth: usize,
}

impl<R: Read> Decoder<'_, R> {
    fn value(&mut self) -> Result<AmfValue> {
        let m = self.read_u8()?;
        let Some(wire_type) = WireType::from_marker(m) else {
            tracing::debug!(marker = m, "unknown AMF0 marker decoded as unsupported");
            return Ok(AmfValue::Unsupported);
        };

        match wire_type {
            WireType::Number => Ok(AmfValue::Number(self.read_f64()?)),
            WireType::Boolean => Ok(AmfValue::Boolean(self.read_u8()? != 0)),
            WireType::String => self.read_short_utf8().map(AmfValue::String),
            WireType::Object => self.nested(|d| d.properties("object").map(AmfValue::Object)),
            WireType::Null => Ok(AmfValue::Null),
            WireType::Undefined => Ok(AmfValue::Undefined),
            WireType::EcmaArray => self.nested(Self::ecma_array),
            WireType::StrictArray => self.nested(Self::strict_array),
            WireType::Date => {
                let millis = self.read_f64()?;
                let _offset = self.read_u16()?;
                Ok(AmfValue::Date(AmfDate::from_millis(millis)))
            }
            WireType::LongString => self.read_long_utf8().map(AmfValue::LongString),
            WireType::Unsupported => Ok(AmfValue::Unsupported),
            WireType::XmlDocument => self.read_long_utf8().map(AmfValue::XmlDocument),
            WireType::ObjectEnd => Err(AmfError::UnexpectedObjectEnd),
            // Legacy types: their payloads cannot be skipped safely.
            WireType::MovieClip
            | WireType::Reference
            | WireType::RecordSet
            | WireType::TypedObject => {
                tracing::debug!(marker = m, kind = wire_type.name(), "rejected AMF0 wire type");
                Err(AmfError::UnsupportedWireType {
                    marker: m,
                    name: wire_type.name(),
                })
            }
        }
    }

    /// Runs `f` one composite level deeper, enforcing the depth limit.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.depth += 1;
        if let Some(limit) = self.options.depth_limit()
            && self.depth > limit
        {
            tracing::debug!(limit, "AMF0 nesting limit exceeded");
            return Err(AmfError::NestingTooDeep { limit });
        }
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn ecma_array(&mut self) -> Result<AmfValue> {
        // Informative only: the terminator, not the count, ends the array.
        let declared = self.read_u32()?;
        let props = self.properties("ecma array")?;
        if declared as usize != props.len() {
            tracing::debug!(declared, actual = props.len(), "ECMA array count mismatch");
        }
        Ok(AmfValue::EcmaArray(props))
    }

    fn strict_array(&mut self) -> Result<AmfValue> {
        let count = self.read_u32()? as usize;
        self.check_elements(count)?;
        let mut items = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            items.push(self.value()?);
        }
        Ok(AmfValue::StrictArray(items))
    }

    /// Reads key/value pairs up to and including the `00 00 09` terminator.
    /// Duplicate keys keep the last value.
    fn properties(&mut self, kind: &'static str) -> Result<AmfObject> {
        tracing::trace!(kind, depth = self.depth, "decoding composite");
        let mut props = AmfObject::new();
        let mut pairs = 0usize;
        while !self.at_object_end()? {
            pairs += 1;
            self.check_elements(pairs)?;
            let key = self.read_short_utf8()?;
            let value = self.value()?;
            props.insert(key, value);
        }
        tracing::trace!(kind, pairs, "composite terminated");
        Ok(props)
    }

    /// Peeks three bytes for the terminator. On a match they are consumed;
    /// otherwise the source is rewound so the next key reads them again.
    fn at_object_end(&mut self) -> Result<bool> {
        let mut window = [0u8; OBJECT_END_SEQUENCE.len()];
        self.source.mark(window.len());
        if let Err(e) = self.source.read_exact(&mut window) {
            self.source.clear_mark();
            return Err(e.into());
        }
        if window == OBJECT_END_SEQUENCE {
            self.source.clear_mark();
            Ok(true)
        } else {
            self.source.reset()?;
            Ok(false)
        }
    }

    fn check_elements(&self, count: usize) -> Result<()> {
        match self.options.element_limit() {
            Some(limit) if count > limit => {
                tracing::debug!(count, limit, "AMF0 element limit exceeded");
                Err(AmfError::TooManyElements { count, limit })
            }
            _ => Ok(()),
        }
    }

    // -- Field readers --

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        self.source.read_exact(&mut bytes)?;
        Ok(bytes)
    }

    fn read_u8(&mut self) -> Result<u8> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    fn read_u16(&mut self) -> Result<u16> {
        Ok(from_be16(self.read_array()?))
    }

    fn read_u32(&mut self) -> Result<u32> {
        Ok(from_be32(self.read_array()?))
    }

    fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_be_bytes(self.read_array()?))
    }

    fn read_short_utf8(&mut self) -> Result<String> {
        let len = usize::from(self.read_u16()?);
        self.read_utf8(len)
    }

    fn read_long_utf8(&mut self) -> Result<String> {
        let len = self.read_u32()? as usize;
        self.read_utf8(len)
    }

    /// Reads exactly `len` bytes, growing the buffer as data actually arrives
    /// so a lying length prefix cannot force a huge allocation.
    fn read_utf8(&mut self, len: usize) -> Result<String> {
        let mut data = Vec::with_capacity(len.min(u16::MAX as usize));
        self.source
            .by_ref()
            .take(len as u64)
            .read_to_end(&mut data)?;
        if data.len() < len {
            return Err(AmfError::UnexpectedEndOfStream);
        }
        String::from_utf8(data).map_err(|_| AmfError::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amf0::encode::encode_value;

    fn decode(bytes: &[u8]) -> Result<AmfValue> {
        decode_value(bytes)
    }

    fn round_trip(value: &AmfValue) -> AmfValue {
        let mut buf = Vec::new();
        encode_value(&mut buf, value).expect("encode failed");
        decode(&buf).expect("decode failed")
    }

    #[test]
    fn decode_hello_world() {
        let bytes = [
            0x02, 0x00, 0x0B, 0x68, 0x65, 0x6C, 0x6C, 0x6F, 0x20, 0x77, 0x6F, 0x72, 0x6C, 0x64,
        ];
        assert_eq!(decode(&bytes).unwrap(), AmfValue::String("hello world".into()));
    }

    #[test]
    fn nonzero_boolean_is_true() {
        assert_eq!(decode(&[0x01, 0x7F]).unwrap(), AmfValue::Boolean(true));
        assert_eq!(decode(&[0x01, 0x00]).unwrap(), AmfValue::Boolean(false));
    }

    #[test]
    fn date_offset_is_discarded() {
        let bytes = [0x0B, 0x40, 0xA3, 0x88, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0x10];
        assert_eq!(
            decode(&bytes).unwrap(),
            AmfValue::Date(AmfDate::from_millis(2500.0))
        );
    }

    #[test]
    fn legacy_markers_are_rejected() {
        for (m, name) in [
            (0x04, "MovieClip"),
            (0x07, "Reference"),
            (0x0E, "RecordSet"),
            (0x10, "TypedObject"),
        ] {
            match decode(&[m, 0x00, 0x01]) {
                Err(AmfError::UnsupportedWireType { marker, name: n }) => {
                    assert_eq!(marker, m);
                    assert_eq!(n, name);
                }
                other => panic!("marker 0x{m:02X}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn lone_reference_marker_fails() {
        assert!(matches!(
            decode(&[0x07]),
            Err(AmfError::UnsupportedWireType { marker: 0x07, .. })
        ));
    }

    #[test]
    fn unknown_marker_decodes_as_unsupported_without_consuming() {
        let data = [0x11u8, 0x05];
        let mut reader = &data[..];
        assert_eq!(decode_value(&mut reader).unwrap(), AmfValue::Unsupported);
        assert_eq!(reader, &[0x05]);
    }

    #[test]
    fn top_level_object_end_is_an_error() {
        assert!(matches!(decode(&[0x09]), Err(AmfError::UnexpectedObjectEnd)));
    }

    #[test]
    fn empty_key_is_not_the_terminator() {
        let bytes = [
            0x03, // object
            0x00, 0x00, // key ""
            0x00, 0x3F, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 1.0
            0x00, 0x01, b'x', // key "x"
            0x05, // null
            0x00, 0x00, 0x09, // end
        ];
        let value = decode(&bytes).unwrap();
        let props = value.as_object().unwrap();
        assert_eq!(props.len(), 2);
        assert_eq!(props.get(""), Some(&AmfValue::Number(1.0)));
        assert_eq!(props.get("x"), Some(&AmfValue::Null));
    }

    #[test]
    fn ecma_count_is_not_trusted() {
        let bytes = [
            0x08, 0x00, 0x00, 0x00, 0x00, // ecma array, count 0
            0x00, 0x01, b'a', 0x01, 0x01, // a: true
            0x00, 0x01, b'b', 0x05, // b: null
            0x00, 0x00, 0x09,
        ];
        let value = decode(&bytes).unwrap();
        assert!(matches!(value, AmfValue::EcmaArray(_)));
        let props = value.as_object().unwrap();
        assert_eq!(props.len(), 2);
        assert_eq!(props["a"], AmfValue::Boolean(true));
        assert_eq!(props["b"], AmfValue::Null);
    }

    #[test]
    fn duplicate_keys_keep_last_value() {
        let bytes = [
            0x03, //
            0x00, 0x01, b'k', 0x01, 0x00, // k: false
            0x00, 0x01, b'k', 0x01, 0x01, // k: true
            0x00, 0x00, 0x09,
        ];
        let value = decode(&bytes).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 1);
        assert_eq!(value.get("k"), Some(&AmfValue::Boolean(true)));
    }

    #[test]
    fn strict_array_count_is_authoritative() {
        // Count 1: the trailing null is not part of the array.
        let data = [0x0A, 0x00, 0x00, 0x00, 0x01, 0x06, 0x05];
        let mut reader = &data[..];
        assert_eq!(
            decode_value(&mut reader).unwrap(),
            AmfValue::StrictArray(vec![AmfValue::Undefined])
        );
        assert_eq!(reader, &[0x05]);
    }

    #[test]
    fn truncated_inputs_report_end_of_stream() {
        let cases: &[&[u8]] = &[
            &[],
            &[0x00, 0x40, 0x45],
            &[0x01],
            &[0x02, 0x00, 0x05, b'a'],
            &[0x03, 0x00, 0x01, b'a'],
            &[0x03, 0x00, 0x00],
            &[0x08, 0x00, 0x00],
            &[0x0A, 0x00, 0x00, 0x00, 0x02, 0x05],
            &[0x0B, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
            &[0x0C, 0x00, 0x01, 0x00, 0x00],
        ];
        for bytes in cases {
            assert!(
                matches!(decode(bytes), Err(AmfError::UnexpectedEndOfStream)),
                "expected end of stream for {bytes:02X?}"
            );
        }
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        assert!(matches!(
            decode(&[0x02, 0x00, 0x02, 0xC3, 0x28]),
            Err(AmfError::InvalidUtf8)
        ));
    }

    #[test]
    fn depth_limit_is_enforced() {
        // [[[null]]]
        let bytes = [
            0x0A, 0x00, 0x00, 0x00, 0x01, //
            0x0A, 0x00, 0x00, 0x00, 0x01, //
            0x0A, 0x00, 0x00, 0x00, 0x01, 0x05,
        ];
        let strict = Options::new().max_depth(Some(2));
        assert!(matches!(
            decode_value_with(&bytes[..], &strict),
            Err(AmfError::NestingTooDeep { limit: 2 })
        ));
        let relaxed = Options::new().max_depth(Some(3));
        assert!(decode_value_with(&bytes[..], &relaxed).is_ok());
    }

    #[test]
    fn declared_count_over_limit_fails_before_reading_elements() {
        let bytes = [0x0A, 0xFF, 0xFF, 0xFF, 0xFF];
        let opts = Options::new().max_elements(Some(10));
        assert!(matches!(
            decode_value_with(&bytes[..], &opts),
            Err(AmfError::TooManyElements { limit: 10, .. })
        ));
    }

    #[test]
    fn huge_declared_count_without_data_is_end_of_stream() {
        let bytes = [0x0A, 0xFF, 0xFF, 0xFF, 0xFF, 0x05];
        assert!(matches!(
            decode_value_with(&bytes[..], &Options::unlimited()),
            Err(AmfError::UnexpectedEndOfStream)
        ));
    }

    #[test]
    fn object_pair_limit_is_enforced() {
        let bytes = [
            0x03, //
            0x00, 0x01, b'a', 0x05, //
            0x00, 0x01, b'b', 0x05, //
            0x00, 0x00, 0x09,
        ];
        let opts = Options::new().max_elements(Some(1));
        assert!(matches!(
            decode_value_with(&bytes[..], &opts),
            Err(AmfError::TooManyElements { count: 2, limit: 1 })
        ));
    }

    #[test]
    fn round_trip_nested_composites() {
        let mut leaf = AmfObject::new();
        leaf.insert("n".into(), AmfValue::Number(-0.25));
        leaf.insert("s".into(), AmfValue::String("ü".into()));

        let mut top = AmfObject::new();
        top.insert(
            "list".into(),
            AmfValue::StrictArray(vec![AmfValue::Object(leaf), AmfValue::Undefined]),
        );
        top.insert("when".into(), AmfValue::Date(AmfDate::from_millis(1.5)));
        let value = AmfValue::Object(top);

        assert_eq!(round_trip(&value), value);
    }
}
