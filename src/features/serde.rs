use core::fmt;

use serde::de::{Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::DynBytes;

impl Serialize for DynBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.as_slice())
    }
}

struct DynBytesVisitor;

impl<'de> Visitor<'de> for DynBytesVisitor {
    type Value = DynBytes;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a byte string")
    }

    fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<DynBytes, E> {
        Ok(DynBytes::from(v))
    }

    fn visit_borrowed_bytes<E: serde::de::Error>(self, v: &'de [u8]) -> Result<DynBytes, E> {
        Ok(DynBytes::from(v))
    }

    fn visit_byte_buf<E: serde::de::Error>(self, v: Vec<u8>) -> Result<DynBytes, E> {
        Ok(DynBytes::from(v))
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<DynBytes, E> {
        Ok(DynBytes::from(v))
    }

    fn visit_string<E: serde::de::Error>(self, v: String) -> Result<DynBytes, E> {
        Ok(DynBytes::from(v))
    }

    // some formats (e.g. JSON) represent byte strings as sequences of numbers
    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<DynBytes, A::Error> {
        let mut out = DynBytes::default();
        if let Some(size) = seq.size_hint() {
            out.reserve(size);
        }
        while let Some(byte) = seq.next_element::<u8>()? {
            out.push(byte);
        }
        Ok(out)
    }
}

impl<'de> Deserialize<'de> for DynBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_bytes(DynBytesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::DynBytes;

    #[test]
    fn roundtrips_through_json() {
        let original = DynBytes::new(b"bytes \0 with zeros").unwrap();

        let encoded = serde_json::to_string(&original).unwrap();
        let decoded: DynBytes = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn deserializes_from_a_json_string() {
        let decoded: DynBytes = serde_json::from_str("\"plain text\"").unwrap();
        assert_eq!(decoded, b"plain text"[..]);
    }
}
