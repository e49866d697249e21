use crate::id::{BYTE_LENGTH, Ksuid};
use core::fmt;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Human-readable formats (JSON, TOML, ...) carry the 27-character text
/// form; binary formats carry the raw 20 bytes. Both round-trip exactly.
impl Serialize for Ksuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(self.encoded().as_str())
        } else {
            serializer.serialize_bytes(self.as_bytes())
        }
    }
}

impl<'de> Deserialize<'de> for Ksuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(KsuidVisitor)
        } else {
            deserializer.deserialize_bytes(KsuidVisitor)
        }
    }
}

struct KsuidVisitor;

impl<'de> Visitor<'de> for KsuidVisitor {
    type Value = Ksuid;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a 27-character base62 string or 20 raw bytes")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ksuid::parse(v).map_err(E::custom)
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ksuid::from_bytes(v).map_err(E::custom)
    }

    // Some binary formats hand fixed-size byte strings over as sequences.
    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        let mut bytes = [0_u8; BYTE_LENGTH];
        for (index, byte) in bytes.iter_mut().enumerate() {
            *byte = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(index, &self))?;
        }
        if seq.next_element::<u8>()?.is_some() {
            return Err(de::Error::invalid_length(BYTE_LENGTH + 1, &self));
        }
        Ok(Ksuid::from(bytes))
    }
}
