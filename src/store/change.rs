use std::time::SystemTime;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::record::RecordError;

/// A single entry in the store's change feed.
///
/// Emitted to subscribers after every successful mutation, JSON-encoded.
/// The payload is the affected record (or link) in bitcode form; in JSON
/// it travels base64-encoded.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ChangeRecord {
    /// Change kind, `"<collection>.<verb>"` — e.g. `"courses.added"`,
    /// `"topics.detached"`.
    pub kind: String,
    #[serde(with = "payload_serde")]
    pub payload: Vec<u8>,
    /// Monotonic position in the store's change feed.
    pub sequence: u64,
    pub timestamp: SystemTime,
}

mod payload_serde {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(payload: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        STANDARD.encode(payload).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

impl ChangeRecord {
    /// Build a change record with a bitcode-serialized payload.
    pub fn encode<T: Serialize>(
        kind: impl Into<String>,
        payload: &T,
        sequence: u64,
    ) -> Result<Self, RecordError> {
        let bytes = bitcode::serialize(payload)?;
        Ok(ChangeRecord {
            kind: kind.into(),
            payload: bytes,
            sequence,
            timestamp: SystemTime::now(),
        })
    }

    /// Deserialize the payload into the specified type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, RecordError> {
        Ok(bitcode::deserialize(&self.payload)?)
    }

    /// Get the raw payload bytes.
    pub fn payload_bytes(&self) -> &[u8] {
        &self.payload
    }
}
