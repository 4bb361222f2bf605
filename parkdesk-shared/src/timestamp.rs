use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Timestamp shapes observed in documents returned by the hosted store.
///
/// Older records carry the structured `{seconds, nanoseconds}` form the
/// store's native clients write, records created through the admin tools
/// carry an RFC 3339 string, and bulk exports carry bare epoch milliseconds.
/// Everything downstream of the record-access boundary works with
/// `DateTime<Utc>` only.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Structured {
        seconds: i64,
        #[serde(default)]
        nanoseconds: u32,
    },
    Rfc3339(DateTime<Utc>),
    EpochMillis(i64),
}

impl RawTimestamp {
    /// Convert to the canonical instant type. `None` only for values outside
    /// the representable range.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        match self {
            RawTimestamp::Structured {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(seconds, nanoseconds),
            RawTimestamp::Rfc3339(dt) => Some(dt),
            RawTimestamp::EpochMillis(ms) => DateTime::from_timestamp_millis(ms),
        }
    }
}

/// Best-effort read of a raw document field as an instant. Used when
/// comparing stored values against wall-clock now without decoding the whole
/// record.
pub fn coerce(value: &Value) -> Option<DateTime<Utc>> {
    serde_json::from_value::<RawTimestamp>(value.clone())
        .ok()
        .and_then(RawTimestamp::to_utc)
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawTimestamp::deserialize(deserializer)?;
    raw.to_utc()
        .ok_or_else(|| serde::de::Error::custom("timestamp out of representable range"))
}

/// `with`-module for optional timestamp fields.
pub mod opt {
    use super::RawTimestamp;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
        match raw {
            Some(raw) => raw
                .to_utc()
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom("timestamp out of representable range")),
            None => Ok(None),
        }
    }
}
