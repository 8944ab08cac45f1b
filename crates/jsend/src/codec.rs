//! Conversion between [`Envelope`] and JSend JSON.
//!
//! The structured record is a `serde_json::Map`; the workspace enables
//! `preserve_order`, so keys are emitted in insertion order: `status` first,
//! then `data` for success and fail, or `message`, `code`, `data` for error.

use crate::envelope::Envelope;
use crate::error::{JSendError, Result};
use crate::status::Status;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

pub type Record = Map<String, Value>;

impl Envelope {
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("status".into(), Value::from(self.status().as_str()));

        match self.status() {
            Status::Error => {
                record.insert(
                    "message".into(),
                    Value::from(self.message().unwrap_or_default()),
                );
                if let Some(code) = self.code() {
                    record.insert("code".into(), Value::from(code));
                }
                if let Some(data) = self.data() {
                    record.insert("data".into(), data.clone());
                }
            }
            Status::Success | Status::Fail => {
                record.insert("data".into(), self.data().cloned().unwrap_or(Value::Null));
            }
        }

        record
    }

    pub fn encode(&self) -> String {
        Value::Object(self.to_record()).to_string()
    }

    pub fn encode_pretty(&self) -> String {
        // A Value with string keys always serializes.
        serde_json::to_string_pretty(&Value::Object(self.to_record())).unwrap_or_default()
    }

    pub fn decode(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::decode_value(&value)
    }

    /// Decodes an already parsed JSON document. Anything other than an object
    /// has no `status` and is rejected as such.
    pub fn decode_value(value: &Value) -> Result<Self> {
        match value.as_object() {
            Some(record) => Self::decode_record(record),
            None => Err(JSendError::MissingStatus),
        }
    }

    pub fn decode_record(record: &Record) -> Result<Self> {
        let status = match record.get("status") {
            None | Some(Value::Null) => return Err(JSendError::MissingStatus),
            Some(Value::String(status)) => status.parse::<Status>()?,
            Some(other) => return Err(JSendError::InvalidStatus(other.to_string())),
        };

        tracing::debug!(%status, "decoding JSend record");

        match status {
            Status::Success => Ok(Self::success(required_data(record, status)?)),
            Status::Fail => Ok(Self::fail(required_data(record, status)?)),
            Status::Error => decode_error(record),
        }
    }
}

fn required_data(record: &Record, status: Status) -> Result<Value> {
    record
        .get("data")
        .cloned()
        .ok_or(JSendError::MissingData { status })
}

fn decode_error(record: &Record) -> Result<Envelope> {
    let message = match record.get("message") {
        None | Some(Value::Null) => return Err(JSendError::MissingMessage),
        Some(Value::String(message)) => message.clone(),
        Some(_) => {
            return Err(JSendError::InvalidField {
                field: "message",
                expected: "a string",
            })
        }
    };

    let code = match record.get("code") {
        None | Some(Value::Null) => None,
        Some(code) => Some(integral_code(code).ok_or(JSendError::InvalidField {
            field: "code",
            expected: "a 64-bit integer",
        })?),
    };

    Ok(Envelope::error(message, code, record.get("data").cloned()))
}

/// JSON Schema counts `500.0` as an integer, so integral floats inside the
/// i64 range are accepted too.
fn integral_code(code: &Value) -> Option<i64> {
    code.as_i64().or_else(|| {
        code.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Envelope {
    type Err = JSendError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Envelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::decode_value(&value).map_err(de::Error::custom)
    }
}
