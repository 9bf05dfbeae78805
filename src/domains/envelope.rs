use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{RelayError, Result};

pub const MESSAGE_TYPE: &str = "MessageType";

/// A single message on a subscriber's delivery queue.
///
/// The discriminator is a dedicated field, so an envelope without a
/// `MessageType` cannot be constructed. Fields keep their insertion order and
/// are serialized after the discriminator.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    message_type: String,
    fields: Map<String, Value>,
}

impl Envelope {
    pub fn builder(message_type: impl Into<String>) -> EnvelopeBuilder {
        EnvelopeBuilder {
            message_type: message_type.into(),
            fields: Map::new(),
        }
    }

    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        if field == MESSAGE_TYPE {
            return None;
        }
        self.fields.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn to_value(&self) -> Value {
        let mut map = Map::with_capacity(self.fields.len() + 1);
        map.insert(
            MESSAGE_TYPE.to_string(),
            Value::String(self.message_type.clone()),
        );
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }
}

impl TryFrom<Value> for Envelope {
    type Error = RelayError;

    fn try_from(value: Value) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(RelayError::InvalidEnvelope("not a JSON object".to_string()));
        };
        let message_type = match fields.remove(MESSAGE_TYPE) {
            Some(Value::String(kind)) if !kind.trim().is_empty() => kind,
            Some(_) => {
                return Err(RelayError::InvalidEnvelope(
                    "MessageType must be a non-empty string".to_string(),
                ))
            }
            None => {
                return Err(RelayError::InvalidEnvelope(
                    "missing MessageType".to_string(),
                ))
            }
        };
        Ok(Self {
            message_type,
            fields,
        })
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(MESSAGE_TYPE, &self.message_type)?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Envelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Envelope::try_from(value).map_err(D::Error::custom)
    }
}

pub struct EnvelopeBuilder {
    message_type: String,
    fields: Map<String, Value>,
}

impl EnvelopeBuilder {
    /// Adds a field. A value that cannot be represented as JSON is stored as
    /// `null`; a field named `MessageType` is ignored.
    pub fn field(mut self, name: &str, value: impl Serialize) -> Self {
        if name == MESSAGE_TYPE {
            tracing::debug!(message_type = %self.message_type, "ignoring MessageType field override");
            return self;
        }
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn build(self) -> Envelope {
        Envelope {
            message_type: self.message_type,
            fields: self.fields,
        }
    }
}
