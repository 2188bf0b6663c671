//! Handler payload shapes and the normalized output envelope.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Status flag shared by handler responses and the normalized envelope.
///
/// A handler response without a `status` field is treated as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    #[default]
    Error,
}

/// Response produced by an upstream content handler.
///
/// Owned by the caller; the normalizer only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHandlerResponse {
    #[serde(default)]
    pub status: ResponseStatus,
    /// Handler-shaped payload. `null` and a missing key both land here as
    /// `None`; a non-object value becomes an empty `HandlerData`.
    #[serde(default, deserialize_with = "lenient_data")]
    pub data: Option<HandlerData>,
    /// Diagnostic text, mostly set on errors. Non-string values are kept as
    /// their JSON text.
    #[serde(
        default,
        deserialize_with = "lenient_message",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Accepts any JSON for `data` so a malformed payload never hides the
/// handler's status and message.
fn lenient_data<'de, D>(deserializer: D) -> Result<Option<HandlerData>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        object @ Value::Object(_) => serde_json::from_value(object)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(Some(HandlerData::default())),
    }
}

fn lenient_message<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

/// The `data` object of a handler response.
///
/// Only the fields the normalizer reads are typed; everything else a handler
/// emits (`classifiedAs`, `has_formatted_response`, `ticket_created`, ...) is
/// kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandlerData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_response: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `data.response` is a plain string for some handlers and an object for others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Text(String),
    Structured(Map<String, Value>),
    /// Arrays, numbers and booleans: never produced by a known handler
    Other(Value),
}

impl ResponseBody {
    /// The body when it is a plain string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            _ => None,
        }
    }

    /// A field of a structured body
    pub fn field(&self, key: &str) -> Option<&Value> {
        match self {
            ResponseBody::Structured(map) => map.get(key),
            _ => None,
        }
    }

    /// String representation: text verbatim, anything else as compact JSON.
    pub fn stringify(&self) -> String {
        match self {
            ResponseBody::Text(text) => text.clone(),
            ResponseBody::Structured(map) => {
                serde_json::to_string(map).unwrap_or_default()
            }
            ResponseBody::Other(value) => value.to_string(),
        }
    }
}

/// The flat envelope handed to the messaging client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl NormalizedResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}
