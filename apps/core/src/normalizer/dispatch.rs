//! Label dispatch: turns a handler response into the `{status, message}` envelope.
//!
//! Rules, in order:
//! 1. `status: error` passes the upstream message through (or a generic one).
//! 2. A response without `data` is an error, whatever its status says.
//! 3. The label picks where the message lives; a miss substitutes the
//!    label's fallback and keeps `status: success`.

use serde_json::Value;
use tracing::{debug, warn};

use super::exam;
use super::fallback;
use super::label::ClassificationLabel;
use super::payload::{HandlerData, NormalizedResponse, RawHandlerResponse, ResponseBody, ResponseStatus};
use crate::models::ClassificationResponse;

/// Normalizes a handler response produced for `label`.
pub fn normalize(raw: &RawHandlerResponse, label: ClassificationLabel) -> NormalizedResponse {
    let data = match checked_data(raw) {
        Ok(data) => data,
        Err(out) => return out,
    };

    let message = extract(data, label).unwrap_or_else(|| {
        warn!(label = %label, "No user content at the expected path, using fallback");
        fallback::for_label(label).to_string()
    });
    debug!(label = %label, chars = message.chars().count(), "Message extracted");
    NormalizedResponse::success(message)
}

/// Normalizes with a label that arrived as a raw string.
///
/// Tags outside the closed set get best-effort extraction of `data.response`.
pub fn normalize_tagged(raw: &RawHandlerResponse, tag: &str) -> NormalizedResponse {
    match tag.parse::<ClassificationLabel>() {
        Ok(label) => normalize(raw, label),
        Err(unknown) => {
            warn!(tag = %unknown.0, "Unknown classification, using generic extraction");
            normalize_unrecognized(raw)
        }
    }
}

/// Normalizes a full pipeline envelope.
pub fn normalize_classification(response: &ClassificationResponse) -> NormalizedResponse {
    match &response.response_data {
        Some(raw) => normalize_tagged(raw, &response.classification),
        None => {
            warn!(classification = %response.classification, "Pipeline returned no handler response");
            NormalizedResponse::error(fallback::MISSING_RESPONSE_DATA)
        }
    }
}

/// Label-specific lookup. `None` means nothing usable at the expected path.
pub fn extract(data: &HandlerData, label: ClassificationLabel) -> Option<String> {
    match label {
        ClassificationLabel::GuidanceBased | ClassificationLabel::SubjectRelated => data
            .response
            .as_ref()
            .and_then(|body| body.field("text"))
            .and_then(non_empty_text),
        ClassificationLabel::AppRelated | ClassificationLabel::ConversationBased => data
            .response
            .as_ref()
            .and_then(ResponseBody::as_text)
            .filter(|text| !text.is_empty())
            .map(str::to_string),
        ClassificationLabel::Complaint => data.text.as_ref().and_then(non_empty_text),
        ClassificationLabel::ExamRelatedInfo => exam::extract(data),
    }
}

fn normalize_unrecognized(raw: &RawHandlerResponse) -> NormalizedResponse {
    let data = match checked_data(raw) {
        Ok(data) => data,
        Err(out) => return out,
    };
    let message = data
        .response
        .as_ref()
        .map(ResponseBody::stringify)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| fallback::GENERIC.to_string());
    NormalizedResponse::success(message)
}

/// Applies the label-independent rules and hands back `data` when extraction may proceed.
fn checked_data(raw: &RawHandlerResponse) -> Result<&HandlerData, NormalizedResponse> {
    if raw.status == ResponseStatus::Error {
        let message = raw
            .message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback::UPSTREAM_ERROR);
        debug!(upstream_message = message, "Upstream handler reported an error");
        return Err(NormalizedResponse::error(message));
    }

    raw.data.as_ref().ok_or_else(|| {
        warn!("Handler response has no data");
        NormalizedResponse::error(fallback::MISSING_DATA)
    })
}

/// Text content of a JSON value. Falsy values (`null`, `false`, zero, empty
/// strings and empty containers) count as absent.
pub(super) fn non_empty_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::String(_) | Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}
