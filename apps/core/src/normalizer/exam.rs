//! Exam response extraction.
//!
//! Exam handlers produce the most varied payloads: a GPT-formatted message,
//! a structured object with a `text` field, or raw `alternatives` /
//! `questions` listings. The tiers below are tried in order and the first
//! one that yields content wins.

use serde_json::Value;
use tracing::debug;

use super::dispatch::non_empty_text;
use super::payload::{HandlerData, ResponseBody};

/// Header line placed above rendered alternatives
pub const SUGGESTIONS_HEADER: &str = "Here are some suggestions:";
/// Prefix of each rendered alternative
pub const BULLET: &str = "• ";

const LISTING_KEYS: [&str; 3] = ["text", "alternatives", "questions"];

/// One step of the exam lookup
pub type ExamTier = fn(&HandlerData) -> Option<String>;

/// Lookup order for exam responses
pub const EXAM_TIERS: [(&str, ExamTier); 3] = [
    ("formatted_response", formatted_response),
    ("response_text", response_text),
    ("response_listing", response_listing),
];

/// Runs the tiers in order.
pub fn extract(data: &HandlerData) -> Option<String> {
    EXAM_TIERS.iter().find_map(|(name, tier)| {
        let found = tier(data);
        if found.is_some() {
            debug!(tier = *name, "exam content resolved");
        }
        found
    })
}

/// Pre-formatted message from the upstream formatter, taken verbatim.
pub fn formatted_response(data: &HandlerData) -> Option<String> {
    data.formatted_response.as_ref().and_then(non_empty_text)
}

/// `data.response.text` on a structured response.
pub fn response_text(data: &HandlerData) -> Option<String> {
    data.response
        .as_ref()?
        .field("text")
        .and_then(non_empty_text)
}

/// Renders `alternatives` or `questions`, otherwise the response's string form.
pub fn response_listing(data: &HandlerData) -> Option<String> {
    let body = data.response.as_ref()?;
    let map = match body {
        ResponseBody::Structured(map) => map,
        other => return Some(other.stringify()).filter(|s| !s.is_empty()),
    };

    if let Some(alternatives) = non_empty_array(map.get("alternatives")) {
        return Some(render_alternatives(alternatives));
    }
    if let Some(questions) = non_empty_array(map.get("questions")) {
        return Some(render_questions(questions)).filter(|s| !s.is_empty());
    }
    // Known keys that were present but empty mean "nothing to show"
    if map.is_empty() || LISTING_KEYS.iter().any(|key| map.contains_key(*key)) {
        return None;
    }
    Some(body.stringify())
}

fn non_empty_array(value: Option<&Value>) -> Option<&Vec<Value>> {
    value.and_then(Value::as_array).filter(|items| !items.is_empty())
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn render_alternatives(alternatives: &[Value]) -> String {
    let bullets = alternatives
        .iter()
        .map(|alt| format!("{}{}", BULLET, plain(alt)))
        .collect::<Vec<String>>()
        .join("\n");
    format!("{}\n\n{}", SUGGESTIONS_HEADER, bullets)
}

/// `Q{n}: ...` entries separated by a blank line. Numbering follows list
/// position, so a malformed entry still consumes its index.
pub fn render_questions(questions: &[Value]) -> String {
    questions
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let entry = entry.as_object()?;
            let question = entry.get("question").map(plain).unwrap_or_default();
            Some(format!("Q{}: {}", index + 1, question))
        })
        .collect::<Vec<String>>()
        .join("\n\n")
}
