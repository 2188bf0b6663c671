//! Normalizer Tests
//!
//! Label-driven extraction from handler responses to `{status, message}`.

use serde_json::{json, Value};

use crate::models::ClassificationResponse;
use crate::normalizer::{
    normalize, normalize_classification, normalize_tagged, ClassificationLabel, NormalizedResponse,
    RawHandlerResponse, ResponseStatus,
};

fn raw(value: Value) -> RawHandlerResponse {
    serde_json::from_value(value).expect("handler response should deserialize")
}

fn success(data: Value) -> RawHandlerResponse {
    raw(json!({ "status": "success", "data": data }))
}

// ============================================================================
// Per-label extraction
// ============================================================================

#[test]
fn test_each_label_reads_its_documented_path() {
    let cases = [
        (
            ClassificationLabel::GuidanceBased,
            json!({ "response": { "text": "Focus on NCERT first 📚", "tips": ["revise"] } }),
            "Focus on NCERT first 📚",
        ),
        (
            ClassificationLabel::AppRelated,
            json!({ "classifiedAs": "app_related", "response": "Open *Lectures* from the menu" }),
            "Open *Lectures* from the menu",
        ),
        (
            ClassificationLabel::SubjectRelated,
            json!({ "response": { "text": "Newton's second law: F = ma", "source": "faq" } }),
            "Newton's second law: F = ma",
        ),
        (
            ClassificationLabel::ConversationBased,
            json!({ "response": "Namaste! 🙏 Kaise madad karun?" }),
            "Namaste! 🙏 Kaise madad karun?",
        ),
        (
            ClassificationLabel::Complaint,
            json!({ "text": "Sorry about the video issue, we are on it." }),
            "Sorry about the video issue, we are on it.",
        ),
        (
            ClassificationLabel::ExamRelatedInfo,
            json!({ "formatted_response": "*JEE Main 2025*\nSession 1: January" }),
            "*JEE Main 2025*\nSession 1: January",
        ),
    ];

    for (label, data, expected) in cases {
        let out = normalize(&success(data), label);
        assert_eq!(out.status, ResponseStatus::Success, "label {}", label);
        assert_eq!(out.message, expected, "label {}", label);
    }
}

#[test]
fn test_extraction_miss_uses_label_fallback() {
    let cases = [
        (ClassificationLabel::GuidanceBased, "No guidance available"),
        (ClassificationLabel::AppRelated, "No content available"),
        (ClassificationLabel::ExamRelatedInfo, "Exam information not available"),
        (ClassificationLabel::SubjectRelated, "No answer available"),
        (ClassificationLabel::ConversationBased, "Hello! How can I help you?"),
        (ClassificationLabel::Complaint, "Thank you for your feedback"),
    ];

    for (label, fallback) in cases {
        let out = normalize(&success(json!({ "unrelated": true })), label);
        assert_eq!(out, NormalizedResponse::success(fallback), "label {}", label);
    }
}

#[test]
fn test_empty_string_counts_as_missing() {
    let out = normalize(
        &success(json!({ "response": "" })),
        ClassificationLabel::ConversationBased,
    );
    assert_eq!(out.message, "Hello! How can I help you?");

    let out = normalize(
        &success(json!({ "response": { "text": "" } })),
        ClassificationLabel::SubjectRelated,
    );
    assert_eq!(out.message, "No answer available");
}

// ============================================================================
// Error path
// ============================================================================

#[test]
fn test_upstream_error_passes_message_for_every_label() {
    let r = raw(json!({
        "status": "error",
        "message": "Handler failed: Connection timeout",
        "data": { "response": "should be ignored", "text": "ignored too" }
    }));

    for label in ClassificationLabel::ALL {
        let out = normalize(&r, label);
        assert_eq!(out.status, ResponseStatus::Error);
        assert_eq!(out.message, "Handler failed: Connection timeout");
    }
}

#[test]
fn test_upstream_error_without_message() {
    for value in [
        json!({ "status": "error" }),
        json!({ "status": "error", "message": "" }),
        json!({ "status": "error", "message": null }),
    ] {
        let out = normalize(&raw(value), ClassificationLabel::Complaint);
        assert_eq!(out, NormalizedResponse::error("An error occurred"));
    }
}

#[test]
fn test_upstream_error_with_malformed_data_keeps_message() {
    for data in [json!("n/a"), json!([]), json!(42)] {
        let response: ClassificationResponse = serde_json::from_value(json!({
            "classification": "exam_related_info",
            "response_data": {
                "status": "error",
                "message": "Handler failed: boom",
                "data": data
            }
        }))
        .expect("malformed data should not reject the envelope");

        assert_eq!(
            normalize_classification(&response),
            NormalizedResponse::error("Handler failed: boom")
        );
    }
}

#[test]
fn test_upstream_error_with_structured_message() {
    let r = raw(json!({ "status": "error", "message": { "detail": "x" } }));
    assert_eq!(
        normalize(&r, ClassificationLabel::GuidanceBased),
        NormalizedResponse::error(r#"{"detail":"x"}"#)
    );
}

#[test]
fn test_success_with_non_object_data_uses_label_fallback() {
    for data in [json!("n/a"), json!([]), json!(42)] {
        let r = success(data);
        assert_eq!(
            normalize(&r, ClassificationLabel::SubjectRelated),
            NormalizedResponse::success("No answer available")
        );
        assert_eq!(
            normalize_tagged(&r, "new_label"),
            NormalizedResponse::success("Response generated")
        );
    }
}

#[test]
fn test_missing_data_is_an_error_despite_success_flag() {
    let r = raw(json!({ "status": "success", "message": "all good" }));
    for label in ClassificationLabel::ALL {
        assert_eq!(
            normalize(&r, label),
            NormalizedResponse::error("Unable to generate response")
        );
    }
    assert_eq!(
        normalize_tagged(&r, "something_new"),
        NormalizedResponse::error("Unable to generate response")
    );
}

// ============================================================================
// Exam ordering
// ============================================================================

#[test]
fn test_exam_formatted_response_wins_over_text() {
    let r = success(json!({
        "formatted_response": "Formatted by the assistant",
        "response": { "text": "Raw handler text", "alternatives": ["unused"] }
    }));
    assert_eq!(
        normalize(&r, ClassificationLabel::ExamRelatedInfo).message,
        "Formatted by the assistant"
    );
}

#[test]
fn test_exam_falsy_formatted_response_is_skipped() {
    for formatted in [json!(false), json!(0), json!(""), json!(null)] {
        let r = success(json!({
            "formatted_response": formatted,
            "response": { "text": "Exam is in May" }
        }));
        assert_eq!(
            normalize(&r, ClassificationLabel::ExamRelatedInfo).message,
            "Exam is in May"
        );
    }
}

#[test]
fn test_exam_text_wins_over_alternatives() {
    let r = success(json!({
        "response": { "text": "Exam is in May", "alternatives": ["unused"] }
    }));
    assert_eq!(
        normalize(&r, ClassificationLabel::ExamRelatedInfo).message,
        "Exam is in May"
    );
}

#[test]
fn test_exam_alternatives_exact_rendering() {
    let r = success(json!({
        "response": { "alternatives": ["Try practice papers", "Check online resources"] }
    }));
    let out = normalize(&r, ClassificationLabel::ExamRelatedInfo);
    assert_eq!(out.status, ResponseStatus::Success);
    assert_eq!(
        out.message,
        "Here are some suggestions:\n\n• Try practice papers\n• Check online resources"
    );
}

#[test]
fn test_exam_questions_rendering() {
    let r = success(json!({
        "response": {
            "questions": [
                { "question": "What is the unit of force?", "solution": "Newton" },
                { "question": "Define work." }
            ]
        }
    }));
    assert_eq!(
        normalize(&r, ClassificationLabel::ExamRelatedInfo).message,
        "Q1: What is the unit of force?\n\nQ2: Define work."
    );
}

#[test]
fn test_exam_unknown_structure_is_stringified() {
    let r = success(json!({ "response": { "exam": "NEET", "date": "May 4" } }));
    let message = normalize(&r, ClassificationLabel::ExamRelatedInfo).message;
    let reparsed: Value = serde_json::from_str(&message).unwrap();
    assert_eq!(reparsed, json!({ "exam": "NEET", "date": "May 4" }));
}

// ============================================================================
// Unrecognized labels and full envelopes
// ============================================================================

#[test]
fn test_unrecognized_tag_uses_response_or_generic() {
    let out = normalize_tagged(&success(json!({ "response": "Something" })), "new_label");
    assert_eq!(out, NormalizedResponse::success("Something"));

    let out = normalize_tagged(&success(json!({ "text": "not looked at" })), "new_label");
    assert_eq!(out, NormalizedResponse::success("Response generated"));
}

#[test]
fn test_normalize_classification_envelope() {
    let response: ClassificationResponse = serde_json::from_value(json!({
        "classification": "conversation_based",
        "original_message": "hi",
        "confidence_score": 0.95,
        "response_data": { "status": "success", "data": { "response": "Hi there!" } },
        "processing_time_ms": 40.0
    }))
    .unwrap();
    assert_eq!(
        normalize_classification(&response),
        NormalizedResponse::success("Hi there!")
    );

    let empty = ClassificationResponse {
        response_data: None,
        ..response
    };
    assert_eq!(
        normalize_classification(&empty),
        NormalizedResponse::error("No response generated")
    );
}

#[test]
fn test_normalize_is_idempotent() {
    let r = success(json!({ "response": { "questions": [{ "question": "A?" }, "junk", { "question": "C?" }] } }));
    let first = normalize(&r, ClassificationLabel::ExamRelatedInfo);
    let second = normalize(&r, ClassificationLabel::ExamRelatedInfo);
    assert_eq!(first, second);
    assert_eq!(first.message, "Q1: A?\n\nQ3: C?");
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_scenario_app_related_hello() {
    let r = raw(json!({"status":"success","data":{"classifiedAs":"app_related","response":"Hello!"}}));
    let out = normalize(&r, ClassificationLabel::AppRelated);
    assert_eq!(
        serde_json::to_value(&out).unwrap(),
        json!({"status":"success","message":"Hello!"})
    );
}

#[test]
fn test_scenario_handler_failure() {
    let r = raw(json!({"status":"error","message":"Handler failed: Connection timeout"}));
    for label in ClassificationLabel::ALL {
        assert_eq!(
            serde_json::to_value(normalize(&r, label)).unwrap(),
            json!({"status":"error","message":"Handler failed: Connection timeout"})
        );
    }
}
