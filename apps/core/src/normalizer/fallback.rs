//! Fixed fallback strings substituted when extraction finds no user content.

use super::label::ClassificationLabel;

/// Upstream said `error` but gave no message
pub const UPSTREAM_ERROR: &str = "An error occurred";
/// `data` missing from a response
pub const MISSING_DATA: &str = "Unable to generate response";
/// The pipeline returned no handler response at all
pub const MISSING_RESPONSE_DATA: &str = "No response generated";
/// Unrecognized label and nothing usable in `data.response`
pub const GENERIC: &str = "Response generated";

/// Per-label fallback table
pub const LABEL_FALLBACKS: [(ClassificationLabel, &str); 6] = [
    (ClassificationLabel::GuidanceBased, "No guidance available"),
    (ClassificationLabel::AppRelated, "No content available"),
    (ClassificationLabel::ExamRelatedInfo, "Exam information not available"),
    (ClassificationLabel::SubjectRelated, "No answer available"),
    (ClassificationLabel::ConversationBased, "Hello! How can I help you?"),
    (ClassificationLabel::Complaint, "Thank you for your feedback"),
];

/// Fallback message for a label
pub fn for_label(label: ClassificationLabel) -> &'static str {
    LABEL_FALLBACKS
        .iter()
        .find(|(candidate, _)| *candidate == label)
        .map(|(_, message)| *message)
        .unwrap_or(GENERIC)
}
