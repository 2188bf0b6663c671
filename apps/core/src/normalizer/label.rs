//! Classification labels.
//!
//! The closed set of tags the upstream pipeline uses to say which content
//! handler produced a response. Used here only as a dispatch key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Handler category chosen by the upstream classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationLabel {
    /// Study advice, planning help, motivation
    GuidanceBased,
    /// App features, navigation, lectures, notes
    AppRelated,
    /// Exam patterns, PYQs, important questions
    ExamRelatedInfo,
    /// Academic subject questions
    SubjectRelated,
    /// Greetings, thanks, small talk
    ConversationBased,
    /// Dissatisfaction or reported problems
    Complaint,
}

impl ClassificationLabel {
    pub const ALL: [ClassificationLabel; 6] = [
        ClassificationLabel::GuidanceBased,
        ClassificationLabel::AppRelated,
        ClassificationLabel::ExamRelatedInfo,
        ClassificationLabel::SubjectRelated,
        ClassificationLabel::ConversationBased,
        ClassificationLabel::Complaint,
    ];

    /// Wire name of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationLabel::GuidanceBased => "guidance_based",
            ClassificationLabel::AppRelated => "app_related",
            ClassificationLabel::ExamRelatedInfo => "exam_related_info",
            ClassificationLabel::SubjectRelated => "subject_related",
            ClassificationLabel::ConversationBased => "conversation_based",
            ClassificationLabel::Complaint => "complaint",
        }
    }
}

impl fmt::Display for ClassificationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when a tag is outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized classification label: {0}")]
pub struct UnknownLabel(pub String);

impl FromStr for ClassificationLabel {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClassificationLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}
