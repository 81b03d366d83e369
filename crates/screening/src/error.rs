use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScreeningError {
    /// Every question must be answered before a score exists.
    #[error("incomplete answers: missing {}", .missing.join(", "))]
    IncompleteAnswers { missing: Vec<String> },

    /// `value` is the submitted JSON, rendered as text.
    #[error("invalid answer {value} for question '{question}'")]
    InvalidAnswerValue { question: String, value: String },

    #[error("unknown screening test '{0}'")]
    UnknownTest(String),
}
