//! `mitr-screening`: PHQ-9 / GAD-7 scoring and severity banding.
//!
//! Pure functions over fixed questionnaire definitions. No IO, no state.

pub mod error;
pub mod questionnaire;
pub mod score;
pub mod severity;

pub use error::ScreeningError;
pub use questionnaire::{AnswerOption, Question, Questionnaire, TestKind, GAD7, PHQ9};
pub use score::{score, AnswerSet, ScoreResult};
pub use severity::{classify, Band, Classification, PartitionError, Severity, ThresholdTable};
