//! Exam Prep Library
//!
//! Normalizes raw exam question dumps (HTML bodies, vote tallies, community
//! comments) into typed questions ready for quizzing and grading

pub mod types;
pub mod sanitize;
pub mod options;
pub mod answer_key;
pub mod explanation;
pub mod config;
pub mod pipeline;
pub mod evaluator;
pub mod summary;
pub mod storage;

pub use types::*;
pub use pipeline::{normalize, NormalizationReport, Normalizer, QuestionWarning};
pub use evaluator::{is_correct, grade};
