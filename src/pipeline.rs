//! Normalization Pipeline
//!
//! Turns a batch of raw question records into `NormalizedQuestion`s:
//! - sanitize body, parse and resolve option keys
//! - parse the answer key and derive SINGLE/MULTI
//! - synthesize the explanation once, up front
//! - fill topic/index defaults and assign batch-unique ids
//!
//! Missing optional fields never fail; they degrade to defaults.

use crate::answer_key::parse_correct_answers;
use crate::config::NormalizerConfig;
use crate::explanation::{ExplanationPolicy, ExplanationSources};
use crate::options::{parse_options, resolve_keys, ValidationWarning};
use crate::sanitize::sanitize;
use crate::types::{NormalizedQuestion, RawQuestion};
use sha2::{Digest, Sha256};

/// Warning attached to the question that raised it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionWarning {
    pub question_id: String,
    pub warning: ValidationWarning,
}

/// Pipeline output with the warnings collected along the way
#[derive(Debug, Clone, Default)]
pub struct NormalizationReport {
    pub questions: Vec<NormalizedQuestion>,
    pub warnings: Vec<QuestionWarning>,
}

pub struct Normalizer {
    config: NormalizerConfig,
    policy: ExplanationPolicy,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        let policy = ExplanationPolicy::with_max_comments(config.max_comments);
        Self { config, policy }
    }

    /// Normalize a batch, keeping input order, and report key warnings
    pub fn normalize_with_report(&self, raw: &[RawQuestion]) -> NormalizationReport {
        let mut report = NormalizationReport {
            questions: Vec::with_capacity(raw.len()),
            warnings: Vec::new(),
        };

        for (idx, record) in raw.iter().enumerate() {
            let (question, warnings) = self.normalize_one(idx, record);
            report
                .warnings
                .extend(warnings.into_iter().map(|warning| QuestionWarning {
                    question_id: question.id().to_string(),
                    warning,
                }));
            report.questions.push(question);
        }

        tracing::debug!(
            "Normalized {} questions ({} warnings)",
            report.questions.len(),
            report.warnings.len()
        );
        report
    }

    /// Normalize a batch; key warnings are logged rather than returned
    pub fn normalize(&self, raw: &[RawQuestion]) -> Vec<NormalizedQuestion> {
        let report = self.normalize_with_report(raw);
        for w in &report.warnings {
            tracing::warn!("Question {}: {}", w.question_id, w.warning);
        }
        report.questions
    }

    fn normalize_one(
        &self,
        idx: usize,
        raw: &RawQuestion,
    ) -> (NormalizedQuestion, Vec<ValidationWarning>) {
        let raw_options = raw.options.as_deref().unwrap_or_default();
        let (options, warnings) = resolve_keys(parse_options(raw_options));

        let correct_answers = parse_correct_answers(&raw.answer);

        let explanation = self.policy.build(&ExplanationSources {
            description: raw.answer_description.as_deref(),
            comments: raw.comments.as_deref().unwrap_or_default(),
            votes: raw.votes.as_deref().unwrap_or_default(),
        });

        let topic = raw
            .topic
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(self.config.default_topic.as_str())
            .to_string();

        let index = raw
            .index
            .as_ref()
            .and_then(|i| i.label())
            .unwrap_or_else(|| (idx + 1).to_string());

        let question = NormalizedQuestion::new(
            self.question_id(idx, raw),
            topic,
            index,
            sanitize(&raw.body),
            correct_answers,
            options,
            explanation,
        );

        (question, warnings)
    }

    /// `<prefix>-<content hash>-<ordinal>`; the ordinal keeps ids unique
    /// within one batch even for identical records
    fn question_id(&self, idx: usize, raw: &RawQuestion) -> String {
        let mut content = raw.body.clone();
        for option in raw.options.iter().flatten() {
            content.push('\u{1f}');
            content.push_str(option);
        }
        let hash = calculate_content_hash(content.as_bytes());
        format!("{}-{}-{}", self.config.id_prefix, &hash[..8], idx + 1)
    }
}

/// Hex SHA-256 of the given bytes
fn calculate_content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

/// Normalize with default configuration
pub fn normalize(raw: &[RawQuestion]) -> Vec<NormalizedQuestion> {
    Normalizer::default().normalize(raw)
}
