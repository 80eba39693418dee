//! Explanation synthesis
//!
//! An explanation is assembled from an ordered list of rules. Each rule may
//! contribute one text segment. Exclusive rules compete: once one of them
//! has produced a segment, later exclusive rules are skipped. Additive rules
//! always run.
//!
//! Default policy:
//! 1. `DescriptionRule` (exclusive) - official answer description
//! 2. `CommentsRule` (exclusive) - top community comments by votes
//! 3. `MostVotedRule` (additive) - the community's most voted answer

use crate::sanitize::sanitize;
use crate::types::{Comment, Vote};

pub const DEFAULT_MAX_COMMENTS: usize = 3;

/// Inputs every rule sees
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplanationSources<'a> {
    pub description: Option<&'a str>,
    pub comments: &'a [Comment],
    pub votes: &'a [Vote],
}

pub trait ExplanationRule {
    fn name(&self) -> &'static str;

    /// Exclusive rules are skipped once an earlier exclusive rule produced text
    fn exclusive(&self) -> bool;

    fn segment(&self, sources: &ExplanationSources<'_>) -> Option<String>;
}

pub struct DescriptionRule;

impl ExplanationRule for DescriptionRule {
    fn name(&self) -> &'static str {
        "description"
    }

    fn exclusive(&self) -> bool {
        true
    }

    fn segment(&self, sources: &ExplanationSources<'_>) -> Option<String> {
        let text = sanitize(sources.description?);
        if text.is_empty() {
            return None;
        }
        Some(format!("**Official Explanation:**\n{}", text))
    }
}

pub struct CommentsRule {
    pub max_comments: usize,
}

impl Default for CommentsRule {
    fn default() -> Self {
        Self {
            max_comments: DEFAULT_MAX_COMMENTS,
        }
    }
}

impl ExplanationRule for CommentsRule {
    fn name(&self) -> &'static str {
        "comments"
    }

    fn exclusive(&self) -> bool {
        true
    }

    fn segment(&self, sources: &ExplanationSources<'_>) -> Option<String> {
        if sources.comments.is_empty() || self.max_comments == 0 {
            return None;
        }

        // Stable sort: equal vote counts keep their input order
        let mut ranked: Vec<&Comment> = sources.comments.iter().collect();
        ranked.sort_by(|a, b| b.vote_count.cmp(&a.vote_count));

        let mut block = String::from("**Community Insights:**");
        for comment in ranked.into_iter().take(self.max_comments) {
            block.push_str(&format!(
                "\n• \"{}\" ({} votes)",
                sanitize(&comment.content),
                comment.vote_count
            ));
        }
        Some(block)
    }
}

pub struct MostVotedRule;

impl ExplanationRule for MostVotedRule {
    fn name(&self) -> &'static str {
        "most_voted"
    }

    fn exclusive(&self) -> bool {
        false
    }

    fn segment(&self, sources: &ExplanationSources<'_>) -> Option<String> {
        // First flagged vote wins; later ones are ignored
        let vote = sources.votes.iter().find(|v| v.is_most_voted)?;
        Some(format!(
            "**Most Voted Answer:** {} ({} votes)",
            vote.answer, vote.count
        ))
    }
}

/// Ordered rule policy
pub struct ExplanationPolicy {
    rules: Vec<Box<dyn ExplanationRule + Send + Sync>>,
}

impl Default for ExplanationPolicy {
    fn default() -> Self {
        Self::with_max_comments(DEFAULT_MAX_COMMENTS)
    }
}

impl ExplanationPolicy {
    pub fn with_max_comments(max_comments: usize) -> Self {
        Self {
            rules: vec![
                Box::new(DescriptionRule),
                Box::new(CommentsRule { max_comments }),
                Box::new(MostVotedRule),
            ],
        }
    }

    pub fn build(&self, sources: &ExplanationSources<'_>) -> String {
        let mut segments: Vec<String> = Vec::new();
        let mut exclusive_taken = false;

        for rule in &self.rules {
            if rule.exclusive() && exclusive_taken {
                tracing::trace!("Skipping {} rule, an earlier exclusive rule applied", rule.name());
                continue;
            }
            if let Some(segment) = rule.segment(sources) {
                if rule.exclusive() {
                    exclusive_taken = true;
                }
                segments.push(segment);
            }
        }

        segments.join("\n\n").trim().to_string()
    }
}

/// Build an explanation with the default policy
pub fn build_explanation(
    description: Option<&str>,
    comments: Option<&[Comment]>,
    votes: Option<&[Vote]>,
) -> String {
    let sources = ExplanationSources {
        description,
        comments: comments.unwrap_or_default(),
        votes: votes.unwrap_or_default(),
    };
    ExplanationPolicy::default().build(&sources)
}
