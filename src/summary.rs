//! Run Summary
//!
//! Aggregates graded answers from a finished quiz run:
//! - `quiz_stats` for the summary screen
//! - `leaderboard_entry` for persistence
//! - `incorrect_question_ids` to start a retry run

use crate::types::{LeaderboardEntry, NormalizedQuestion, QuizStats, UserAnswer};
use chrono::{DateTime, Utc};

/// Rounded percentage, 0 when nothing was answered
pub fn accuracy(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct as f64 / total as f64) * 100.0).round() as u32
}

pub fn quiz_stats(
    questions: &[NormalizedQuestion],
    answers: &[UserAnswer],
    start_time: i64,
    end_time: Option<i64>,
) -> QuizStats {
    let correct_count = answers.iter().filter(|a| a.is_correct).count();
    let total_answered = answers.len();

    QuizStats {
        total_questions: questions.len(),
        total_answered,
        correct_count,
        incorrect_count: total_answered - correct_count,
        accuracy: accuracy(correct_count, total_answered),
        start_time,
        end_time,
    }
}

/// Leaderboard record for a completed run; the run id is the epoch millis
pub fn leaderboard_entry(answers: &[UserAnswer], finished_at: DateTime<Utc>) -> LeaderboardEntry {
    let correct = answers.iter().filter(|a| a.is_correct).count();

    LeaderboardEntry {
        run_id: finished_at.timestamp_millis().to_string(),
        date: finished_at.to_rfc3339(),
        total_answered: answers.len(),
        correct,
        accuracy: accuracy(correct, answers.len()),
    }
}

/// Ids of incorrectly answered questions, first occurrence order, no repeats
pub fn incorrect_question_ids(answers: &[UserAnswer]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for answer in answers.iter().filter(|a| !a.is_correct) {
        if !ids.contains(&answer.question_id) {
            ids.push(answer.question_id.clone());
        }
    }
    ids
}

/// Questions selected for a retry run, in quiz order
pub fn retry_questions<'a>(
    questions: &'a [NormalizedQuestion],
    retry_ids: &[String],
) -> Vec<&'a NormalizedQuestion> {
    questions
        .iter()
        .filter(|q| retry_ids.iter().any(|id| id == q.id()))
        .collect()
}
