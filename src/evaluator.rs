use crate::types::{NormalizedQuestion, UserAnswer};
use chrono::Utc;
use std::collections::BTreeSet;

/// Exact set match: same size, same members, order irrelevant
pub fn is_correct(selection: &BTreeSet<char>, correct_answers: &BTreeSet<char>) -> bool {
    selection == correct_answers
}

/// Canonicalize an unordered selection (case-insensitive, duplicates collapse)
fn selection_set(selection: &[char]) -> BTreeSet<char> {
    selection.iter().map(|c| c.to_ascii_uppercase()).collect()
}

/// Grade one submission against a question, stamped with the current time
pub fn grade(question: &NormalizedQuestion, selection: &[char]) -> UserAnswer {
    let selected_options = selection_set(selection);
    let is_correct = is_correct(&selected_options, question.correct_answers());

    UserAnswer {
        question_id: question.id().to_string(),
        selected_options,
        is_correct,
        timestamp: Utc::now().timestamp_millis(),
    }
}
