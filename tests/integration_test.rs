//! Integration tests for the exam prep pipeline
//! Loads a fixture dump, normalizes it and grades a run end to end

use exam_prep::options::ValidationWarning;
use exam_prep::pipeline::Normalizer;
use exam_prep::{evaluator, storage, summary};
use exam_prep::types::{NormalizedQuestion, QuestionType};
use std::collections::HashSet;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/raw_questions.json")
}

fn load_fixture() -> Vec<NormalizedQuestion> {
    let raw = storage::load_raw_questions(&fixture_path()).expect("Failed to load fixture");
    exam_prep::normalize(&raw)
}

#[test]
fn test_fixture_normalizes_in_order() {
    let questions = load_fixture();

    assert_eq!(questions.len(), 4);
    assert_eq!(questions[0].index(), "1");
    assert_eq!(questions[1].index(), "2");
    assert_eq!(questions[2].index(), "3");
    assert_eq!(questions[3].index(), "4");

    let ids: HashSet<&str> = questions.iter().map(|q| q.id()).collect();
    assert_eq!(ids.len(), 4, "ids must be unique within a batch");
}

#[test]
fn test_description_question() {
    let questions = load_fixture();
    let q = &questions[0];

    assert_eq!(q.topic(), "Storage");
    assert_eq!(q.body(), "Which service stores objects?\nPick one.");
    assert_eq!(q.question_type(), QuestionType::Single);
    assert_eq!(q.options()[1].key, 'B');
    assert_eq!(q.options()[1].text, "S3");
    assert_eq!(
        q.explanation(),
        "**Official Explanation:**\nS3 is object storage & scales.\n\n**Most Voted Answer:** B (41 votes)"
    );
    assert!(!q.explanation().contains("Never shown"));
}

#[test]
fn test_comment_question() {
    let questions = load_fixture();
    let q = &questions[1];

    assert_eq!(q.topic(), "General");
    assert_eq!(q.question_type(), QuestionType::Multi);
    assert_eq!(q.correct_answers().iter().collect::<String>(), "BD");

    let keys: String = q.options().iter().map(|o| o.key).collect();
    assert_eq!(keys, "ABCD");
    assert_eq!(q.options()[3].text, "EBS snapshots");

    assert_eq!(
        q.explanation(),
        "**Community Insights:**\n\
         • \"B and D\" (8 votes)\n\
         • \"Glacier for archives\" (2 votes)\n\
         • \"Snapshots go to S3\" (2 votes)\n\n\
         **Most Voted Answer:** BD (12 votes)"
    );
}

#[test]
fn test_collision_question_reports_warning() {
    let raw = storage::load_raw_questions(&fixture_path()).expect("Failed to load fixture");
    let report = Normalizer::default().normalize_with_report(&raw);

    let q = &report.questions[2];
    assert_eq!(q.topic(), "General");
    assert!(q.correct_answers().is_empty());
    assert_eq!(q.question_type(), QuestionType::Single);
    assert_eq!(q.explanation(), "");

    let keys: String = q.options().iter().map(|o| o.key).collect();
    assert_eq!(keys, "CBA");

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].question_id, q.id());
    assert!(matches!(
        report.warnings[0].warning,
        ValidationWarning::PositionalCollision { position: 2, positional: 'C', assigned: 'A' }
    ));
}

#[test]
fn test_null_fields_do_not_break_the_batch() {
    let questions = load_fixture();
    let q = &questions[3];

    assert_eq!(q.topic(), "General");
    assert_eq!(q.body(), "Blank key and comments");
    assert!(q.correct_answers().is_empty());
    assert_eq!(q.question_type(), QuestionType::Single);

    let keys: String = q.options().iter().map(|o| o.key).collect();
    assert_eq!(keys, "AB");
    assert_eq!(q.options()[1].text, "");

    assert_eq!(
        q.explanation(),
        "**Community Insights:**\n• \"Still useful\" (0 votes)"
    );
}

#[test]
fn test_normalized_json_shape() {
    let questions = load_fixture();
    let json = serde_json::to_value(&questions[1]).unwrap();

    assert_eq!(json["type"], "MULTI");
    assert_eq!(json["correctAnswers"], serde_json::json!(["B", "D"]));
    assert_eq!(json["options"][0]["key"], "A");
    assert!(json["explanation"].as_str().unwrap().starts_with("**Community Insights:**"));
}

#[test]
fn test_graded_run_lands_on_leaderboard() {
    let questions = load_fixture();
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();

    let answers = vec![
        evaluator::grade(&questions[0], &['B']),
        evaluator::grade(&questions[1], &['d', 'b']),
        evaluator::grade(&questions[2], &['A']),
    ];
    assert!(answers[0].is_correct);
    assert!(answers[1].is_correct);
    assert!(!answers[2].is_correct);

    let stats = summary::quiz_stats(&questions, &answers, 0, None);
    assert_eq!(stats.correct_count, 2);
    assert_eq!(stats.accuracy, 67);

    let retry = summary::incorrect_question_ids(&answers);
    assert_eq!(retry, vec![questions[2].id().to_string()]);

    let entry = summary::leaderboard_entry(&answers, chrono::Utc::now());
    storage::append_leaderboard_entry(root, &entry).unwrap();
    assert_eq!(storage::load_leaderboard(root).unwrap(), vec![entry]);
}

#[test]
fn test_retry_run_covers_only_missed_questions() {
    let questions = load_fixture();
    let first_run = vec![
        evaluator::grade(&questions[0], &['A']),
        evaluator::grade(&questions[1], &['B', 'D']),
        evaluator::grade(&questions[3], &['A']),
    ];

    let retry_ids = summary::incorrect_question_ids(&first_run);
    let retry = summary::retry_questions(&questions, &retry_ids);
    let retry_ids_seen: Vec<&str> = retry.iter().map(|q| q.id()).collect();
    assert_eq!(retry_ids_seen, vec![questions[0].id(), questions[3].id()]);

    let second_run: Vec<_> = retry
        .iter()
        .map(|q| evaluator::grade(q, &q.correct_answers().iter().copied().collect::<Vec<_>>()))
        .collect();
    assert!(second_run.iter().all(|a| a.is_correct));
    assert!(summary::incorrect_question_ids(&second_run).is_empty());
}

#[test]
fn test_save_and_reload_normalized() {
    let questions = load_fixture();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("questions.json");

    storage::save_normalized(&path, &questions).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    let reloaded: Vec<NormalizedQuestion> = serde_json::from_str(&content).unwrap();
    assert_eq!(reloaded, questions);
}
