use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use exam_prep::config::load_config;
use exam_prep::pipeline::Normalizer;
use exam_prep::{evaluator, storage, summary, NormalizedQuestion};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Project root holding Config/ and tracking/
    #[arg(long, env = "ROOT", default_value = ".")]
    root: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a raw question dump
    Normalize {
        /// JSON array of raw questions
        input: PathBuf,

        /// Where to write the normalized JSON (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Grade answers against a raw question dump
    Grade {
        input: PathBuf,

        /// `<question id or index>=<letters>`, e.g. `3=BD`
        #[arg(short, long = "pick", required = true)]
        picks: Vec<String>,

        /// Append the run to the leaderboard
        #[arg(long)]
        record: bool,

        /// Only quiz these question ids, e.g. the `Retry:` line of a previous run
        #[arg(long, value_delimiter = ',')]
        retry: Vec<String>,
    },
    /// Show stored runs, newest first
    Leaderboard,
}

fn main() -> Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "exam_prep=info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args.root)?;
    let normalizer = Normalizer::new(config);

    match args.command {
        Command::Normalize { input, output } => {
            let raw = storage::load_raw_questions(&input)?;
            let report = normalizer.normalize_with_report(&raw);
            for w in &report.warnings {
                tracing::warn!("Question {}: {}", w.question_id, w.warning);
            }
            let summary_line = format!(
                "Normalized {} questions ({} warnings)",
                report.questions.len(),
                report.warnings.len()
            );

            match output {
                Some(path) => {
                    storage::save_normalized(&path, &report.questions)?;
                    println!("{} -> {:?}", summary_line, path);
                }
                None => {
                    // stdout carries the JSON
                    println!("{}", serde_json::to_string_pretty(&report.questions)?);
                    eprintln!("{}", summary_line);
                }
            }
        }
        Command::Grade { input, picks, record, retry } => {
            let raw = storage::load_raw_questions(&input)?;
            let normalized = normalizer.normalize(&raw);
            let questions: Vec<NormalizedQuestion> = if retry.is_empty() {
                normalized
            } else {
                let selected: Vec<NormalizedQuestion> = summary::retry_questions(&normalized, &retry)
                    .into_iter()
                    .cloned()
                    .collect();
                if let Some(missing) = retry.iter().find(|id| !selected.iter().any(|q| q.id() == id.as_str())) {
                    bail!("Retry id '{}' is not in {:?}", missing, input);
                }
                tracing::info!("Retrying {} questions", selected.len());
                selected
            };
            let start_time = Utc::now().timestamp_millis();

            let mut answers = Vec::new();
            for pick in &picks {
                let (selector, letters) = pick
                    .split_once('=')
                    .with_context(|| format!("Invalid pick '{}', expected <question>=<letters>", pick))?;

                let question = find_question(&questions, selector)?;
                let selection: Vec<char> = letters.chars().filter(|c| c.is_ascii_alphabetic()).collect();
                let answer = evaluator::grade(question, &selection);

                println!(
                    "[{}] #{} {}: {}",
                    question.question_type(),
                    question.index(),
                    if answer.is_correct { "correct" } else { "incorrect" },
                    question.correct_answers().iter().collect::<String>()
                );
                if !question.explanation().is_empty() {
                    println!("{}\n", question.explanation());
                }
                answers.push(answer);
            }

            let finished_at = Utc::now();
            let stats = summary::quiz_stats(
                &questions,
                &answers,
                start_time,
                Some(finished_at.timestamp_millis()),
            );
            println!(
                "Answered {}/{} - {} correct, {} incorrect ({}%)",
                stats.total_answered,
                stats.total_questions,
                stats.correct_count,
                stats.incorrect_count,
                stats.accuracy
            );

            let retry = summary::incorrect_question_ids(&answers);
            if !retry.is_empty() {
                println!("Retry: {}", retry.join(", "));
            }

            if record {
                let entry = summary::leaderboard_entry(&answers, finished_at);
                storage::append_leaderboard_entry(&args.root, &entry)?;
                tracing::info!("Recorded run {}", entry.run_id);
            }
        }
        Command::Leaderboard => {
            let mut entries = storage::load_leaderboard(&args.root)?;
            if entries.is_empty() {
                println!("No runs recorded yet.");
                return Ok(());
            }

            entries.sort_by(|a, b| b.date.cmp(&a.date));
            for entry in &entries {
                println!(
                    "{}  {}/{} correct  {}%",
                    entry.date, entry.correct, entry.total_answered, entry.accuracy
                );
            }
        }
    }

    Ok(())
}

/// Match by id first, then by displayed index
fn find_question<'a>(
    questions: &'a [NormalizedQuestion],
    selector: &str,
) -> Result<&'a NormalizedQuestion> {
    if let Some(q) = questions.iter().find(|q| q.id() == selector) {
        return Ok(q);
    }
    match questions.iter().find(|q| q.index() == selector) {
        Some(q) => Ok(q),
        None => bail!("No question with id or index '{}'", selector),
    }
}
