use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use anyhow::{Result, Context};

use crate::types::{LeaderboardEntry, NormalizedQuestion, RawQuestion};

fn leaderboard_path(root: &str) -> PathBuf {
    PathBuf::from(root).join("tracking/leaderboard.jsonl")
}

/// Load a JSON array of raw question records
pub fn load_raw_questions(path: &Path) -> Result<Vec<RawQuestion>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read questions from {:?}", path))?;

    let questions: Vec<RawQuestion> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse questions JSON in {:?}", path))?;

    Ok(questions)
}

pub fn save_normalized(path: &Path, questions: &[NormalizedQuestion]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let json = serde_json::to_string_pretty(questions)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write questions to {:?}", path))?;
    Ok(())
}

/// Append one run to the leaderboard JSONL file
pub fn append_leaderboard_entry(root: &str, entry: &LeaderboardEntry) -> Result<()> {
    let path = leaderboard_path(root);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .context("Failed to create tracking directory")?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .context("Failed to open leaderboard file")?;

    let json_line = serde_json::to_string(entry)
        .context("Failed to serialize leaderboard entry")?;
    writeln!(file, "{}", json_line)
        .context("Failed to write leaderboard entry")?;

    Ok(())
}

/// Load all leaderboard entries; a missing file is an empty leaderboard
pub fn load_leaderboard(root: &str) -> Result<Vec<LeaderboardEntry>> {
    let path = leaderboard_path(root);

    if !path.exists() {
        return Ok(vec![]);
    }

    let file = File::open(&path)
        .context("Failed to open leaderboard file")?;

    let reader = BufReader::new(file);
    let mut entries = Vec::new();

    for line in reader.lines() {
        let line = line.context("Failed to read line")?;
        if line.trim().is_empty() {
            continue;
        }

        let entry: LeaderboardEntry = serde_json::from_str(&line)
            .context("Failed to parse leaderboard entry JSON")?;
        entries.push(entry);
    }

    Ok(entries)
}
