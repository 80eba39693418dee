//! Option parsing and key resolution
//!
//! Parsing pulls a leading letter ("A. ...", "B) ...", "C ...") off each
//! option. Options without one stay `Unresolved` until `resolve_keys` runs
//! over the whole question.

use crate::sanitize::sanitize;
use crate::types::{OptionKey, ParsedOption, QuestionOption};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use thiserror::Error;

/// Leading letter, then `.`, `)` or whitespace, then the rest (may span lines)
static OPTION_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\s*([A-Z])[.)\s]\s*(.*)").unwrap());

/// Non-fatal finding raised while resolving option keys
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationWarning {
    #[error("option {position} repeats explicit key {key}, re-keyed to {assigned}")]
    DuplicateKey {
        position: usize,
        key: char,
        assigned: char,
    },
    #[error("option {position} would take positional key {positional} already used, assigned {assigned}")]
    PositionalCollision {
        position: usize,
        positional: char,
        assigned: char,
    },
    #[error("option {position} is past Z, assigned {assigned}")]
    BeyondAlphabet { position: usize, assigned: char },
}

/// Parse raw HTML options into keyed options, one per input, order kept
pub fn parse_options(raw_options: &[String]) -> Vec<ParsedOption> {
    raw_options.iter().map(|raw| parse_option(raw)).collect()
}

fn parse_option(raw: &str) -> ParsedOption {
    let clean = sanitize(raw);

    match OPTION_PREFIX.captures(&clean) {
        // Group 1 is exactly one ASCII letter
        Some(caps) => ParsedOption {
            key: OptionKey::Letter(char::from(caps[1].as_bytes()[0])),
            text: caps[2].trim().to_string(),
        },
        None => ParsedOption {
            key: OptionKey::Unresolved,
            text: clean,
        },
    }
}

/// Key for a 0-based position: 'A' + position, counting on past 'Z'
fn positional_key(position: usize) -> Option<char> {
    u32::try_from(position)
        .ok()
        .and_then(|p| p.checked_add(u32::from(b'A')))
        .and_then(char::from_u32)
}

/// Lowest key not in `used`
fn lowest_unused(used: &BTreeSet<char>) -> char {
    (0..=used.len())
        .filter_map(positional_key)
        .find(|c| !used.contains(c))
        .unwrap_or('A')
}

/// Resolve every option to a unique key.
///
/// Pass 1 claims explicitly parsed letters; a repeated explicit letter is
/// demoted and re-keyed in pass 2. Pass 2 walks the rest in position order,
/// taking the positional key when free and the lowest unused key
/// otherwise. Keys continue past 'Z' for very long option lists. Every
/// departure from the plain rule is reported.
pub fn resolve_keys(parsed: Vec<ParsedOption>) -> (Vec<QuestionOption>, Vec<ValidationWarning>) {
    let mut used: BTreeSet<char> = BTreeSet::new();
    let mut keys: Vec<Option<char>> = Vec::with_capacity(parsed.len());
    let mut duplicates: Vec<(usize, char)> = Vec::new();

    // Pass 1: explicit letters
    for (position, option) in parsed.iter().enumerate() {
        match option.key {
            OptionKey::Letter(c) if used.insert(c) => keys.push(Some(c)),
            OptionKey::Letter(c) => {
                duplicates.push((position, c));
                keys.push(None);
            }
            OptionKey::Unresolved => keys.push(None),
        }
    }

    // Pass 2: everything still without a key
    let mut warnings = Vec::new();
    let mut resolved: Vec<char> = Vec::with_capacity(keys.len());
    for (position, slot) in keys.into_iter().enumerate() {
        if let Some(key) = slot {
            resolved.push(key);
            continue;
        }

        let duplicate_of = duplicates
            .iter()
            .find(|(p, _)| *p == position)
            .map(|(_, c)| *c);

        let positional = positional_key(position);
        let assigned = match (duplicate_of, positional) {
            (None, Some(p)) if !used.contains(&p) => p,
            _ => lowest_unused(&used),
        };
        used.insert(assigned);
        resolved.push(assigned);

        if let Some(key) = duplicate_of {
            warnings.push(ValidationWarning::DuplicateKey {
                position,
                key,
                assigned,
            });
        } else if let Some(p) = positional.filter(|p| *p != assigned) {
            warnings.push(ValidationWarning::PositionalCollision {
                position,
                positional: p,
                assigned,
            });
        }
        if assigned > 'Z' {
            warnings.push(ValidationWarning::BeyondAlphabet { position, assigned });
        }
    }

    let options = parsed
        .into_iter()
        .zip(resolved)
        .map(|(option, key)| QuestionOption {
            key,
            text: option.text,
        })
        .collect();

    (options, warnings)
}
