use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Raw question record as it appears in the source dump
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub index: Option<RawIndex>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: String,
    #[serde(default)]
    pub answer_description: Option<String>,
    #[serde(default, deserialize_with = "options_with_nulls")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub votes: Option<Vec<Vote>>,
    #[serde(default)]
    pub comments: Option<Vec<Comment>>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Question index is a string in some dumps and a number in others
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawIndex {
    Number(serde_json::Number),
    Text(String),
}

impl RawIndex {
    /// Stringified index, or `None` when the value counts as missing (empty or zero)
    pub fn label(&self) -> Option<String> {
        match self {
            RawIndex::Number(n) => match n.as_f64() {
                Some(v) if v == 0.0 => None,
                // 5.0 reads as "5", like an integer index
                Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < 1e15 => {
                    Some(format!("{}", v as i64))
                }
                _ => Some(n.to_string()),
            },
            RawIndex::Text(s) => {
                if s.is_empty() {
                    None
                } else {
                    Some(s.clone())
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_most_voted: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

/// Dumps write `null` for blank fields; treat it like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A `null` option entry becomes an empty option rather than a parse error
fn options_with_nulls<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let options = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(options.map(|items| items.into_iter().map(Option::unwrap_or_default).collect()))
}

/// Option key as extracted from the option text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKey {
    Letter(char),
    /// No leading letter could be parsed; resolved later by position
    Unresolved,
}

/// Option straight out of the parser, before key resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOption {
    pub key: OptionKey,
    pub text: String,
}

/// Option with a resolved letter key
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionOption {
    pub key: char,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestionType {
    Single,
    Multi,
}

impl QuestionType {
    /// MULTI iff more than one correct answer; an empty key is SINGLE
    pub fn from_answer_count(count: usize) -> Self {
        if count > 1 {
            QuestionType::Multi
        } else {
            QuestionType::Single
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Single => write!(f, "SINGLE"),
            QuestionType::Multi => write!(f, "MULTI"),
        }
    }
}

/// Canonical question produced by the normalization pipeline.
///
/// Fields are private so `question_type` can never drift from
/// `correct_answers`; build one with [`NormalizedQuestion::new`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedQuestion {
    id: String,
    topic: String,
    index: String,
    body: String,
    correct_answers: BTreeSet<char>,
    options: Vec<QuestionOption>,
    #[serde(rename = "type")]
    question_type: QuestionType,
    explanation: String,
}

impl NormalizedQuestion {
    pub fn new(
        id: String,
        topic: String,
        index: String,
        body: String,
        correct_answers: BTreeSet<char>,
        options: Vec<QuestionOption>,
        explanation: String,
    ) -> Self {
        let question_type = QuestionType::from_answer_count(correct_answers.len());
        Self {
            id,
            topic,
            index,
            body,
            correct_answers,
            options,
            question_type,
            explanation,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn correct_answers(&self) -> &BTreeSet<char> {
        &self.correct_answers
    }

    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// One graded submission from a quiz session
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswer {
    pub question_id: String,
    pub selected_options: BTreeSet<char>,
    pub is_correct: bool,
    /// Epoch milliseconds
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizStats {
    pub total_questions: usize,
    pub total_answered: usize,
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub accuracy: u32,
    pub start_time: i64,
    #[serde(default)]
    pub end_time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub run_id: String,
    pub date: String,
    pub total_answered: usize,
    pub correct: usize,
    pub accuracy: u32,
}
