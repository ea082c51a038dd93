use serde::{Deserialize, Serialize};

/// Normalized term plus its per-document weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub word: String,
    /// Per-document frequency weight, `ln(distinct / frequency)`. Zero when
    /// weights were not requested or the content was not a string.
    pub idf: f64,
}

impl Token {
    pub fn new(word: impl Into<String>, idf: f64) -> Self {
        Token {
            word: word.into(),
            idf,
        }
    }
}

/// Document content supplied by the caller. Non-string values collapse to a
/// single synthetic token during analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Value(serde_json::Value),
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<serde_json::Value> for Content {
    fn from(value: serde_json::Value) -> Self {
        Content::Value(value)
    }
}
