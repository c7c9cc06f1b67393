use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field name to list of messages, as the service reports validation
/// failures. Sorted keys keep diagnostics stable.
pub type FormErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question_number: u32,
    pub question: String,
    pub answers: Vec<String>,
    pub correct_answer: String,
}

/// A generated quiz plus the exact `items` JSON it was built from.
///
/// The raw JSON is retained because the save submission must carry the
/// item payload back verbatim, including any keys the typed view does
/// not model.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedQuiz {
    pub quiz_name: String,
    pub items: Vec<QuizItem>,
    items_json: String,
}

impl GeneratedQuiz {
    pub fn from_items_value(quiz_name: String, items: Value) -> Result<Self, serde_json::Error> {
        let typed: Vec<QuizItem> = serde_json::from_value(items.clone())?;
        let items_json = serde_json::to_string(&items)?;
        Ok(Self {
            quiz_name,
            items: typed,
            items_json,
        })
    }

    pub fn from_items_json(quiz_name: String, items_json: &str) -> Result<Self, serde_json::Error> {
        let items: Value = serde_json::from_str(items_json)?;
        Self::from_items_value(quiz_name, items)
    }

    pub fn items_json(&self) -> &str {
        &self.items_json
    }
}
