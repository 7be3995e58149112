use serde::{Deserialize, Serialize};

/// A single exam question as it appeared in the bank file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Ordinal label from the `QUESTION <n>` line, taken literally from
    /// the source; `0` when the digits were missing.
    pub number: u32,
    /// Prompt text with internal line breaks preserved, markers stripped.
    pub text: String,
    /// Options in source order, each starting with its letter and a period.
    pub options: Vec<String>,
    /// Correct-choice letters, uppercased (`"B"`, `"AC"`); empty when the
    /// key line was missing.
    pub answer: String,
}

impl Question {
    /// More than one correct letter means the question is multi-select.
    pub fn is_multi_select(&self) -> bool {
        self.answer.len() > 1
    }

    /// Letter of the option at `index`, taken from its leading character.
    pub fn option_letter(&self, index: usize) -> Option<char> {
        self.options.get(index).and_then(|option| option.chars().next())
    }
}
