use serde::{Deserialize, Serialize};

/// A question attached to a chapter by number. Natural key:
/// (`chapter_id`, `question_number`).
///
/// Flat `options` and slot-structured `slots` are independent; either, both,
/// or neither may be populated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub chapter_number: i64,
    pub question_number: i64,
    pub question_uid: String,
    pub question_markdown: String,
    pub explanation_markdown: String,
    pub options: Vec<AnswerOption>,
    pub slots: Vec<QuestionSlot>,
}

/// One answer option, either directly under a question or inside a slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerOption {
    pub option_index: i64,
    pub content: String,
    pub is_correct: bool,
}

impl AnswerOption {
    /// Canonical 0/1 form of `is_correct` as bound to SQL parameters.
    #[must_use]
    pub const fn correct_flag(&self) -> i64 {
        if self.is_correct { 1 } else { 0 }
    }
}

/// A blank in a fill-in-multiple-blanks question. `slot_index` is the
/// position of the slot in the source array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionSlot {
    pub slot_index: i64,
    pub options: Vec<AnswerOption>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_flag_is_zero_or_one() {
        let mut opt = AnswerOption {
            option_index: 0,
            content: "a".into(),
            is_correct: true,
        };
        assert_eq!(opt.correct_flag(), 1);
        opt.is_correct = false;
        assert_eq!(opt.correct_flag(), 0);
    }
}
