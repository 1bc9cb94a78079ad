//! In-memory course model.
//!
//! Each record maps to one row of the relational schema. Surrogate ids are
//! never part of the model: they are resolved by natural key at sync time.

mod chapter;
mod course;
mod question;

pub use chapter::{Chapter, Subchapter};
pub use course::{Course, CourseModel};
pub use question::{AnswerOption, Question, QuestionSlot};
