use serde::{Deserialize, Serialize};

/// A chapter. Natural key: (`course_id`, `chapter_number`); also unique on
/// (`course_id`, `chapter_uid`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chapter {
    pub chapter_number: i64,
    pub chapter_uid: String,
    pub name: String,
    pub subchapters: Vec<Subchapter>,
}

/// A subchapter with its full Markdown body. Natural key:
/// (`chapter_id`, `subchapter_number`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subchapter {
    pub subchapter_number: i64,
    pub subchapter_uid: String,
    pub name: String,
    /// Empty when the referenced Markdown file does not exist.
    pub markdown: String,
}
