//! Stable natural-key naming.
//!
//! Uids and fallback names are derived from numbers alone, so re-importing the
//! same course always produces the same strings.

/// `chapter-<n>`
#[must_use]
pub fn chapter_uid(chapter_number: i64) -> String {
    format!("chapter-{chapter_number}")
}

/// `chapter-<n>-sub-<m>`
#[must_use]
pub fn subchapter_uid(chapter_number: i64, subchapter_number: i64) -> String {
    format!("{}-sub-{subchapter_number}", chapter_uid(chapter_number))
}

/// `c<n>-q<m>`
#[must_use]
pub fn question_uid(chapter_number: i64, question_number: i64) -> String {
    format!("c{chapter_number}-q{question_number}")
}

/// Display name of a chapter synthesized for questions whose chapter is
/// missing from the manifest.
#[must_use]
pub fn fallback_chapter_name(chapter_number: i64) -> String {
    format!("Chapter {chapter_number}")
}

#[must_use]
pub fn fallback_subchapter_name(subchapter_number: i64) -> String {
    format!("Subchapter {subchapter_number}")
}

/// File name of the explanation companion for a question.
#[must_use]
pub fn explanation_file_name(chapter_number: i64, question_number: i64) -> String {
    format!("chapter-{chapter_number}-e{question_number}.md")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uids_are_derived_from_numbers() {
        assert_eq!(chapter_uid(3), "chapter-3");
        assert_eq!(subchapter_uid(3, 2), "chapter-3-sub-2");
        assert_eq!(question_uid(3, 14), "c3-q14");
    }

    #[test]
    fn fallback_names() {
        assert_eq!(fallback_chapter_name(7), "Chapter 7");
        assert_eq!(fallback_subchapter_name(1), "Subchapter 1");
        assert_eq!(explanation_file_name(2, 5), "chapter-2-e5.md");
    }
}
