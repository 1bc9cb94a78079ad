//! End-to-end loader tests against on-disk course fixtures.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use serde_json::json;
use syl_content::{LoadError, default_course_dir, load_course};
use syl_core::entities::AnswerOption;
use tempfile::TempDir;

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn write_json(path: &Path, value: &serde_json::Value) {
    write(path, &serde_json::to_string_pretty(value).unwrap());
}

/// `resources/courses/py-101` with one chapter, one subchapter, one question.
fn minimal_course() -> (TempDir, std::path::PathBuf) {
    let root = TempDir::new().unwrap();
    let resources = root.path().join("resources");
    let course_dir = default_course_dir(&resources, "py-101");

    write_json(
        &course_dir.join("course.json"),
        &json!({
            "id": "py-101",
            "title": "Python 101",
            "language": "en",
            "contents": [{
                "order": 1,
                "chapter": "Chapter 1",
                "title": "Variables",
                "subcontents": [{
                    "order": 1,
                    "title": "Names",
                    "markdownPath": "/courses/py-101/md/1-1.md"
                }]
            }]
        }),
    );
    write(&course_dir.join("md/1-1.md"), "# Names\n");
    write(&course_dir.join("md/q1.md"), "What is `x`?");
    write_json(
        &course_dir.join("questions/chapter-1-q1.json"),
        &json!({
            "chapterId": "1",
            "questionNumber": 1,
            "questionContentPath": "courses/py-101/md/q1.md",
            "options": [
                {"optionIndex": 0, "optionContent": "a name", "isCorrect": true},
                {"optionIndex": 1, "optionContent": "a number", "isCorrect": false}
            ]
        }),
    );
    write(
        &course_dir.join("questions/chapter-1-e1.md"),
        "Because it names a value.",
    );
    (root, resources)
}

#[test]
fn loads_minimal_course() {
    let (_root, resources) = minimal_course();
    let model = load_course(&default_course_dir(&resources, "py-101"), &resources, None).unwrap();

    assert_eq!(model.course.course_id, "py-101");
    assert_eq!(model.course.title, "Python 101");
    assert_eq!(model.chapters.len(), 1);
    assert_eq!(model.chapters[0].name, "Chapter 1 Variables");
    assert_eq!(model.chapters[0].subchapters[0].markdown, "# Names\n");

    assert_eq!(model.questions.len(), 1);
    let q = &model.questions[0];
    assert_eq!((q.chapter_number, q.question_number), (1, 1));
    assert_eq!(q.question_uid, "c1-q1");
    assert_eq!(q.question_markdown, "What is `x`?");
    assert_eq!(q.explanation_markdown, "Because it names a value.");
    assert!(q.slots.is_empty());
    assert_eq!(
        q.options,
        vec![
            AnswerOption { option_index: 0, content: "a name".into(), is_correct: true },
            AnswerOption { option_index: 1, content: "a number".into(), is_correct: false },
        ]
    );
}

#[test]
fn missing_subchapter_markdown_is_empty_not_an_error() {
    let root = TempDir::new().unwrap();
    let course_dir = root.path().join("c");
    write_json(
        &course_dir.join("course.json"),
        &json!({"contents": [{"order": 1, "subcontents": [
            {"order": 1, "markdownPath": "does/not/exist.md"}
        ]}]}),
    );

    let model = load_course(&course_dir, root.path(), None).unwrap();
    assert_eq!(model.course.course_id, "c");
    assert_eq!(model.chapters[0].subchapters[0].markdown, "");
}

#[test]
fn override_beats_manifest_id() {
    let (_root, resources) = minimal_course();
    let dir = default_course_dir(&resources, "py-101");
    let model = load_course(&dir, &resources, Some("py-101-copy")).unwrap();
    assert_eq!(model.course.course_id, "py-101-copy");
    // Explanations are looked up under the resolved id, which has none.
    assert_eq!(model.questions[0].explanation_markdown, "");
}

#[test]
fn question_numbers_fall_back_to_file_name() {
    let root = TempDir::new().unwrap();
    let course_dir = root.path().join("c");
    write_json(&course_dir.join("course.json"), &json!({}));
    write_json(
        &course_dir.join("questions/chapter-4-q7.json"),
        &json!({"questionNumber": "x"}),
    );
    write_json(
        &course_dir.join("questions/chapter-4-q2.json"),
        &json!({"chapterId": 9}),
    );
    write(&course_dir.join("questions/chapter-4-q3.json"), "{not json");
    write_json(&course_dir.join("questions/notes.json"), &json!({"chapterId": 1}));

    let model = load_course(&course_dir, root.path(), None).unwrap();
    let numbers: Vec<_> = model
        .questions
        .iter()
        .map(|q| (q.chapter_number, q.question_number))
        .collect();
    // File-name order; chapter-4-q3.json is skipped as invalid JSON.
    assert_eq!(numbers, vec![(9, 2), (4, 7)]);
}

#[test]
fn question_file_without_numbers_is_skipped() {
    let root = TempDir::new().unwrap();
    let course_dir = root.path().join("c");
    write_json(&course_dir.join("course.json"), &json!({}));
    write_json(
        &course_dir.join("questions/chapter-a-qb.json"),
        &json!({"questionNumber": 1}),
    );

    let model = load_course(&course_dir, root.path(), None).unwrap();
    assert!(model.questions.is_empty());
}

#[test]
fn slot_options_are_loaded_per_slot() {
    let root = TempDir::new().unwrap();
    let course_dir = root.path().join("c");
    write_json(&course_dir.join("course.json"), &json!({}));
    write_json(
        &course_dir.join("questions/chapter-1-q1.json"),
        &json!({"slotOptions": [
            [{"optionIndex": 0, "optionContent": "for", "isCorrect": true},
             {"optionIndex": 1, "optionContent": "while"}],
            "not-a-slot",
            [{"optionIndex": 0, "optionContent": "in", "isCorrect": 1}, null]
        ]}),
    );

    let model = load_course(&course_dir, root.path(), None).unwrap();
    let slots = &model.questions[0].slots;
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0].slot_index, 0);
    assert_eq!(slots[0].options.len(), 2);
    assert_eq!(slots[1].slot_index, 1);
    assert!(slots[1].options.is_empty());
    assert_eq!(slots[2].options.len(), 1);
    assert!(slots[2].options[0].is_correct);
}

#[test]
fn missing_manifest_fails() {
    let root = TempDir::new().unwrap();
    let err = load_course(&root.path().join("nope"), root.path(), None).unwrap_err();
    assert!(matches!(err, LoadError::ManifestMissing { .. }), "{err}");
}

#[test]
fn unparsable_manifest_fails() {
    let root = TempDir::new().unwrap();
    let course_dir = root.path().join("c");
    write(&course_dir.join("course.json"), "{ broken");
    let err = load_course(&course_dir, root.path(), None).unwrap_err();
    assert!(matches!(err, LoadError::ManifestParse { .. }), "{err}");

    write(&course_dir.join("course.json"), "[1, 2]");
    let err = load_course(&course_dir, root.path(), None).unwrap_err();
    assert!(matches!(err, LoadError::ManifestShape { .. }), "{err}");
}
