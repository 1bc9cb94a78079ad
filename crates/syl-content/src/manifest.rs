//! Course manifest (`course.json`) parsing.
//!
//! Manifest entries are heterogeneous and possibly malformed: a chapter or
//! subchapter without a numeric `order` is skipped and the load continues.

use std::path::Path;

use serde_json::{Map, Value};
use syl_core::entities::{Chapter, Course, Subchapter};
use syl_core::ids;

use crate::error::LoadError;
use crate::files::{read_optional_text, resolve_resource};
use crate::values::{array_field, non_empty_field, safe_int, string_field, trimmed_field, truthy};

pub const MANIFEST_FILE: &str = "course.json";

/// Read and parse the manifest at `<course_dir>/course.json`.
pub fn read_manifest(course_dir: &Path) -> Result<Map<String, Value>, LoadError> {
    let path = course_dir.join(MANIFEST_FILE);
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(LoadError::ManifestMissing { path });
        }
        Err(source) => return Err(LoadError::Io { path, source }),
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(LoadError::ManifestShape { path }),
        Err(source) => Err(LoadError::ManifestParse { path, source }),
    }
}

/// Pick the course id: explicit override, then the manifest's `id`, then the
/// course directory's base name.
pub fn resolve_course_id(
    manifest: &Map<String, Value>,
    course_dir: &Path,
    course_id_override: Option<&str>,
) -> Result<String, LoadError> {
    if let Some(id) = course_id_override.map(str::trim).filter(|s| !s.is_empty()) {
        return Ok(id.to_string());
    }
    if let Some(id) = non_empty_field(manifest, "id") {
        return Ok(id);
    }
    course_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| LoadError::NoCourseId {
            path: course_dir.to_path_buf(),
        })
}

pub fn course_from_manifest(manifest: &Map<String, Value>, course_id: String) -> Course {
    let mut course = Course::new(course_id);
    if let Some(title) = non_empty_field(manifest, "title") {
        course.title = title;
    }
    course.description = string_field(manifest, "description").map(String::from);
    course.language = string_field(manifest, "language").map(String::from);
    course.cover_image_url = non_empty_field(manifest, "cover_image_url")
        .or_else(|| non_empty_field(manifest, "coverImageUrl"))
        .or_else(|| non_empty_field(manifest, "logo"));
    course.target_students_json = manifest
        .get("target_students_json")
        .or_else(|| manifest.get("targetStudents"))
        .and_then(structured_text);
    if let Some(flag) = manifest.get("published") {
        course.published = truthy(Some(flag));
    }
    course
}

/// Audience metadata is stored as JSON text: strings are taken verbatim,
/// other values are serialized.
fn structured_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Build the ordered chapter tree from `contents[]`.
pub fn chapters_from_manifest(manifest: &Map<String, Value>, resources_root: &Path) -> Vec<Chapter> {
    let mut chapters = Vec::new();
    for (position, entry) in array_field(manifest, "contents").iter().enumerate() {
        let Some(entry) = entry.as_object() else {
            tracing::warn!(position, "skipping chapter entry that is not an object");
            continue;
        };
        let Some(chapter_number) = safe_int(entry.get("order")) else {
            tracing::warn!(position, "skipping chapter entry without a numeric order");
            continue;
        };

        let subchapters = array_field(entry, "subcontents")
            .iter()
            .enumerate()
            .filter_map(|(sub_position, sub)| {
                subchapter_from_entry(sub, chapter_number, sub_position, resources_root)
            })
            .collect();

        chapters.push(Chapter {
            chapter_number,
            chapter_uid: ids::chapter_uid(chapter_number),
            name: chapter_name(entry),
            subchapters,
        });
    }
    chapters
}

/// `"<label> <title>"`, trimmed. Empty when both are blank.
fn chapter_name(entry: &Map<String, Value>) -> String {
    let label = trimmed_field(entry, "chapter");
    let title = trimmed_field(entry, "title");
    format!("{label} {title}").trim().to_string()
}

fn subchapter_from_entry(
    entry: &Value,
    chapter_number: i64,
    position: usize,
    resources_root: &Path,
) -> Option<Subchapter> {
    let Some(entry) = entry.as_object() else {
        tracing::warn!(chapter_number, position, "skipping subchapter entry that is not an object");
        return None;
    };
    let Some(subchapter_number) = safe_int(entry.get("order")) else {
        tracing::warn!(chapter_number, position, "skipping subchapter entry without a numeric order");
        return None;
    };

    let markdown_path = resolve_resource(resources_root, string_field(entry, "markdownPath"));
    let title = trimmed_field(entry, "title");

    Some(Subchapter {
        subchapter_number,
        subchapter_uid: ids::subchapter_uid(chapter_number, subchapter_number),
        name: if title.is_empty() {
            ids::fallback_subchapter_name(subchapter_number)
        } else {
            title.to_string()
        },
        markdown: read_optional_text(markdown_path.as_deref()),
    })
}
