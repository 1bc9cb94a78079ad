//! Resource path resolution and optional file reads.

use std::path::{Path, PathBuf};

/// Resolve a manifest-relative resource path against the resources root.
///
/// Leading slashes are stripped so `/courses/x/a.md` and `courses/x/a.md`
/// resolve to the same file. Blank values resolve to `None`.
pub fn resolve_resource(resources_root: &Path, value: Option<&str>) -> Option<PathBuf> {
    let clean = value?.trim().trim_start_matches('/');
    if clean.is_empty() {
        return None;
    }
    Some(resources_root.join(clean))
}

/// Read a UTF-8 file, or `""` if it is missing or unreadable.
pub fn read_optional_text(path: Option<&Path>) -> String {
    let Some(path) = path else {
        return String::new();
    };
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "content file missing, using empty body");
        return String::new();
    }
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "content file unreadable, using empty body");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_strips_leading_slash() {
        let root = Path::new("/res");
        assert_eq!(
            resolve_resource(root, Some("/courses/a.md")),
            Some(PathBuf::from("/res/courses/a.md"))
        );
        assert_eq!(
            resolve_resource(root, Some("courses/a.md")),
            Some(PathBuf::from("/res/courses/a.md"))
        );
    }

    #[test]
    fn resolve_blank_is_none() {
        let root = Path::new("/res");
        assert_eq!(resolve_resource(root, Some("  ")), None);
        assert_eq!(resolve_resource(root, Some("/")), None);
        assert_eq!(resolve_resource(root, None), None);
    }

    #[test]
    fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.md");
        assert_eq!(read_optional_text(Some(&path)), "");
        assert_eq!(read_optional_text(None), "");
    }

    #[test]
    fn existing_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.md");
        std::fs::write(&path, "# Hello").unwrap();
        assert_eq!(read_optional_text(Some(&path)), "# Hello");
    }
}
