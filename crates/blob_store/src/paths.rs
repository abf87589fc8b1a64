use crate::error::StoreError;

/// Split a sandbox-relative path into validated segments.
///
/// Empty input and `""`-only segments (doubled or trailing separators) resolve
/// to the enclosing segments; `..`, absolute paths, and backslashes are
/// rejected so no path can address anything outside the sandbox root.
pub fn split_path(path: &str) -> Result<Vec<&str>, StoreError> {
    if path.starts_with('/') || path.contains('\\') {
        return Err(StoreError::InvalidPath {
            path: path.to_string(),
        });
    }

    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(StoreError::InvalidPath {
                    path: path.to_string(),
                })
            }
            other => segments.push(other),
        }
    }
    Ok(segments)
}

/// Final segment of a relative path, if any.
#[must_use]
pub fn file_name(path: &str) -> Option<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).next_back()
}

/// The path with its final segment removed ("" for top-level entries).
#[must_use]
pub fn parent_of(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(index) => &trimmed[..index],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::{file_name, parent_of, split_path};

    #[test]
    fn split_path_normalizes_separators() {
        assert_eq!(split_path("").unwrap(), Vec::<&str>::new());
        assert_eq!(split_path("a/b").unwrap(), vec!["a", "b"]);
        assert_eq!(split_path("a//b/").unwrap(), vec!["a", "b"]);
        assert_eq!(split_path("./a").unwrap(), vec!["a"]);
    }

    #[test]
    fn split_path_rejects_escapes() {
        assert!(split_path("../x").is_err());
        assert!(split_path("a/../b").is_err());
        assert!(split_path("/etc/passwd").is_err());
        assert!(split_path("a\\b").is_err());
    }

    #[test]
    fn file_name_and_parent() {
        assert_eq!(file_name("apps/notes/state.txt"), Some("state.txt"));
        assert_eq!(file_name("apps/notes/"), Some("notes"));
        assert_eq!(file_name(""), None);
        assert_eq!(parent_of("apps/notes/state.txt"), "apps/notes");
        assert_eq!(parent_of("apps"), "");
        assert_eq!(parent_of("apps/notes/"), "apps");
    }
}
