//! Path resolution.
//!
//! Paths are resolved lexically against a caller-held working directory.
//! The result is a list of segments below the root; `..` at the root is
//! absorbed rather than rejected.

/// Resolve `path` against `cwd` into canonical segments.
///
/// Absolute paths ignore `cwd`. Empty segments and `.` are dropped, `..` pops
/// the previous segment if there is one. An empty `path` resolves to `cwd`.
pub fn resolve(path: &str, cwd: &str) -> Vec<String> {
    let mut segments = Vec::new();
    if !path.starts_with('/') {
        push_segments(&mut segments, cwd);
    }
    push_segments(&mut segments, path);
    segments
}

fn push_segments(segments: &mut Vec<String>, path: &str) {
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            name => segments.push(String::from(name)),
        }
    }
}

/// Join segments into an absolute path string (`/` for the root).
pub fn to_absolute(segments: &[String]) -> String {
    let mut path = String::with_capacity(segments.iter().map(|s| s.len() + 1).sum::<usize>() + 1);
    for segment in segments {
        path.push('/');
        path.push_str(segment);
    }
    if path.is_empty() {
        path.push('/');
    }
    path
}

/// Canonical absolute form of `path` relative to `cwd`.
pub fn absolute_path(path: &str, cwd: &str) -> String {
    to_absolute(&resolve(path, cwd))
}

/// Split segments into the parent segments and the final name.
///
/// Returns `None` for the root (no final segment).
pub fn split_last(segments: &[String]) -> Option<(&[String], &str)> {
    segments
        .split_last()
        .map(|(name, parent)| (parent, name.as_str()))
}

/// Whether `inner` names `outer` itself or a descendant of it.
pub fn is_within(inner: &[String], outer: &[String]) -> bool {
    inner.len() >= outer.len() && inner[..outer.len()] == *outer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_absolute_ignores_cwd() {
        assert_eq!(resolve("/a/b", "/x/y"), segs(&["a", "b"]));
    }

    #[test]
    fn test_relative_joins_cwd() {
        assert_eq!(resolve("c", "/a/b"), segs(&["a", "b", "c"]));
        assert_eq!(resolve("./a/../b", "/x"), resolve("/x/b", "/"));
    }

    #[test]
    fn test_collapses_repeated_slashes() {
        assert_eq!(resolve("//a///b/", "/"), segs(&["a", "b"]));
    }

    #[test]
    fn test_ascent_above_root_is_absorbed() {
        assert_eq!(resolve("../../../..", "/a/b"), resolve("/", "/"));
        assert_eq!(resolve("/../x", "/"), segs(&["x"]));
    }

    #[test]
    fn test_empty_path_is_cwd() {
        assert_eq!(resolve("", "/sandbox/notes"), segs(&["sandbox", "notes"]));
        assert_eq!(resolve("", ""), Vec::<String>::new());
    }

    #[test]
    fn test_to_absolute() {
        assert_eq!(to_absolute(&[]), "/");
        assert_eq!(to_absolute(&segs(&["sandbox", "notes"])), "/sandbox/notes");
        assert_eq!(absolute_path("..", "/sandbox/notes"), "/sandbox");
    }

    #[test]
    fn test_split_last() {
        let path = segs(&["a", "b", "c"]);
        let (parent, name) = split_last(&path).unwrap();
        assert_eq!(parent, &path[..2]);
        assert_eq!(name, "c");
        assert!(split_last(&[]).is_none());
    }

    #[test]
    fn test_is_within() {
        let a = segs(&["a"]);
        let ab = segs(&["a", "b"]);
        let ax = segs(&["ax"]);
        assert!(is_within(&ab, &a));
        assert!(is_within(&a, &a));
        assert!(!is_within(&a, &ab));
        assert!(!is_within(&ax, &a));
    }
}
