/// Normalize a request path the posix way.
///
/// Backslashes become forward slashes, duplicate slashes and `.` segments are
/// dropped, and `..` pops the previous segment (never above the root of an
/// absolute path).
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    if path.is_empty() {
        return ".".to_string();
    }

    let absolute = path.starts_with('/');
    let trailing_slash = path.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let mut normalized = segments.join("/");
    if absolute {
        normalized.insert(0, '/');
    }
    if normalized.is_empty() {
        normalized.push('.');
    }
    if trailing_slash && !normalized.ends_with('/') {
        normalized.push('/');
    }

    normalized
}
