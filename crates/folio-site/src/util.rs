//! Path helpers.

/// Resolve `target` against the directory of page `from`.
///
/// Both are slash-separated page paths. `.` segments are dropped, `..`
/// removes the previous segment and stops at the content root, and empty
/// segments (including a leading slash) are ignored.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(join_relative("lab/intro", "setup"), "lab/setup");
/// assert_eq!(join_relative("lab/intro", "../faq"), "faq");
/// ```
pub(crate) fn join_relative(from: &str, target: &str) -> String {
    let mut segments: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    // Last segment is the page itself
    segments.pop();
    push_segments(segments, target)
}

/// Normalize a page path relative to the content root.
///
/// Applies the same segment rules as [`join_relative`], so `./index`,
/// `/index` and `lab/../index` all become `index`.
pub(crate) fn normalize_path(path: &str) -> String {
    push_segments(Vec::new(), path)
}

fn push_segments<'a>(mut segments: Vec<&'a str>, path: &'a str) -> String {
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling() {
        assert_eq!(join_relative("lab/intro", "setup"), "lab/setup");
    }

    #[test]
    fn test_root_page() {
        assert_eq!(join_relative("index", "intro"), "intro");
    }

    #[test]
    fn test_subdirectory() {
        assert_eq!(join_relative("index", "lab/one"), "lab/one");
        assert_eq!(join_relative("lab/one", "./two"), "lab/two");
    }

    #[test]
    fn test_parent() {
        assert_eq!(join_relative("lab/part/one", "../faq"), "lab/faq");
        assert_eq!(join_relative("lab/one", "../../outside"), "outside");
    }

    #[test]
    fn test_leading_slash_stays_relative() {
        assert_eq!(join_relative("lab/one", "/two"), "lab/two");
    }

    #[test]
    fn test_only_parent_segments() {
        assert_eq!(join_relative("one", ".."), "");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("./index"), "index");
        assert_eq!(normalize_path("/lab//intro/"), "lab/intro");
        assert_eq!(normalize_path("lab/../index"), "index");
        assert_eq!(normalize_path("../index"), "index");
        assert_eq!(normalize_path("."), "");
    }
}
