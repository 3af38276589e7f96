//! Shared utility functions for output formatting

/// Bytes per megabyte as the tool reports sizes.
pub const MEGABYTE: u64 = 1024 * 1024;

/// Size in megabytes, fractional.
pub fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / MEGABYTE as f64
}

/// Branch glyph for an entry.
pub fn connector(is_last: bool) -> &'static str {
    if is_last { "└── " } else { "├── " }
}

/// Calculate the prefix for the entries below a folder line.
pub fn child_prefix(prefix: &str, is_last: bool) -> String {
    if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    }
}

/// Format a number with thousand separators.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Collapse the middle of a long path into `...`.
///
/// Keeps the first two and the last two segments. Both `/` and `\` count as
/// separators; the first one found is used to rejoin. Paths with fewer than
/// four segments are returned unchanged.
pub fn shorten_path(path: &str) -> String {
    let parts: Vec<&str> = path.split(['/', '\\']).collect();
    if parts.len() < 4 {
        return path.to_string();
    }

    let sep = path
        .chars()
        .find(|c| *c == '/' || *c == '\\')
        .unwrap_or(std::path::MAIN_SEPARATOR)
        .to_string();

    let front = parts[..2].join(&sep);
    let back = parts[parts.len() - 2..].join(&sep);
    format!("{front}{sep}...{sep}{back}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_megabytes() {
        assert_eq!(megabytes(MEGABYTE), 1.0);
        assert_eq!(megabytes(MEGABYTE / 2), 0.5);
    }

    #[test]
    fn test_child_prefix() {
        assert_eq!(child_prefix("", true), "    ");
        assert_eq!(child_prefix("", false), "│   ");
        assert_eq!(child_prefix("│   ", true), "│       ");
    }

    #[test]
    fn test_shorten_unix_path() {
        assert_eq!(
            shorten_path("/home/user/projects/app/src/main.rs"),
            "/home/.../src/main.rs"
        );
    }

    #[test]
    fn test_shorten_windows_path() {
        assert_eq!(
            shorten_path(r"C:\Users\me\Documents\notes\todo.txt"),
            r"C:\Users\...\notes\todo.txt"
        );
    }

    #[test]
    fn test_shorten_short_paths_untouched() {
        assert_eq!(shorten_path("/tmp/x"), "/tmp/x");
        assert_eq!(shorten_path("a/b/c"), "a/b/c");
    }

    #[test]
    fn test_shorten_exactly_four_segments() {
        assert_eq!(shorten_path("a/b/c/d"), "a/b/.../c/d");
    }
}
