use std::{
    io,
    path::{Component, Path, PathBuf},
};

/// The resolved inputs for a single rename run.
///
/// Built once all values have been collected from flags or prompts, and
/// never modified after the user confirms it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Absolute path of the directory tree to scan.
    pub target_directory: PathBuf,
    /// Literal substring searched for in each file name.
    pub find: String,
    /// Literal substring substituted for every occurrence of `find`.
    pub replace: String,
}

impl Configuration {
    pub fn new(target_directory: PathBuf, find: String, replace: String) -> Self {
        Configuration {
            target_directory,
            find,
            replace,
        }
    }
}

/// Removes one pair of surrounding quotes from `raw`.
///
/// Quotes are only removed when the first and last characters are the same
/// quote character (`"` or `'`). Mismatched or lone quotes are left alone.
///
/// # Examples
///
/// ```
/// use token_rename::config::strip_matching_quotes;
///
/// assert_eq!(strip_matching_quotes("\"C:\\My Files\""), "C:\\My Files");
/// assert_eq!(strip_matching_quotes("'photos'"), "photos");
/// assert_eq!(strip_matching_quotes("\"mixed'"), "\"mixed'");
/// ```
pub fn strip_matching_quotes(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

/// Resolves `path` to an absolute path against the current directory.
///
/// The path does not need to exist. `.` and `..` components are collapsed
/// lexically, without consulting the filesystem, so `a/../b` becomes `b`
/// even if `a` is a symlink. `..` at the root stays at the root.
///
/// # Errors
///
/// Returns the underlying I/O error if `path` is empty or the current
/// directory cannot be determined.
pub fn normalize_directory(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                }
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// Like [`normalize_directory`], for a path typed at the interactive prompt.
///
/// Surrounding whitespace and one pair of matching quotes are removed first,
/// since file managers and shells often paste paths that way.
pub fn normalize_prompt_directory(raw: &str) -> io::Result<PathBuf> {
    normalize_directory(Path::new(strip_matching_quotes(raw.trim())))
}

#[cfg(test)]
mod tests {
    use super::{normalize_directory, normalize_prompt_directory, strip_matching_quotes};
    use std::path::Path;

    #[test]
    fn strips_double_quotes() {
        assert_eq!(strip_matching_quotes("\"/tmp/my dir\""), "/tmp/my dir");
    }

    #[test]
    fn strips_single_quotes() {
        assert_eq!(strip_matching_quotes("'/tmp/my dir'"), "/tmp/my dir");
    }

    #[test]
    fn leaves_mismatched_quotes() {
        assert_eq!(strip_matching_quotes("\"/tmp/x'"), "\"/tmp/x'");
        assert_eq!(strip_matching_quotes("'/tmp/x"), "'/tmp/x");
    }

    #[test]
    fn lone_quote_is_unchanged() {
        assert_eq!(strip_matching_quotes("\""), "\"");
    }

    #[test]
    fn empty_quotes_become_empty() {
        assert_eq!(strip_matching_quotes("''"), "");
    }

    #[test]
    fn relative_prompt_path_becomes_absolute() {
        let cwd = std::env::current_dir().expect("cwd");
        let p = normalize_prompt_directory("  'some/dir'  ").expect("normalize");
        assert!(p.is_absolute());
        assert_eq!(p, cwd.join("some/dir"));
    }

    #[test]
    fn flag_path_keeps_quotes() {
        let cwd = std::env::current_dir().expect("cwd");
        let p = normalize_directory(Path::new("'odd'")).expect("normalize");
        assert_eq!(p, cwd.join("'odd'"));
    }

    #[test]
    fn parent_components_are_collapsed() {
        let cwd = std::env::current_dir().expect("cwd");
        let p = normalize_directory(Path::new("a/./../b/c/..")).expect("normalize");
        assert_eq!(p, cwd.join("b"));
        assert!(!p.components().any(|c| c.as_os_str() == ".."));
    }

    #[cfg(unix)]
    #[test]
    fn parent_of_root_stays_at_root() {
        let p = normalize_directory(Path::new("/../../tmp")).expect("normalize");
        assert_eq!(p, Path::new("/tmp"));
    }

    #[test]
    fn empty_path_is_an_error() {
        assert!(normalize_directory(Path::new("")).is_err());
        assert!(normalize_prompt_directory("\"\"").is_err());
    }

    #[test]
    fn absolute_path_is_kept() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let p = normalize_directory(tmp.path()).expect("normalize");
        assert_eq!(p, tmp.path());
    }
}
