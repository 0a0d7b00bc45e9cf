use std::{
    ffi::{OsStr, OsString},
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::report::RenameReporter;

/// Errors that stop a run before any file is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenameError {
    #[error("Directory '{}' does not exist.", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("The text to find must not be empty.")]
    EmptyFindToken,
}

/// Outcome of one attempted rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameResult {
    Renamed {
        directory: PathBuf,
        old_name: String,
        new_name: String,
    },
    Failed {
        directory: PathBuf,
        old_name: String,
        new_name: String,
        message: String,
    },
}

impl RenameResult {
    pub fn old_name(&self) -> &str {
        match self {
            RenameResult::Renamed { old_name, .. } | RenameResult::Failed { old_name, .. } => {
                old_name
            }
        }
    }

    pub fn is_renamed(&self) -> bool {
        matches!(self, RenameResult::Renamed { .. })
    }
}

/// Every per-file outcome of a run, in processing order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenameSummary {
    pub results: Vec<RenameResult>,
}

impl RenameSummary {
    pub fn renamed_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_renamed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.len() - self.renamed_count()
    }
}

/// Tuning knobs for the directory walk.
#[derive(Debug, Default, Clone, Copy)]
pub struct RenameOptions {
    /// Visit directory entries in lexicographic file-name order instead of
    /// the order the filesystem returns them in.
    pub sorted: bool,
}

/// A file selected for renaming, found during the walk.
///
/// `new_name` is an error when the new name cannot be represented on this
/// platform.
#[derive(Debug)]
struct Candidate {
    directory: PathBuf,
    old_name: OsString,
    new_name: Result<OsString, String>,
}

/// Computes the new name for `name`, if it is a candidate.
///
/// Returns `None` when `name` does not contain `find`. Otherwise every
/// non-overlapping occurrence of `find`, scanning left to right, is replaced
/// by `replace`.
///
/// `find` must not be empty; [`rename_all`] rejects empty tokens before
/// calling this.
///
/// # Examples
///
/// ```
/// use token_rename::renamer::transform_name;
///
/// assert_eq!(transform_name("a_b_c.txt", "_", " "), Some("a b c.txt".to_string()));
/// assert_eq!(transform_name("aaa", "aa", "b"), Some("ba".to_string()));
/// assert_eq!(transform_name("note.txt", "_", " "), None);
/// ```
pub fn transform_name(name: &str, find: &str, replace: &str) -> Option<String> {
    if find.is_empty() || !name.contains(find) {
        return None;
    }
    Some(name.replace(find, replace))
}

/// Replaces every non-overlapping occurrence of `find` in `haystack`.
///
/// Byte-level counterpart of [`transform_name`] for file names that are not
/// valid UTF-8. Returns `None` when `find` does not occur.
#[cfg(unix)]
fn replace_bytes(haystack: &[u8], find: &[u8], replace: &[u8]) -> Option<Vec<u8>> {
    if find.is_empty() {
        return None;
    }

    let mut out = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    let mut found = false;
    while rest.len() >= find.len() {
        if rest.starts_with(find) {
            out.extend_from_slice(replace);
            rest = &rest[find.len()..];
            found = true;
        } else {
            out.push(rest[0]);
            rest = &rest[1..];
        }
    }
    out.extend_from_slice(rest);

    if found { Some(out) } else { None }
}

/// Computes the new name for a raw file name, if it is a candidate.
///
/// Names that are not valid UTF-8 are matched byte-wise, so an invalid byte
/// elsewhere in the name does not hide a match.
#[cfg(unix)]
fn transform_os_name(name: &OsStr, find: &str, replace: &str) -> Option<Result<OsString, String>> {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    match name.to_str() {
        Some(s) => transform_name(s, find, replace).map(|n| Ok(OsString::from(n))),
        None => replace_bytes(name.as_bytes(), find.as_bytes(), replace.as_bytes())
            .map(|bytes| Ok(OsString::from_vec(bytes))),
    }
}

/// Computes the new name for a raw file name, if it is a candidate.
///
/// A name that is not valid Unicode but visibly contains `find` is still a
/// candidate; it is reported as a failure since it cannot be rewritten here.
#[cfg(not(unix))]
fn transform_os_name(name: &OsStr, find: &str, replace: &str) -> Option<Result<OsString, String>> {
    match name.to_str() {
        Some(s) => transform_name(s, find, replace).map(|n| Ok(OsString::from(n))),
        None if name.to_string_lossy().contains(find) => {
            Some(Err(String::from("file name is not valid Unicode")))
        }
        None => None,
    }
}

/// Renames every file below `root` whose name contains `find`.
///
/// The whole tree is walked top-down first and candidates are collected;
/// renames happen afterwards, one at a time, each within the file's own
/// directory. Directory names are never matched or renamed.
///
/// Each attempted rename is passed to `reporter`, followed by a final call to
/// [`RenameReporter::finish`] with the success count. A failed rename is
/// recorded and the run moves on to the next file. Files renamed before a
/// failure stay renamed.
///
/// # Errors
///
/// * [`RenameError::EmptyFindToken`] if `find` is empty.
/// * [`RenameError::DirectoryNotFound`] if `root` is missing or not a
///   directory.
///
/// In both cases nothing on disk is changed and the reporter is not called.
pub fn rename_all<R: RenameReporter>(
    root: &Path,
    find: &str,
    replace: &str,
    options: RenameOptions,
    reporter: &mut R,
) -> Result<RenameSummary, RenameError> {
    if find.is_empty() {
        return Err(RenameError::EmptyFindToken);
    }
    if !root.is_dir() {
        return Err(RenameError::DirectoryNotFound(root.to_path_buf()));
    }

    info!(root = %root.display(), find, replace, "starting rename run");

    let candidates = collect_candidates(root, find, replace, options);
    debug!(count = candidates.len(), "collected candidates");

    let mut summary = RenameSummary::default();
    for candidate in candidates {
        let result = apply(candidate);
        reporter.record(&result);
        summary.results.push(result);
    }

    let renamed = summary.renamed_count();
    reporter.finish(renamed);
    info!(renamed, failed = summary.failed_count(), "rename run finished");

    Ok(summary)
}

/// Walks `root` and returns every file whose name contains `find`.
fn collect_candidates(
    root: &Path,
    find: &str,
    replace: &str,
    options: RenameOptions,
) -> Vec<Candidate> {
    let mut walker = WalkDir::new(root).min_depth(1);
    if options.sorted {
        walker = walker.sort_by_file_name();
    }

    let mut candidates = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        // Follows symlinks, so links to directories are skipped too.
        if entry.path().is_dir() {
            continue;
        }

        let name = entry.file_name();
        let new_name = match transform_os_name(name, find, replace) {
            Some(n) => n,
            None => continue,
        };

        let directory = match entry.path().parent() {
            Some(p) => p.to_path_buf(),
            None => continue,
        };

        debug!(dir = %directory.display(), old = ?name, new = ?new_name, "candidate");
        candidates.push(Candidate {
            directory,
            old_name: name.to_os_string(),
            new_name,
        });
    }

    candidates
}

fn apply(candidate: Candidate) -> RenameResult {
    let Candidate {
        directory,
        old_name,
        new_name,
    } = candidate;

    let outcome = match &new_name {
        Ok(new) => rename_in_place(&directory, &old_name, new),
        Err(msg) => Err(io::Error::new(io::ErrorKind::InvalidData, msg.clone())),
    };

    let old_name = old_name.to_string_lossy().into_owned();
    let new_name = match &new_name {
        Ok(n) => n.to_string_lossy().into_owned(),
        Err(_) => old_name.clone(),
    };

    match outcome {
        Ok(()) => RenameResult::Renamed {
            directory,
            old_name,
            new_name,
        },
        Err(e) => {
            warn!(dir = %directory.display(), old = %old_name, error = %e, "rename failed");
            RenameResult::Failed {
                directory,
                old_name,
                new_name,
                message: e.to_string(),
            }
        }
    }
}

/// Renames `directory/old_name` to `directory/new_name`.
///
/// Refuses names that would leave `directory` (path separators, `.`, `..`,
/// empty) and never overwrites another existing entry.
fn rename_in_place(directory: &Path, old_name: &OsStr, new_name: &OsStr) -> io::Result<()> {
    if Path::new(new_name).file_name() != Some(new_name) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{}' is not a valid file name", new_name.to_string_lossy()),
        ));
    }

    let old_path = directory.join(old_name);
    let new_path = directory.join(new_name);

    if is_taken_by_other(&old_path, &new_path) {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("'{}' already exists", new_name.to_string_lossy()),
        ));
    }

    fs::rename(&old_path, &new_path)
}

/// Returns `true` when `new_path` exists and is not the entry at `old_path`.
///
/// A case-only rename on a case-insensitive filesystem finds the source file
/// itself at `new_path`; that is not a collision.
fn is_taken_by_other(old_path: &Path, new_path: &Path) -> bool {
    if new_path == old_path || fs::symlink_metadata(new_path).is_err() {
        return false;
    }
    !same_entry(old_path, new_path)
}

/// Whether both paths name the same filesystem entry, without following
/// symlinks.
#[cfg(unix)]
fn same_entry(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
        (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
        _ => false,
    }
}

/// Whether both paths name the same filesystem entry.
///
/// Without inode numbers, paths equal up to case are taken as the same entry,
/// matching the default case-insensitive filesystems on these platforms.
#[cfg(not(unix))]
fn same_entry(a: &Path, b: &Path) -> bool {
    a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
}
