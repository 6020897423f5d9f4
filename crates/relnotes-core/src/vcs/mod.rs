//! Version control metadata acquisition
//!
//! A backend answers two questions about a working copy: which revision
//! range is checked out (plus local modification and switch state), and
//! what the commit history looks like. Both Subversion and Git backends
//! shell out to the command line clients found on `PATH`.

pub mod git;
pub mod svn;

pub use git::GitClient;
pub use svn::SvnClient;

use crate::errors::{ReleaseNotesError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

const NO_MESSAGE: &str = "(no message)";

/// Revision span and local state of a working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRange {
    pub start: String,
    pub end: String,
    pub modified: bool,
    pub switched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub revision: String,
    pub author: String,
    pub message: String,
}

impl HistoryEntry {
    pub fn new(revision: impl Into<String>, author: impl Into<String>, message: Option<&str>) -> Self {
        Self {
            revision: revision.into(),
            author: author.into(),
            message: normalize_message(message),
        }
    }
}

/// Everything the report needs to know about the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySnapshot {
    pub repository: String,
    pub range: RevisionRange,
    /// In the order reported by the backend, usually newest first.
    pub history: Vec<HistoryEntry>,
}

/// Collapse blank lines in a commit message.
///
/// A single pass replaces each `"\n\n"` with `"\n"`, so three consecutive
/// newlines become two. Only an absent or empty message gets the
/// placeholder; whitespace is kept as committed.
pub fn normalize_message(message: Option<&str>) -> String {
    match message {
        None | Some("") => NO_MESSAGE.to_string(),
        Some(m) => m.replace("\r\n", "\n").replace("\n\n", "\n"),
    }
}

/// A version control system that can describe a working copy.
pub trait VersionControl {
    /// Name of the command line tool, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Repository identifier and revision range of the working copy at `dir`.
    fn revision_range(&self, dir: &Path) -> Result<(String, RevisionRange)>;

    /// Full commit history of the repository containing `dir`.
    fn history(&self, dir: &Path) -> Result<Vec<HistoryEntry>>;

    fn snapshot(&self, dir: &Path) -> Result<RepositorySnapshot> {
        let (repository, range) = self.revision_range(dir)?;
        let history = self.history(dir)?;
        log::info!(
            "{} working copy {} at {}:{} with {} history entries",
            self.name(),
            repository,
            range.start,
            range.end,
            history.len()
        );
        Ok(RepositorySnapshot {
            repository,
            range,
            history,
        })
    }
}

/// Which backend to query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VcsBackend {
    /// Subversion first, Git if the directory is not an SVN working copy.
    #[default]
    Auto,
    Svn,
    Git,
}

impl VersionControl for VcsBackend {
    fn name(&self) -> &'static str {
        match self {
            VcsBackend::Auto => "svn/git",
            VcsBackend::Svn => "svn",
            VcsBackend::Git => "git",
        }
    }

    fn revision_range(&self, dir: &Path) -> Result<(String, RevisionRange)> {
        match self {
            VcsBackend::Svn => SvnClient::new().revision_range(dir),
            VcsBackend::Git => GitClient::new().revision_range(dir),
            VcsBackend::Auto => SvnClient::new()
                .revision_range(dir)
                .or_else(|svn_err| GitClient::new().revision_range(dir).map_err(|_| svn_err)),
        }
    }

    fn history(&self, dir: &Path) -> Result<Vec<HistoryEntry>> {
        match self {
            VcsBackend::Svn => SvnClient::new().history(dir),
            VcsBackend::Git => GitClient::new().history(dir),
            VcsBackend::Auto => SvnClient::new()
                .history(dir)
                .or_else(|svn_err| GitClient::new().history(dir).map_err(|_| svn_err)),
        }
    }

    fn snapshot(&self, dir: &Path) -> Result<RepositorySnapshot> {
        snapshot_with(*self, dir)
    }
}

/// Take a snapshot of `dir` with the selected backend.
///
/// With `Auto`, a Subversion failure falls through to Git; if Git fails as
/// well the Subversion error is returned.
pub fn snapshot_with(backend: VcsBackend, dir: &Path) -> Result<RepositorySnapshot> {
    match backend {
        VcsBackend::Svn => SvnClient::new().snapshot(dir),
        VcsBackend::Git => GitClient::new().snapshot(dir),
        VcsBackend::Auto => match SvnClient::new().snapshot(dir) {
            Ok(snapshot) => Ok(snapshot),
            Err(svn_err) => {
                log::debug!("Subversion query failed, trying git: {}", svn_err);
                GitClient::new().snapshot(dir).map_err(|git_err| {
                    log::debug!("Git query failed: {}", git_err);
                    svn_err
                })
            }
        },
    }
}

/// Locate `tool` on `PATH`.
pub(crate) fn find_tool(tool: &str) -> Result<PathBuf> {
    which::which(tool).map_err(|e| ReleaseNotesError::VcsUnavailable {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}

/// Run a VCS command in `dir` and return its stdout.
///
/// A non-zero exit status is reported as `VcsUnavailable`, since the usual
/// cause is that `dir` is not a working copy of this system.
pub(crate) fn run_tool(tool: &str, program: &Path, args: &[&str], dir: &Path) -> Result<String> {
    log::debug!("Running {} {}", tool, args.join(" "));
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| ReleaseNotesError::VcsUnavailable {
            tool: tool.to_string(),
            reason: format!("Failed to run {}: {}", program.display(), e),
        })?;

    if !output.status.success() {
        return Err(ReleaseNotesError::VcsUnavailable {
            tool: tool.to_string(),
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    String::from_utf8(output.stdout)
        .map_err(|e| ReleaseNotesError::VcsQuery(format!("{} produced invalid UTF-8: {}", tool, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_newlines_are_collapsed() {
        assert_eq!(normalize_message(Some("line1\n\nline2")), "line1\nline2");
        assert_eq!(normalize_message(Some("a\n\n\nb")), "a\n\nb");
        assert_eq!(normalize_message(Some("a\r\n\r\nb")), "a\nb");
        assert_eq!(normalize_message(Some("single\nline")), "single\nline");
    }

    #[test]
    fn test_missing_message_placeholder() {
        assert_eq!(normalize_message(None), "(no message)");
        assert_eq!(normalize_message(Some("")), "(no message)");
    }

    #[test]
    fn test_whitespace_message_is_kept() {
        assert_eq!(normalize_message(Some("  \n")), "  \n");
        assert_eq!(normalize_message(Some(" ")), " ");
        assert_eq!(normalize_message(Some("\n\n")), "\n");
    }

    #[test]
    fn test_history_entry_normalizes() {
        let entry = HistoryEntry::new("5", "alice", Some("fix\n\nmore"));
        assert_eq!(entry.revision, "5");
        assert_eq!(entry.author, "alice");
        assert_eq!(entry.message, "fix\nmore");
    }

    struct FixedVcs;

    impl VersionControl for FixedVcs {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn revision_range(&self, _dir: &Path) -> Result<(String, RevisionRange)> {
            Ok((
                "https://svn.example.org/repo".to_string(),
                RevisionRange {
                    start: "4".to_string(),
                    end: "5".to_string(),
                    modified: false,
                    switched: false,
                },
            ))
        }

        fn history(&self, _dir: &Path) -> Result<Vec<HistoryEntry>> {
            Ok(vec![
                HistoryEntry::new("5", "alice", Some("fix")),
                HistoryEntry::new("4", "bob", Some("init")),
            ])
        }
    }

    #[test]
    fn test_snapshot_combines_both_queries() {
        let snapshot = FixedVcs.snapshot(Path::new(".")).unwrap();
        assert_eq!(snapshot.repository, "https://svn.example.org/repo");
        assert_eq!(snapshot.range.end, "5");
        let revisions: Vec<&str> = snapshot.history.iter().map(|h| h.revision.as_str()).collect();
        assert_eq!(revisions, vec!["5", "4"]);
    }
}
