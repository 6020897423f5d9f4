//! Git backend
//!
//! Git has no global revision numbers, so the range runs from the root
//! commit to `HEAD` using abbreviated hashes. A detached `HEAD` counts as
//! switched.

use crate::errors::Result;
use crate::vcs::{find_tool, run_tool, HistoryEntry, RevisionRange, VersionControl};
use std::path::Path;
use std::process::Command;

const FIELD_SEP: char = '\u{1f}';
const RECORD_SEP: char = '\u{1e}';

#[derive(Debug, Default, Clone, Copy)]
pub struct GitClient;

impl GitClient {
    pub fn new() -> Self {
        Self
    }
}

impl VersionControl for GitClient {
    fn name(&self) -> &'static str {
        "git"
    }

    fn revision_range(&self, dir: &Path) -> Result<(String, RevisionRange)> {
        let git = find_tool("git")?;
        let git_out = |args: &[&str]| run_tool("git", &git, args, dir);

        let toplevel = git_out(&["rev-parse", "--show-toplevel"])?.trim().to_string();
        let repository = git_out(&["config", "--get", "remote.origin.url"])
            .map(|url| url.trim().to_string())
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or(toplevel);

        let roots = git_out(&["rev-list", "--max-parents=0", "--abbrev-commit", "HEAD"])?;
        let end = git_out(&["rev-parse", "--short", "HEAD"])?.trim().to_string();
        let start = roots
            .lines()
            .last()
            .map(|line| line.trim().to_string())
            .unwrap_or_else(|| end.clone());

        // untracked files (including our own output) do not count
        let modified = !git_out(&["status", "--porcelain", "--untracked-files=no"])?
            .trim()
            .is_empty();

        // symbolic-ref exits non-zero on a detached HEAD
        let switched = !Command::new(&git)
            .args(["symbolic-ref", "-q", "HEAD"])
            .current_dir(dir)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false);

        Ok((
            repository,
            RevisionRange {
                start,
                end,
                modified,
                switched,
            },
        ))
    }

    fn history(&self, dir: &Path) -> Result<Vec<HistoryEntry>> {
        let git = find_tool("git")?;
        let log = run_tool(
            "git",
            &git,
            &["log", "--format=%h%x1f%an%x1f%B%x1e"],
            dir,
        )?;
        Ok(parse_git_log(&log))
    }
}

/// Parse `git log --format=%h%x1f%an%x1f%B%x1e` output.
pub fn parse_git_log(output: &str) -> Vec<HistoryEntry> {
    output
        .split(RECORD_SEP)
        .filter_map(|record| {
            let record = record.trim_start_matches('\n');
            if record.is_empty() {
                return None;
            }
            let mut fields = record.splitn(3, FIELD_SEP);
            let revision = fields.next()?.trim();
            let author = fields.next().unwrap_or_default().trim();
            let message = fields.next().map(|m| m.trim_end());
            Some(HistoryEntry::new(revision, author, message))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(["-c", "user.name=Test", "-c", "user.email=test@example.org"])
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap()
            .status;
        assert!(status.success(), "git {:?} failed", args);
    }

    #[test]
    fn test_revision_range_tracks_local_state() {
        if which::which("git").is_err() {
            eprintln!("git not installed, skipping");
            return;
        }
        let dir = tempdir().unwrap();
        let wc = dir.path();
        git(wc, &["init", "-q"]);
        std::fs::write(wc.join("tracked.txt"), "one\n").unwrap();
        git(wc, &["add", "tracked.txt"]);
        git(wc, &["commit", "-q", "-m", "init"]);

        let (repository, clean) = GitClient::new().revision_range(wc).unwrap();
        assert!(!repository.is_empty());
        assert_eq!(clean.start, clean.end);
        assert!(!clean.modified);
        assert!(!clean.switched);

        std::fs::write(wc.join("ReleaseNotes.pdf"), "%PDF").unwrap();
        let (_, untracked) = GitClient::new().revision_range(wc).unwrap();
        assert!(!untracked.modified);

        std::fs::write(wc.join("tracked.txt"), "two\n").unwrap();
        let (_, edited) = GitClient::new().revision_range(wc).unwrap();
        assert!(edited.modified);

        git(wc, &["checkout", "-q", "--detach"]);
        let (_, detached) = GitClient::new().revision_range(wc).unwrap();
        assert!(detached.switched);
        assert!(detached.modified);
    }

    #[test]
    fn test_parse_git_log() {
        let output = "a1b2c3d\u{1f}Alice\u{1f}fix crash\n\nDetails here\n\u{1e}\n\
                      0f0f0f0\u{1f}Bob\u{1f}init\n\u{1e}\n";

        let history = parse_git_log(output);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].revision, "a1b2c3d");
        assert_eq!(history[0].author, "Alice");
        assert_eq!(history[0].message, "fix crash\nDetails here");
        assert_eq!(history[1], HistoryEntry::new("0f0f0f0", "Bob", Some("init")));
    }

    #[test]
    fn test_parse_git_log_empty_message() {
        let history = parse_git_log("abc1234\u{1f}Dana\u{1f}\n\u{1e}\n");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].message, "(no message)");
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_git_log("").is_empty());
        assert!(parse_git_log("\n").is_empty());
    }
}
