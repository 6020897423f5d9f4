//! Error types for the release notes pipeline
//!
//! Failures are grouped by the stage that produced them so the binary can
//! report a specific diagnostic and exit status. A broken or missing module
//! documentation file is not an error at this level: the config loader
//! recovers from it by writing the example configuration.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ReleaseNotesError {
    #[error("Run this inside of a version-controlled working copy. The '{tool}' command must be available in the current PATH. ({reason})")]
    VcsUnavailable { tool: String, reason: String },
    #[error("Version control query failed: {0}")]
    VcsQuery(String),
    #[error("Configuration file {path} could not be accessed: {reason}")]
    ConfigIo { path: PathBuf, reason: String },
    #[error("Configuration error: {0}")]
    ConfigParse(String),
    #[error("Rendering failed: {0}")]
    Render(String),
    #[error("I/O error: {0}")]
    Io(String),
}

/// Coarse classification of a failure as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Vcs,
    Config,
    Render,
}

impl ErrorKind {
    /// Process exit status for this kind. 1 stays reserved for usage errors.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Vcs => 2,
            ErrorKind::Config => 3,
            ErrorKind::Render => 4,
        }
    }
}

impl ReleaseNotesError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReleaseNotesError::VcsUnavailable { .. } | ReleaseNotesError::VcsQuery(_) => {
                ErrorKind::Vcs
            }
            ReleaseNotesError::ConfigIo { .. } | ReleaseNotesError::ConfigParse(_) => {
                ErrorKind::Config
            }
            ReleaseNotesError::Render(_) | ReleaseNotesError::Io(_) => ErrorKind::Render,
        }
    }
}

impl From<std::io::Error> for ReleaseNotesError {
    fn from(err: std::io::Error) -> Self {
        ReleaseNotesError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReleaseNotesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_map_to_distinct_exit_codes() {
        let vcs = ReleaseNotesError::VcsUnavailable {
            tool: "svn".to_string(),
            reason: "not found".to_string(),
        };
        let config = ReleaseNotesError::ConfigIo {
            path: PathBuf::from("RepositoryDocumentation.yaml"),
            reason: "read-only file system".to_string(),
        };
        let render = ReleaseNotesError::Render("font".to_string());

        assert_eq!(vcs.kind(), ErrorKind::Vcs);
        assert_eq!(config.kind(), ErrorKind::Config);
        assert_eq!(render.kind(), ErrorKind::Render);
        assert_eq!(ReleaseNotesError::Io("disk full".into()).kind(), ErrorKind::Render);

        let codes = [vcs.kind().exit_code(), config.kind().exit_code(), render.kind().exit_code()];
        assert_eq!(codes, [2, 3, 4]);
    }

    #[test]
    fn test_vcs_message_tells_operator_what_to_do() {
        let err = ReleaseNotesError::VcsUnavailable {
            tool: "svn".to_string(),
            reason: "E155007: not a working copy".to_string(),
        };
        let message = err.to_string();
        assert!(message.starts_with("Run this inside of a version-controlled working copy."));
        assert!(message.contains("'svn' command must be available in the current PATH"));
    }
}
