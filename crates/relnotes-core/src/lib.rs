//! Release notes compiler for version-controlled module repositories.
//!
//! Combines the revision history of a working copy with a YAML description
//! of the modules it contains and renders a paginated PDF report.
//!
//! # Architecture Overview
//!
//! - **vcs**: revision range and commit history from Subversion or Git
//! - **config**: module documentation loading with example bootstrap
//! - **report**: backend independent document assembly
//! - **layout**: pagination, header/footer overlay and PDF output
//! - **pipeline**: the single blocking run tying the stages together

pub mod banner;
pub mod config;
pub mod errors;
pub mod layout;
pub mod pipeline;
pub mod report;
pub mod vcs;

pub use config::{ConfigLoader, ConfigOrigin, LoadedConfig, ProjectConfig};
pub use errors::{ErrorKind, ReleaseNotesError};
pub use layout::{DocumentWriter, LaidOutDocument, Paginator, PdfWriter};
pub use pipeline::{ReleaseNotesCompiler, RunOptions, RunSummary};
pub use vcs::{RepositorySnapshot, VcsBackend, VersionControl};
