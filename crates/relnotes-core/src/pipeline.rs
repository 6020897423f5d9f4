//! End-to-end release notes compilation
//!
//! One blocking run: query the working copy, load (or bootstrap) the module
//! documentation, build and paginate the report, stamp headers and footers,
//! and write the output file.

use crate::config::{load_config, ConfigOrigin};
use crate::errors::Result;
use crate::layout::{DocumentWriter, PageGeometry, Paginator};
use crate::report::{page_footer, page_header, ReportBuilder};
use crate::vcs::VersionControl;
use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_FILE: &str = "ReleaseNotes.pdf";
pub const DEFAULT_CONFIG_FILE: &str = "RepositoryDocumentation.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub target_dir: PathBuf,
    pub output_file: PathBuf,
    pub config_file: PathBuf,
}

impl RunOptions {
    /// Fill in missing paths relative to `base_dir`.
    ///
    /// The working copy defaults to `base_dir` itself, the output and
    /// configuration files to fixed names inside it.
    pub fn resolve(
        base_dir: &Path,
        target_dir: Option<PathBuf>,
        output_file: Option<PathBuf>,
        config_file: Option<PathBuf>,
    ) -> Self {
        Self {
            target_dir: target_dir.unwrap_or_else(|| base_dir.to_path_buf()),
            output_file: output_file.unwrap_or_else(|| base_dir.join(DEFAULT_OUTPUT_FILE)),
            config_file: config_file.unwrap_or_else(|| base_dir.join(DEFAULT_CONFIG_FILE)),
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub pages: usize,
    pub sections: usize,
    pub modules: usize,
    pub history_entries: usize,
    pub config_origin: ConfigOrigin,
}

pub struct ReleaseNotesCompiler<V, W> {
    vcs: V,
    writer: W,
    geometry: PageGeometry,
}

impl<V: VersionControl, W: DocumentWriter> ReleaseNotesCompiler<V, W> {
    pub fn new(vcs: V, writer: W) -> Self {
        Self {
            vcs,
            writer,
            geometry: PageGeometry::a4(),
        }
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn run(&self, options: &RunOptions) -> Result<RunSummary> {
        log::info!("Querying {} working copy {}", self.vcs.name(), options.target_dir.display());
        let snapshot = self.vcs.snapshot(&options.target_dir)?;

        log::info!("Loading module documentation from {}", options.config_file.display());
        let loaded = load_config(&options.config_file)?;
        let config = loaded.config;

        let document = ReportBuilder::new(&snapshot, &config).build();
        let mut laid_out = Paginator::new(self.geometry).layout(&document);

        let year = Local::now().year();
        laid_out.apply_overlay(
            |page, total| page_header(&snapshot, page, total),
            |_, _| page_footer(year, &config.project),
        );

        log::info!(
            "Rendering {} sections on {} pages to {}",
            document.sections.len(),
            laid_out.page_count(),
            options.output_file.display()
        );
        self.writer.write(&laid_out, &options.output_file)?;

        Ok(RunSummary {
            pages: laid_out.page_count(),
            sections: document.sections.len(),
            modules: config.modules.len(),
            history_entries: snapshot.history.len(),
            config_origin: loaded.origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults_beside_base_dir() {
        let base = Path::new("/opt/relnotes");
        let options = RunOptions::resolve(base, None, None, None);
        assert_eq!(options.target_dir, PathBuf::from("/opt/relnotes"));
        assert_eq!(options.output_file, PathBuf::from("/opt/relnotes/ReleaseNotes.pdf"));
        assert_eq!(
            options.config_file,
            PathBuf::from("/opt/relnotes/RepositoryDocumentation.yaml")
        );
    }

    #[test]
    fn test_resolve_keeps_explicit_paths() {
        let options = RunOptions::resolve(
            Path::new("/opt/relnotes"),
            Some(PathBuf::from("/src/wc")),
            Some(PathBuf::from("out.pdf")),
            None,
        );
        assert_eq!(options.target_dir, PathBuf::from("/src/wc"));
        assert_eq!(options.output_file, PathBuf::from("out.pdf"));
        assert_eq!(
            options.config_file,
            PathBuf::from("/opt/relnotes/RepositoryDocumentation.yaml")
        );
    }
}
