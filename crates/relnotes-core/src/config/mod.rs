//! Module documentation configuration
//!
//! Project name, default startup parameters and per-module documentation are
//! read from a YAML file. A missing or broken file is replaced by a bundled
//! example so that the report can always be produced.

pub mod defaults;
pub mod loader;
pub mod types;

pub use defaults::*;
pub use loader::*;
pub use types::*;

use crate::errors::Result;
use std::path::Path;

/// Load the documentation file, bootstrapping it when necessary.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LoadedConfig> {
    ConfigLoader::load_or_bootstrap(path)
}
