//! Release notes document assembly
//!
//! Turns a repository snapshot and the module documentation into a
//! backend independent `Document`, plus the text of the running header
//! and footer that are stamped on every page after layout.

pub mod builder;
pub mod model;
pub mod notes;
pub mod overlay;

pub use builder::ReportBuilder;
pub use model::*;
pub use overlay::{page_footer, page_header};
