//! Running header and footer text.

use crate::vcs::RepositorySnapshot;

pub const OVERLAY_FONT_SIZE: f32 = 10.0;

/// Header line for page `page` (1-based) of `total`.
pub fn page_header(snapshot: &RepositorySnapshot, page: usize, total: usize) -> String {
    format!(
        "Release Notes -- {} -- Revision {}/{} -- Page {} / {}",
        snapshot.repository, snapshot.range.start, snapshot.range.end, page, total
    )
}

pub fn page_footer(year: i32, project: &str) -> String {
    format!(
        "© 2009-{} by DIPF | Leibniz Institute for Research and Information in Education \nTBA (Center for Technology-Based Assessment) -- {}",
        year, project
    )
}
