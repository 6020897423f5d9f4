//! Startup banner text. Coloring is left to the caller.

pub fn banner_text(version: &str) -> String {
    format!("IRTlib: ReleaseNotesCompiler ({})\n", version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_contains_version() {
        assert_eq!(banner_text("0.1.0"), "IRTlib: ReleaseNotesCompiler (0.1.0)\n");
    }
}
