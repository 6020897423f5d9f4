//! Built-in example module documentation
//!
//! Written to disk whenever the configured documentation file is missing or
//! unreadable, so the operator gets a template to edit and the next run
//! finds a valid file.

use crate::config::loader::ConfigLoader;
use crate::config::types::ProjectConfig;
use crate::errors::Result;

/// Raw YAML of the example configuration.
pub const EXAMPLE_CONFIG_YAML: &str = include_str!("example_config.yaml");

/// Parse the bundled example into a `ProjectConfig`.
pub fn example_config() -> Result<ProjectConfig> {
    ConfigLoader::from_str(EXAMPLE_CONFIG_YAML)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_parses() {
        let config = example_config().unwrap();
        assert_eq!(config.project, "NEPS/TBT");
        assert_eq!(config.default_startup_parameters.len(), 3);
        assert_eq!(config.default_startup_parameters[0].name, "/AutoLoginUserName");

        let names: Vec<&str> = config.modules.iter().map(|m| m.module_name.as_str()).collect();
        assert_eq!(names, vec!["DGCF_BZT", "DGCF_MAT", "ELFE_MP", "MATHE_MP", "PPVT_MP"]);
    }

    #[test]
    fn test_example_module_details() {
        let config = example_config().unwrap();

        for module in &config.modules {
            assert_eq!(module.study, "B155");
            assert_eq!(module.hot_key, "Strg+Shift + X");
            assert_eq!(module.interviewer_menu_documentation.len(), 1);
            assert_eq!(module.interviewer_menu_documentation[0].password, "dipf");
        }

        let mathe = &config.modules[3];
        assert_eq!(mathe.monitoring_variable_documentation.len(), 3);
        assert!(mathe
            .monitoring_variable_documentation
            .iter()
            .all(|v| !v.name.contains("PPVT")));

        let ppvt = &config.modules[4];
        assert_eq!(ppvt.monitoring_variable_documentation.len(), 3);
        assert_eq!(ppvt.monitoring_variable_documentation[2].name, "h_dauerPPVTMetaP");
        assert_eq!(ppvt.startup_parameters.len(), 1);
        assert_eq!(ppvt.startup_parameters[0].name, "/Alter");

        assert!(config.modules[..4].iter().all(|m| m.startup_parameters.is_empty()));
    }
}
