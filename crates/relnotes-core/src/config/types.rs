//! Module documentation types
//!
//! These mirror the YAML layout of `RepositoryDocumentation.yaml` one to one.
//! Keys are lower case with underscores, every list may be omitted, and
//! unknown keys are rejected so that a file written for a different schema is
//! treated as malformed instead of silently producing an empty report.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default = "default_project")]
    pub project: String,
    #[serde(default)]
    pub default_startup_parameters: Vec<ParameterDoc>,
    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project: default_project(),
            default_startup_parameters: Vec::new(),
            modules: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
    #[serde(default)]
    pub module_name: String,
    #[serde(default)]
    pub study: String,
    #[serde(default)]
    pub hot_key: String,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub startup_parameters: Vec<ParameterDoc>,
    #[serde(default)]
    pub interviewer_menu_documentation: Vec<InterviewerMenuDoc>,
    #[serde(default)]
    pub monitoring_variable_documentation: Vec<MonitoringVariableDoc>,
}

/// A command line parameter accepted by a module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterDoc {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterviewerMenuDoc {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub description: String,
}

/// A value the module writes to the monitoring file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitoringVariableDoc {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub var_type: String,
    #[serde(default)]
    pub description: String,
}

fn default_project() -> String {
    "TBA".to_string()
}
