use std::collections::HashSet;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

// =============================================================================
// Output-related constants
// =============================================================================

/// Value shown for a component whose version could not be determined
pub const PLACEHOLDER: &str = r#"<span style="color:#999999;">N/A</span>"#;

/// Default path of the tab-separated version table.
/// The extension is `.csv` for compatibility with existing consumers.
pub const DEFAULT_TABLE_PATH: &str = "software_versions.csv";

/// Default log filter directive
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Built-in tools as (label, file, pattern), in report order
const BUILTIN_TOOLS: &[(&str, &str, &str)] = &[
    ("nf-openproblems", "v_pipeline.txt", r"(\S+)"),
    ("Nextflow", "v_nextflow.txt", r"(\S+)"),
    ("Python", "v_python.txt", r"Python (\S+)"),
    ("openproblems", "v_openproblems.txt", r"(\S+)"),
];

/// A component whose version is scraped from a file
#[derive(Debug, Clone)]
pub struct VersionSpec {
    /// Label shown in the report and table
    pub label: String,
    /// File to read, relative to the input directory
    pub file_path: PathBuf,
    /// Pattern with exactly one capture group holding the version
    pub pattern: Regex,
}

impl VersionSpec {
    pub fn new(
        label: impl Into<String>,
        file_path: impl Into<PathBuf>,
        pattern: &str,
    ) -> Result<Self, ConfigError> {
        let label = label.into();
        let pattern = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            label: label.clone(),
            source,
        })?;

        // captures_len counts the implicit whole-match group
        let found = pattern.captures_len() - 1;
        if found != 1 {
            return Err(ConfigError::CaptureGroups { label, found });
        }

        Ok(Self {
            label,
            file_path: file_path.into(),
            pattern,
        })
    }
}

/// Returns the built-in version specs in report order.
pub fn default_specs() -> Vec<VersionSpec> {
    BUILTIN_TOOLS
        .iter()
        .map(|(label, file, pattern)| {
            VersionSpec::new(*label, *file, pattern).expect("built-in pattern is valid")
        })
        .collect()
}

/// Extra tools loaded from a JSON file
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolsConfig {
    /// Drop the built-in tools and use only `tools`
    pub replace_defaults: bool,
    pub tools: Vec<ToolConfig>,
}

/// A single tool entry in the config file
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ToolConfig {
    pub label: String,
    pub file: PathBuf,
    pub pattern: String,
}

impl ToolsConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Build the ordered spec list from the built-ins and an optional config.
///
/// Configured tools follow the built-ins unless `replaceDefaults` is set.
/// Labels must be unique across the final list.
pub fn resolve_specs(config: Option<&ToolsConfig>) -> Result<Vec<VersionSpec>, ConfigError> {
    let Some(config) = config else {
        return Ok(default_specs());
    };

    let mut specs = if config.replace_defaults {
        Vec::new()
    } else {
        default_specs()
    };

    for tool in &config.tools {
        debug!("Adding tool {} from {:?}", tool.label, tool.file);
        specs.push(VersionSpec::new(&tool.label, &tool.file, &tool.pattern)?);
    }

    let mut seen = HashSet::new();
    for spec in &specs {
        if !seen.insert(spec.label.as_str()) {
            return Err(ConfigError::DuplicateLabel(spec.label.clone()));
        }
    }

    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn labels(specs: &[VersionSpec]) -> Vec<&str> {
        specs.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn default_specs_keep_builtin_order() {
        let specs = default_specs();

        assert_eq!(
            labels(&specs),
            vec!["nf-openproblems", "Nextflow", "Python", "openproblems"]
        );
        assert_eq!(specs[2].file_path, PathBuf::from("v_python.txt"));
        assert_eq!(specs[2].pattern.as_str(), r"Python (\S+)");
    }

    #[rstest]
    #[case(r"\S+", 0)]
    #[case(r"(\S+) (\S+)", 2)]
    fn version_spec_rejects_wrong_capture_group_count(
        #[case] pattern: &str,
        #[case] expected: usize,
    ) {
        let err = VersionSpec::new("tool", "v_tool.txt", pattern).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::CaptureGroups { ref label, found } if label == "tool" && found == expected
        ));
    }

    #[test]
    fn version_spec_accepts_non_capturing_groups() {
        let spec = VersionSpec::new("tool", "v_tool.txt", r"(?:version )?(\d+\.\d+)").unwrap();

        assert_eq!(spec.label, "tool");
    }

    #[test]
    fn version_spec_rejects_invalid_regex() {
        let err = VersionSpec::new("tool", "v_tool.txt", r"(\S+").unwrap_err();

        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn tools_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<ToolsConfig>(json!({
            "tools": [
                { "label": "samtools", "file": "v_samtools.txt", "pattern": "samtools (\\S+)" }
            ]
        }))
        .unwrap();

        assert!(!result.replace_defaults);
        assert_eq!(
            result.tools,
            vec![ToolConfig {
                label: "samtools".to_string(),
                file: PathBuf::from("v_samtools.txt"),
                pattern: r"samtools (\S+)".to_string(),
            }]
        );
    }

    #[test]
    fn tools_config_reads_replace_defaults_in_camel_case() {
        let result = serde_json::from_value::<ToolsConfig>(json!({
            "replaceDefaults": true,
            "tools": [
                { "label": "R", "file": "v_R.txt", "pattern": "R version (\\S+)" }
            ]
        }))
        .unwrap();

        assert!(result.replace_defaults);
        let specs = resolve_specs(Some(&result)).unwrap();
        assert_eq!(labels(&specs), vec!["R"]);
    }

    #[test]
    fn resolve_specs_without_config_returns_builtins() {
        let specs = resolve_specs(None).unwrap();

        assert_eq!(specs.len(), 4);
    }

    #[test]
    fn resolve_specs_appends_configured_tools_after_builtins() {
        let config = ToolsConfig {
            replace_defaults: false,
            tools: vec![ToolConfig {
                label: "samtools".to_string(),
                file: PathBuf::from("v_samtools.txt"),
                pattern: r"samtools (\S+)".to_string(),
            }],
        };

        let specs = resolve_specs(Some(&config)).unwrap();

        assert_eq!(
            labels(&specs),
            vec![
                "nf-openproblems",
                "Nextflow",
                "Python",
                "openproblems",
                "samtools"
            ]
        );
    }

    #[test]
    fn resolve_specs_replaces_builtins_when_requested() {
        let config = ToolsConfig {
            replace_defaults: true,
            tools: vec![ToolConfig {
                label: "R".to_string(),
                file: PathBuf::from("v_R.txt"),
                pattern: r"R version (\S+)".to_string(),
            }],
        };

        let specs = resolve_specs(Some(&config)).unwrap();

        assert_eq!(labels(&specs), vec!["R"]);
    }

    #[test]
    fn resolve_specs_rejects_duplicate_labels() {
        let config = ToolsConfig {
            replace_defaults: false,
            tools: vec![ToolConfig {
                label: "Python".to_string(),
                file: PathBuf::from("v_python3.txt"),
                pattern: r"(\S+)".to_string(),
            }],
        };

        let err = resolve_specs(Some(&config)).unwrap_err();

        assert!(matches!(err, ConfigError::DuplicateLabel(ref label) if label == "Python"));
    }

    #[test]
    fn load_reports_malformed_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tools.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ToolsConfig::load(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();

        let err = ToolsConfig::load(&dir.path().join("missing.json")).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
