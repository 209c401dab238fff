use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// One classification rule: a label and the substrings that trigger it.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelRule {
    pub label: String,
    pub triggers: Vec<String>,
}

/// Label-rule tables loaded from YAML.
///
/// Classification rules are data, not code: `keyword` rules tag topical
/// content (model names, tooling, subjects), `style` rules tag how the
/// title is phrased (question, comparison, hands-on, ...). An article
/// title may match any number of rules from either group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelRules {
    #[serde(default)]
    pub keyword: Vec<LabelRule>,
    #[serde(default)]
    pub style: Vec<LabelRule>,
}

/// Load and validate label rules from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_labels(path: &Path) -> Result<LabelRules, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LabelsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let rules: LabelRules = serde_yaml::from_str(&content)?;

    validate_labels(&rules)?;

    Ok(rules)
}

fn validate_labels(rules: &LabelRules) -> Result<(), ConfigError> {
    validate_group("keyword", &rules.keyword)?;
    validate_group("style", &rules.style)?;
    Ok(())
}

fn validate_group(group: &str, rules: &[LabelRule]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for rule in rules {
        if rule.label.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{group} rule has an empty label"
            )));
        }

        if rule.triggers.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{group} rule '{}' has no triggers",
                rule.label
            )));
        }

        if rule.triggers.iter().any(|t| t.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "{group} rule '{}' has an empty trigger",
                rule.label
            )));
        }

        if !seen.insert(rule.label.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate {group} label: '{}'",
                rule.label
            )));
        }
    }

    Ok(())
}
