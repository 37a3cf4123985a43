//! Build configuration: ontology header, mapping rules, enabled steps and the
//! output file name.
//!
//! Every field is optional in a config file. A missing table falls back to
//! the built-in BODS v0.4 setting; a present `[rules]` table replaces the
//! built-in rules as a whole.
//!
//! ```toml
//! output = "bods-vocabulary-0.4.0.ttl"
//! steps = ["entity", "person"]
//!
//! [metadata]
//! label = "Beneficial Ownership Data Standard v0.4"
//!
//! [rules]
//! exclude = ["recordType"]
//! rename = ["names"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::builder::{BuildPlan, MappingStep, OntologyMetadata};
use crate::rules::{MappingRules, RulesError};

/// File name of the published vocabulary.
pub const DEFAULT_OUTPUT: &str = "bods-vocabulary-0.4.0.ttl";

/// Failure to load a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("reading {}: {source}", path.display())]
    Io {
        /// Config path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or has unknown keys.
    #[error("parsing {}: {source}", path.display())]
    Parse {
        /// Config path.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
    /// The rules in the file are inconsistent.
    #[error("{}: {source}", path.display())]
    Rules {
        /// Config path.
        path: PathBuf,
        /// Validation failure.
        #[source]
        source: RulesError,
    },
}

/// Everything that parameterises one vocabulary build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VocabConfig {
    /// Turtle output file name.
    pub output: String,
    /// Ontology header.
    pub metadata: OntologyMetadata,
    /// Property mapping rules.
    pub rules: MappingRules,
    /// Enabled steps. Empty means every step.
    pub steps: Vec<MappingStep>,
}

impl Default for VocabConfig {
    fn default() -> Self {
        Self {
            output: DEFAULT_OUTPUT.to_string(),
            metadata: OntologyMetadata::default(),
            rules: MappingRules::bods(),
            steps: Vec::new(),
        }
    }
}

impl VocabConfig {
    /// Parses a TOML config and validates its rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Rules`] if the rules do not validate. `path` is only used
    /// to label the error.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.rules.validate().map_err(|source| ConfigError::Rules {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise see
    /// [`VocabConfig::from_toml`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text, path)?;
        debug!(path = %path.display(), steps = config.steps.len(), "config loaded");
        Ok(config)
    }

    /// The build plan for the configured steps.
    #[must_use]
    pub fn plan(&self) -> BuildPlan {
        if self.steps.is_empty() {
            BuildPlan::full()
        } else {
            BuildPlan::select(self.steps.iter().copied())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_the_builtin_config() {
        let config = VocabConfig::from_toml("", Path::new("empty.toml"));
        assert_eq!(config.ok(), Some(VocabConfig::default()));
    }

    #[test]
    fn partial_metadata_keeps_defaults() {
        let config = VocabConfig::from_toml(
            "[metadata]\nlabel = \"Test vocabulary\"\n",
            Path::new("meta.toml"),
        )
        .unwrap_or_default();
        assert_eq!(config.metadata.label, "Test vocabulary");
        assert_eq!(config.metadata.iri, OntologyMetadata::default().iri);
        assert_eq!(config.output, DEFAULT_OUTPUT);
    }

    #[test]
    fn steps_select_a_plan() {
        let config = VocabConfig::from_toml(
            "steps = [\"relationship\"]\n",
            Path::new("steps.toml"),
        )
        .unwrap_or_default();
        assert_eq!(
            config.plan().steps(),
            &[MappingStep::RecordDetails, MappingStep::Relationship]
        );
        assert_eq!(VocabConfig::default().plan(), BuildPlan::full());
    }

    #[test]
    fn unknown_keys_and_bad_rules_are_rejected() {
        let unknown = VocabConfig::from_toml("outptu = \"x.ttl\"\n", Path::new("typo.toml"));
        assert!(matches!(unknown, Err(ConfigError::Parse { .. })));

        let bad = VocabConfig::from_toml("[rules]\nrename = [\"name\"]\n", Path::new("bad.toml"));
        assert!(matches!(bad, Err(ConfigError::Rules { .. })));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir();
        assert!(dir.is_ok());
        let Ok(dir) = dir else { return };
        let path = dir.path().join("vocab.toml");
        assert!(fs::write(&path, "output = \"custom.ttl\"\n").is_ok());
        let config = VocabConfig::load(&path);
        assert_eq!(config.map(|c| c.output).ok().as_deref(), Some("custom.ttl"));

        let missing = VocabConfig::load(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
