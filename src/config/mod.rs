//! Assessment configuration
//!
//! Loads per-project settings from a `gatecheck.toml` file at the assessed
//! project root, falling back to the reference defaults when the file is
//! absent.
//!
//! # Configuration Format
//!
//! ```toml
//! # gatecheck.toml
//!
//! [modules]
//! framework = ["common", "network", "rpc"]
//! business = ["gateway", "login"]
//! support = ["launcher", "common"]
//!
//! [conventions]
//! framework_dir = "frame"
//! framework_prefix = "frame-"
//! business_dir = "business"
//! manifest_file = "pom.xml"
//! source_subtree = "src/main/java"
//! test_subtree = "src/test/java"
//!
//! [build]
//! command = ["mvn", "clean", "compile", "-q"]
//! timeout_secs = 300
//!
//! [coverage]
//! when_tested = 60.0
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::models::ModuleGroup;

/// Config file name looked up at the assessed project root.
pub const CONFIG_FILE: &str = "gatecheck.toml";

/// Errors from loading a project configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// A support capability that is not a single directory but a facility
/// spread across the tree (a test framework, an admin console). Detected
/// by keyword clauses: the capability is present when any clause has all
/// of its keywords appear in some path under the project root.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CapabilitySpec {
    pub name: String,
    pub clauses: Vec<Vec<String>>,
}

/// Directory and naming conventions of the assessed project.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Conventions {
    /// Directory holding framework modules.
    pub framework_dir: String,
    /// Name prefix for framework module directories.
    pub framework_prefix: String,
    /// Directory holding business modules.
    pub business_dir: String,
    /// Build manifest file expected inside each module.
    pub manifest_file: String,
    /// Conventional main-source subtree inside each module.
    pub source_subtree: String,
    /// Conventional test-source subtree inside each module.
    pub test_subtree: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            framework_dir: "frame".into(),
            framework_prefix: "frame-".into(),
            business_dir: "business".into(),
            manifest_file: "pom.xml".into(),
            source_subtree: "src/main/java".into(),
            test_subtree: "src/test/java".into(),
        }
    }
}

/// Build step settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BuildConfig {
    /// Command invoked once per run at the project root.
    pub command: Vec<String>,
    /// Hard timeout for the build invocation.
    pub timeout_secs: u64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            command: vec!["mvn".into(), "clean".into(), "compile".into(), "-q".into()],
            timeout_secs: 300,
        }
    }
}

/// Coverage estimation settings.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoverageConfig {
    /// Coverage percentage assumed for a module that has a test subtree.
    pub when_tested: f64,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self { when_tested: 60.0 }
    }
}

/// Expected module names, one ordered list per group.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExpectedModules {
    pub framework: Vec<String>,
    pub business: Vec<String>,
    /// Support modules probed as plain directories at the project root.
    pub support: Vec<String>,
}

impl Default for ExpectedModules {
    fn default() -> Self {
        Self {
            framework: to_strings(&[
                "common",
                "network",
                "rpc",
                "cache",
                "database",
                "actor",
                "ecs",
                "event",
                "config",
                "security",
                "monitor",
                "concurrent",
            ]),
            business: to_strings(&[
                "gateway", "login", "payment", "chat", "activity", "ranking", "logic", "scene",
            ]),
            support: to_strings(&["launcher", "common"]),
        }
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

/// Full assessment configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssessmentConfig {
    pub modules: ExpectedModules,
    pub conventions: Conventions,
    pub build: BuildConfig,
    pub coverage: CoverageConfig,
    /// Support capabilities detected by keyword walk instead of a
    /// directory probe.
    pub capabilities: Vec<CapabilitySpec>,
}

impl AssessmentConfig {
    /// Load configuration for a project root. Missing file means defaults;
    /// a present-but-broken file is an error the caller decides about.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        let path = project_root.join(CONFIG_FILE);
        if !path.exists() {
            debug!("no {} found, using reference defaults", CONFIG_FILE);
            return Ok(Self::reference());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let mut config: AssessmentConfig =
            toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })?;
        // A config file that does not mention capabilities keeps the
        // reference capability set rather than dropping the checks.
        if config.capabilities.is_empty() {
            config.capabilities = Self::reference_capabilities();
        }
        Ok(config)
    }

    /// The reference configuration: module lists, Maven conventions, and
    /// capability specs of the assessed game-server project.
    pub fn reference() -> Self {
        Self {
            capabilities: Self::reference_capabilities(),
            ..Self::default()
        }
    }

    fn reference_capabilities() -> Vec<CapabilitySpec> {
        vec![
            CapabilitySpec {
                name: "test-framework".into(),
                clauses: vec![vec!["test-framework".into()], vec!["testing".into()]],
            },
            CapabilitySpec {
                name: "admin-console".into(),
                clauses: vec![vec!["admin".into(), "console".into()]],
            },
        ]
    }

    /// Expected on-disk location for a directory-probed module.
    ///
    /// Framework modules live under a prefixed directory
    /// (`frame/frame-<name>`), business modules under a bare name
    /// (`business/<name>`), support modules directly at the root.
    pub fn expected_location(&self, root: &Path, group: ModuleGroup, name: &str) -> PathBuf {
        match group {
            ModuleGroup::Framework => root
                .join(&self.conventions.framework_dir)
                .join(format!("{}{}", self.conventions.framework_prefix, name)),
            ModuleGroup::Business => root.join(&self.conventions.business_dir).join(name),
            ModuleGroup::Support => root.join(name),
        }
    }

    /// Expected module names for one group, in probe order. Capability
    /// entries are not included; they are probed separately.
    pub fn expected_names(&self, group: ModuleGroup) -> &[String] {
        match group {
            ModuleGroup::Framework => &self.modules.framework,
            ModuleGroup::Business => &self.modules.business,
            ModuleGroup::Support => &self.modules.support,
        }
    }

    /// Total number of expected modules across all groups, including
    /// capability entries.
    pub fn total_expected(&self) -> usize {
        self.modules.framework.len()
            + self.modules.business.len()
            + self.modules.support.len()
            + self.capabilities.len()
    }
}
