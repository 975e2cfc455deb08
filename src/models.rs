//! Core data models for gatecheck
//!
//! These models represent the assessed state of a project: per-module
//! status records, benchmark and scenario outcomes, and the root
//! `AssessmentResult` aggregate that the pipeline fills in stage by stage.

use serde::{Deserialize, Serialize};

/// The three fixed module categories an assessed project is expected to have.
///
/// Each group owns its ordered list of expected module names in
/// [`crate::config::AssessmentConfig`]; the group also selects the naming
/// convention used to resolve a module's expected location on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleGroup {
    Framework,
    Business,
    Support,
}

impl ModuleGroup {
    /// All groups in report order.
    pub const ALL: [ModuleGroup; 3] = [
        ModuleGroup::Framework,
        ModuleGroup::Business,
        ModuleGroup::Support,
    ];

    /// Human-readable group label for report headings.
    pub fn label(&self) -> &'static str {
        match self {
            ModuleGroup::Framework => "Framework",
            ModuleGroup::Business => "Business",
            ModuleGroup::Support => "Support",
        }
    }
}

impl std::fmt::Display for ModuleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleGroup::Framework => write!(f, "framework"),
            ModuleGroup::Business => write!(f, "business"),
            ModuleGroup::Support => write!(f, "support"),
        }
    }
}

/// Assessed state of a single expected module.
///
/// Created once by the module probe, then mutated in place by exactly two
/// later stages: the build verifier (sets `buildable`) and the coverage
/// estimator (sets `coverage_percent`). `buildable` is never true unless
/// `exists && has_manifest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleStatus {
    pub name: String,
    pub group: ModuleGroup,
    /// Opaque descriptor of where the module was looked for. For
    /// capability-detected modules this is `distributed` or `not_found`
    /// rather than a path.
    pub location_hint: String,
    #[serde(default)]
    pub exists: bool,
    #[serde(default)]
    pub has_manifest: bool,
    #[serde(default)]
    pub buildable: bool,
    #[serde(default)]
    pub has_tests: bool,
    #[serde(default)]
    pub coverage_percent: f64,
    /// One human-readable entry per detected deficiency, append-only.
    #[serde(default)]
    pub issues: Vec<String>,
}

impl ModuleStatus {
    pub fn new(
        name: impl Into<String>,
        group: ModuleGroup,
        location_hint: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            group,
            location_hint: location_hint.into(),
            exists: false,
            has_manifest: false,
            buildable: false,
            has_tests: false,
            coverage_percent: 0.0,
            issues: Vec::new(),
        }
    }

    /// A module counts toward completeness when it both exists and carries
    /// a build manifest. This is also the population the build verifier
    /// operates on.
    pub fn is_working(&self) -> bool {
        self.exists && self.has_manifest
    }
}

/// Outcome of one named performance check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub name: String,
    pub target_value: f64,
    pub actual_value: f64,
    pub unit: String,
    pub passed: bool,
    #[serde(default)]
    pub details: String,
}

/// Outcome of one named end-to-end scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub passed: bool,
}

/// Root aggregate for one assessment run.
///
/// Owned exclusively by a single pipeline run; stages mutate it
/// sequentially and it is immutable once the pipeline finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// One record per expected module across all groups, in probe order.
    pub modules: Vec<ModuleStatus>,
    pub benchmarks: Vec<BenchmarkResult>,
    /// Scenario outcomes in registration order.
    pub scenarios: Vec<ScenarioResult>,
    pub overall_score: f64,
    pub recommendations: Vec<String>,
    pub timestamp: String,
}

impl AssessmentResult {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            modules: Vec::new(),
            benchmarks: Vec::new(),
            scenarios: Vec::new(),
            overall_score: 0.0,
            recommendations: Vec::new(),
            timestamp: timestamp.into(),
        }
    }

    /// Modules belonging to one group, in probe order.
    pub fn modules_in(&self, group: ModuleGroup) -> impl Iterator<Item = &ModuleStatus> {
        self.modules.iter().filter(move |m| m.group == group)
    }

    /// Count of modules that exist with a manifest, across all groups.
    pub fn working_module_count(&self) -> usize {
        self.modules.iter().filter(|m| m.is_working()).count()
    }
}
