//! Module probing
//!
//! Determines, for every expected module, whether it exists on disk and
//! whether it follows the project's layout conventions (build manifest,
//! main-source subtree, test subtree). Probing never fails: a missing
//! module is the expected, common case and is recorded as an issue on the
//! returned status.
//!
//! Filesystem access goes through the [`FsProbe`] trait so tests (and any
//! non-local backend) can swap the collaborator out. Support capabilities
//! that are spread across the tree rather than living in one directory are
//! handled by the [`CapabilityDetector`] seam.

use std::path::Path;

use tracing::debug;

use crate::config::{AssessmentConfig, CapabilitySpec};
use crate::models::{ModuleGroup, ModuleStatus};

/// Boolean existence/type queries against the assessed tree. No content
/// is ever read through this interface.
pub trait FsProbe: Send + Sync {
    fn is_dir(&self, path: &Path) -> bool;
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the local filesystem.
pub struct RealFs;

impl FsProbe for RealFs {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Detects a capability that has no single expected directory.
///
/// The contract is a plain boolean: present somewhere under the root, or
/// not. Implementations own whatever heuristic they need.
pub trait CapabilityDetector: Send + Sync {
    fn name(&self) -> &str;
    fn detect(&self, project_root: &Path) -> bool;
}

/// Reference capability detector: walks the tree (gitignore-aware) and
/// matches lowercased directory paths against keyword clauses. A clause
/// matches when all of its keywords appear in one path; the capability is
/// present when any clause matches.
pub struct KeywordWalkDetector {
    spec: CapabilitySpec,
}

impl KeywordWalkDetector {
    pub fn new(spec: CapabilitySpec) -> Self {
        Self { spec }
    }
}

impl CapabilityDetector for KeywordWalkDetector {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn detect(&self, project_root: &Path) -> bool {
        let walker = ignore::WalkBuilder::new(project_root)
            .hidden(true)
            .git_ignore(true)
            .require_git(false)
            .build();

        for entry in walker.flatten() {
            if !entry.path().is_dir() {
                continue;
            }
            let path = entry.path().to_string_lossy().to_lowercase();
            for clause in &self.spec.clauses {
                if clause.iter().all(|kw| path.contains(kw.as_str())) {
                    debug!(capability = %self.spec.name, %path, "capability detected");
                    return true;
                }
            }
        }
        false
    }
}

/// Probes expected modules against one project root.
pub struct ModuleProbe<'a> {
    config: &'a AssessmentConfig,
    root: &'a Path,
    fs: &'a dyn FsProbe,
}

impl<'a> ModuleProbe<'a> {
    pub fn new(config: &'a AssessmentConfig, root: &'a Path, fs: &'a dyn FsProbe) -> Self {
        Self { config, root, fs }
    }

    /// Probe a directory-based module.
    ///
    /// Check order: directory exists (short-circuits everything else) →
    /// manifest file → main-source subtree (issue-only, no flag) → test
    /// subtree.
    pub fn probe(&self, group: ModuleGroup, name: &str) -> ModuleStatus {
        let location = self.config.expected_location(self.root, group, name);
        let mut status = ModuleStatus::new(name, group, location.display().to_string());

        if !self.fs.is_dir(&location) {
            status.issues.push("module directory missing".into());
            return status;
        }
        status.exists = true;

        let conventions = &self.config.conventions;
        status.has_manifest = self.fs.exists(&location.join(&conventions.manifest_file));
        if !status.has_manifest {
            status.issues.push("missing manifest file".into());
        }

        if !self.fs.is_dir(&location.join(&conventions.source_subtree)) {
            status
                .issues
                .push("missing conventional source layout".into());
        }

        status.has_tests = self.fs.is_dir(&location.join(&conventions.test_subtree));
        if !status.has_tests {
            status.issues.push("missing test code".into());
        }

        status
    }

    /// Probe a capability-detected support entry. Reports existence only;
    /// the location hint records whether the capability was found spread
    /// across the tree.
    pub fn probe_capability(&self, detector: &dyn CapabilityDetector) -> ModuleStatus {
        let found = detector.detect(self.root);
        let hint = if found { "distributed" } else { "not_found" };
        let mut status = ModuleStatus::new(detector.name(), ModuleGroup::Support, hint);
        status.exists = found;
        if !found {
            status
                .issues
                .push(format!("{} capability missing", detector.name()));
        }
        status
    }
}
