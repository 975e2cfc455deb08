//! Coverage estimation
//!
//! Assigns a coverage percentage to every existing module. The reference
//! strategy is deliberately coarse (has tests ⇒ fixed percentage, else 0)
//! and stands in for a real instrumentation integration; the
//! [`CoverageEstimator`] seam lets a precise measurement source replace it
//! without touching callers.

use crate::models::ModuleStatus;

/// Per-module coverage measurement source.
pub trait CoverageEstimator: Send + Sync {
    fn estimate(&self, module: &ModuleStatus) -> f64;
}

/// Binary estimate: a module with a test subtree is assumed to sit at a
/// fixed coverage level, everything else at zero.
pub struct FixedCoverageEstimator {
    when_tested: f64,
}

impl FixedCoverageEstimator {
    pub fn new(when_tested: f64) -> Self {
        Self { when_tested }
    }
}

impl CoverageEstimator for FixedCoverageEstimator {
    fn estimate(&self, module: &ModuleStatus) -> f64 {
        if module.has_tests {
            self.when_tested
        } else {
            0.0
        }
    }
}

/// Update `coverage_percent` in place for every module that exists.
pub fn apply(modules: &mut [ModuleStatus], estimator: &dyn CoverageEstimator) {
    for module in modules.iter_mut().filter(|m| m.exists) {
        module.coverage_percent = estimator.estimate(module);
    }
}
