//! Assessment pipeline
//!
//! Orchestrates the full readiness assessment:
//! 1. Probe every expected module (parallel across modules)
//! 2. Verify the build once and propagate the outcome
//! 3. Estimate per-module coverage
//! 4. Evaluate benchmarks and scenarios
//! 5. Aggregate the weighted score and recommendations
//!
//! The pipeline is best-effort by design: no stage failure aborts the
//! run. Anything unexpected is caught once here, recorded as a synthetic
//! recommendation, and a report is still produced from whatever partial
//! state accumulated.

use std::path::Path;

use anyhow::Result;
use chrono::Local;
use rayon::prelude::*;
use tracing::{error, info};

use crate::benchmarks::BenchmarkRegistry;
use crate::build::{BuildVerifier, CommandBuildRunner};
use crate::config::AssessmentConfig;
use crate::coverage::{self, CoverageEstimator, FixedCoverageEstimator};
use crate::models::{AssessmentResult, ModuleGroup, ModuleStatus};
use crate::probe::{CapabilityDetector, FsProbe, KeywordWalkDetector, ModuleProbe, RealFs};
use crate::scenarios::ScenarioRegistry;
use crate::scoring;

/// Full assessment pipeline for one project root.
pub struct Pipeline {
    config: AssessmentConfig,
    fs: Box<dyn FsProbe>,
    build: Option<BuildVerifier>,
    coverage: Box<dyn CoverageEstimator>,
    capabilities: Vec<Box<dyn CapabilityDetector>>,
    benchmarks: BenchmarkRegistry,
    scenarios: ScenarioRegistry,
}

impl Pipeline {
    /// Create a pipeline with the reference collaborators: local
    /// filesystem probing, the configured build command, the fixed
    /// coverage estimator, keyword-walk capability detection, and the
    /// reference benchmark/scenario sets.
    pub fn new(config: AssessmentConfig) -> Self {
        let build = BuildVerifier::new(
            Box::new(CommandBuildRunner::new(config.build.command.clone())),
            config.build.timeout_secs,
        );
        let coverage = FixedCoverageEstimator::new(config.coverage.when_tested);
        let capabilities = config
            .capabilities
            .iter()
            .cloned()
            .map(|spec| Box::new(KeywordWalkDetector::new(spec)) as Box<dyn CapabilityDetector>)
            .collect();

        Self {
            config,
            fs: Box::new(RealFs),
            build: Some(build),
            coverage: Box::new(coverage),
            capabilities,
            benchmarks: BenchmarkRegistry::reference(),
            scenarios: ScenarioRegistry::reference(),
        }
    }

    /// Skip the build invocation entirely; `buildable` stays false for
    /// every module.
    pub fn without_build(mut self) -> Self {
        self.build = None;
        self
    }

    pub fn with_build_verifier(mut self, verifier: BuildVerifier) -> Self {
        self.build = Some(verifier);
        self
    }

    pub fn with_fs(mut self, fs: Box<dyn FsProbe>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_coverage_estimator(mut self, estimator: Box<dyn CoverageEstimator>) -> Self {
        self.coverage = estimator;
        self
    }

    pub fn with_capability_detectors(
        mut self,
        detectors: Vec<Box<dyn CapabilityDetector>>,
    ) -> Self {
        self.capabilities = detectors;
        self
    }

    pub fn with_benchmarks(mut self, registry: BenchmarkRegistry) -> Self {
        self.benchmarks = registry;
        self
    }

    pub fn with_scenarios(mut self, registry: ScenarioRegistry) -> Self {
        self.scenarios = registry;
        self
    }

    /// Run the full assessment. Never fails: scoring always runs over
    /// whatever the stages managed to accumulate, and a stage error is
    /// appended to the recommendations instead of propagated.
    pub fn run(&self, project_root: &Path) -> AssessmentResult {
        info!("starting readiness assessment of {}", project_root.display());
        let mut result =
            AssessmentResult::new(Local::now().format("%Y-%m-%d %H:%M:%S").to_string());

        let stage_error = self.run_stages(project_root, &mut result).err();

        let breakdown = scoring::aggregate(&result);
        result.overall_score = breakdown.overall;
        result.recommendations = breakdown.recommendations;
        if let Some(e) = stage_error {
            error!("assessment stage failed: {e:#}");
            result.recommendations.push(format!("assessment error: {e}"));
        }

        info!(
            "assessment finished, overall score {:.1}%",
            result.overall_score
        );
        result
    }

    fn run_stages(&self, project_root: &Path, result: &mut AssessmentResult) -> Result<()> {
        info!("probing expected modules");
        result.modules = self.probe_modules(project_root);

        match &self.build {
            Some(verifier) => {
                info!("verifying project build");
                verifier.verify(project_root, &mut result.modules);
            }
            None => info!("build verification skipped"),
        }

        info!("estimating test coverage");
        coverage::apply(&mut result.modules, self.coverage.as_ref());

        info!("evaluating {} benchmarks", self.benchmarks.len());
        result.benchmarks = self.benchmarks.evaluate();

        info!("evaluating {} scenarios", self.scenarios.len());
        result.scenarios = self.scenarios.evaluate();

        Ok(())
    }

    /// Probe all expected modules. Directory modules are independent of
    /// each other and probed in parallel; each worker owns a disjoint
    /// status record. Capability entries follow, in config order.
    fn probe_modules(&self, project_root: &Path) -> Vec<ModuleStatus> {
        let probe = ModuleProbe::new(&self.config, project_root, self.fs.as_ref());

        let jobs: Vec<(ModuleGroup, &str)> = ModuleGroup::ALL
            .iter()
            .flat_map(|&group| {
                self.config
                    .expected_names(group)
                    .iter()
                    .map(move |name| (group, name.as_str()))
            })
            .collect();

        let mut modules: Vec<_> = jobs
            .par_iter()
            .map(|&(group, name)| probe.probe(group, name))
            .collect();

        modules.extend(
            self.capabilities
                .iter()
                .map(|detector| probe.probe_capability(detector.as_ref())),
        );

        modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{BuildOutcome, BuildRunner};

    struct FixedBuild(BuildOutcome);
    impl BuildRunner for FixedBuild {
        fn run_build(&self, _root: &Path, _timeout_secs: u64) -> BuildOutcome {
            self.0.clone()
        }
    }

    fn empty_root_pipeline(outcome: BuildOutcome) -> Pipeline {
        Pipeline::new(AssessmentConfig::reference())
            .with_build_verifier(BuildVerifier::new(Box::new(FixedBuild(outcome)), 1))
    }

    #[test]
    fn test_empty_root_produces_full_result() {
        let dir = tempfile::tempdir().unwrap();
        let result = empty_root_pipeline(BuildOutcome::Succeeded).run(dir.path());

        // Every expected module appears in the result, none working
        assert_eq!(result.modules.len(), 24);
        assert!(result.modules.iter().all(|m| !m.exists));
        assert_eq!(result.working_module_count(), 0);
        assert_eq!(result.benchmarks.len(), 5);
        assert_eq!(result.scenarios.len(), 9);
        assert_eq!(result.overall_score, 0.0);
        assert_eq!(result.recommendations.len(), 5);
    }

    #[test]
    fn test_probe_order_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let first = empty_root_pipeline(BuildOutcome::Succeeded).run(dir.path());
        let second = empty_root_pipeline(BuildOutcome::Succeeded).run(dir.path());

        let names =
            |r: &AssessmentResult| r.modules.iter().map(|m| m.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&first), names(&second));
        assert_eq!(first.modules[0].name, "common");
        assert_eq!(first.modules.last().unwrap().name, "admin-console");
    }

    #[test]
    fn test_missing_modules_have_single_issue() {
        let dir = tempfile::tempdir().unwrap();
        let result = empty_root_pipeline(BuildOutcome::Succeeded).run(dir.path());

        for module in result.modules.iter().filter(|m| !m.exists) {
            assert_eq!(module.issues.len(), 1, "module {}", module.name);
            assert!(!module.has_manifest);
            assert!(!module.buildable);
            assert!(!module.has_tests);
        }
    }
}
