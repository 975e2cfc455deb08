//! Benchmark registry
//!
//! Holds the named performance checks an assessed system is expected to
//! meet. Every check owns its comparison direction (throughput targets
//! are floors, latency targets are ceilings) and optionally a measurement
//! source. Without a source the check reports `actual = 0` and fails:
//! the expected "not yet instrumented" state, not an error.

use crate::models::BenchmarkResult;

/// Comparison direction for a benchmark target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Pass when `actual >= target` (throughput, capacity).
    AtLeast,
    /// Pass when `actual <= target` (latency).
    AtMost,
}

impl Direction {
    pub fn passes(&self, actual: f64, target: f64) -> bool {
        match self {
            Direction::AtLeast => actual >= target,
            Direction::AtMost => actual <= target,
        }
    }
}

/// Pluggable per-benchmark measurement function.
pub type MeasurementSource = Box<dyn Fn() -> f64 + Send + Sync>;

struct BenchmarkSpec {
    name: String,
    target: f64,
    unit: String,
    direction: Direction,
    source: Option<MeasurementSource>,
    /// Free-text note carried into the result when no source is wired up.
    pending_note: String,
}

/// Ordered registry of performance checks.
#[derive(Default)]
pub struct BenchmarkRegistry {
    specs: Vec<BenchmarkSpec>,
}

impl BenchmarkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a check with no measurement source yet. `pending_note`
    /// explains what instrumentation is still missing.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        target: f64,
        unit: impl Into<String>,
        direction: Direction,
        pending_note: impl Into<String>,
    ) -> &mut Self {
        self.specs.push(BenchmarkSpec {
            name: name.into(),
            target,
            unit: unit.into(),
            direction,
            source: None,
            pending_note: pending_note.into(),
        });
        self
    }

    /// Register a check backed by a real measurement source.
    pub fn register_with_source(
        &mut self,
        name: impl Into<String>,
        target: f64,
        unit: impl Into<String>,
        direction: Direction,
        source: MeasurementSource,
    ) -> &mut Self {
        self.specs.push(BenchmarkSpec {
            name: name.into(),
            target,
            unit: unit.into(),
            direction,
            source: Some(source),
            pending_note: String::new(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Evaluate every registered check, in registration order.
    pub fn evaluate(&self) -> Vec<BenchmarkResult> {
        self.specs
            .iter()
            .map(|spec| match &spec.source {
                Some(measure) => {
                    let actual = measure();
                    BenchmarkResult {
                        name: spec.name.clone(),
                        target_value: spec.target,
                        actual_value: actual,
                        unit: spec.unit.clone(),
                        passed: spec.direction.passes(actual, spec.target),
                        details: String::new(),
                    }
                }
                None => BenchmarkResult {
                    name: spec.name.clone(),
                    target_value: spec.target,
                    actual_value: 0.0,
                    unit: spec.unit.clone(),
                    passed: false,
                    details: spec.pending_note.clone(),
                },
            })
            .collect()
    }

    /// The reference benchmark set for the assessed game-server project.
    /// None of the checks carries a measurement source yet.
    pub fn reference() -> Self {
        let mut registry = Self::new();
        registry
            .register(
                "actor message throughput",
                1_000_000.0,
                "msg/s",
                Direction::AtLeast,
                "actor system benchmark not yet implemented",
            )
            .register(
                "concurrent actor count",
                100_000.0,
                "actors",
                Direction::AtLeast,
                "actor concurrency benchmark not yet implemented",
            )
            .register(
                "network p99 latency",
                10.0,
                "ms",
                Direction::AtMost,
                "network benchmark not yet implemented",
            )
            .register(
                "rpc call latency",
                1.0,
                "ms",
                Direction::AtMost,
                "rpc benchmark not yet implemented",
            )
            .register(
                "database operation rate",
                100_000.0,
                "ops/s",
                Direction::AtLeast,
                "database benchmark not yet implemented",
            );
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_comparisons() {
        assert!(Direction::AtLeast.passes(1_000_000.0, 1_000_000.0));
        assert!(!Direction::AtLeast.passes(999_999.0, 1_000_000.0));
        assert!(Direction::AtMost.passes(9.5, 10.0));
        assert!(!Direction::AtMost.passes(10.1, 10.0));
    }

    #[test]
    fn test_unsourced_check_fails_even_with_ceiling_target() {
        // A latency ceiling would trivially pass at actual = 0; the
        // not-yet-instrumented state must still report failure.
        let mut registry = BenchmarkRegistry::new();
        registry.register("p99 latency", 10.0, "ms", Direction::AtMost, "pending");

        let results = registry.evaluate();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].actual_value, 0.0);
        assert!(!results[0].passed);
        assert_eq!(results[0].details, "pending");
    }

    #[test]
    fn test_sourced_check_uses_its_own_direction() {
        let mut registry = BenchmarkRegistry::new();
        registry
            .register_with_source(
                "throughput",
                100.0,
                "msg/s",
                Direction::AtLeast,
                Box::new(|| 150.0),
            )
            .register_with_source("latency", 10.0, "ms", Direction::AtMost, Box::new(|| 25.0));

        let results = registry.evaluate();
        assert!(results[0].passed);
        assert_eq!(results[0].actual_value, 150.0);
        assert!(!results[1].passed);
    }

    #[test]
    fn test_reference_set_shape() {
        let registry = BenchmarkRegistry::reference();
        let results = registry.evaluate();

        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| !r.passed));
        assert!(results.iter().all(|r| r.actual_value == 0.0));
        assert_eq!(results[0].name, "actor message throughput");
        assert_eq!(results[2].unit, "ms");
    }
}
