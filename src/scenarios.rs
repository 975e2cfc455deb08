//! Scenario registry
//!
//! Named end-to-end scenarios with boolean outcomes. Each scenario may
//! carry a verification hook; without one the outcome defaults to false,
//! meaning "not yet verified".

use crate::models::ScenarioResult;

/// Pluggable per-scenario verification function.
pub type ScenarioVerifier = Box<dyn Fn() -> bool + Send + Sync>;

/// Ordered registry of end-to-end scenarios.
#[derive(Default)]
pub struct ScenarioRegistry {
    entries: Vec<(String, Option<ScenarioVerifier>)>,
}

impl ScenarioRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scenario with no verification hook.
    pub fn register(&mut self, name: impl Into<String>) -> &mut Self {
        self.entries.push((name.into(), None));
        self
    }

    /// Register a scenario backed by a verification hook.
    pub fn register_with_verifier(
        &mut self,
        name: impl Into<String>,
        verifier: ScenarioVerifier,
    ) -> &mut Self {
        self.entries.push((name.into(), Some(verifier)));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evaluate every scenario, in registration order.
    pub fn evaluate(&self) -> Vec<ScenarioResult> {
        self.entries
            .iter()
            .map(|(name, verifier)| ScenarioResult {
                name: name.clone(),
                passed: verifier.as_ref().map(|v| v()).unwrap_or(false),
            })
            .collect()
    }

    /// The reference scenario set for the assessed game-server project.
    pub fn reference() -> Self {
        let mut registry = Self::new();
        for name in [
            "player login flow",
            "chat flow",
            "payment flow",
            "login storm load",
            "scene stress",
            "activity peak load",
            "service failure injection",
            "network partition injection",
            "data consistency check",
        ] {
            registry.register(name);
        }
        registry
    }
}
