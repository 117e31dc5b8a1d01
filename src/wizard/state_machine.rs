//! Current-step tracking and the transition rules between steps.
//!
//! `next`/`back` follow ordinal adjacency while `jump_to` is unconditional.
//! They are kept as separate transitions so sidebar review navigation is never
//! blocked by the linear rules.

use tracing::{debug, warn};

use super::form_model::FormModel;
use super::steps::{StepDefinition, StepId, StepRegistry, ValidationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// Back was requested on the first step.
    AtFirstStep,
    /// Next was requested on the terminal step.
    AtLastStep,
    /// Jump target is the step already shown.
    AlreadyCurrent,
    /// Jump target is not part of this wizard's registry.
    UnknownStep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Moved { from: StepId, to: StepId },
    Ignored(IgnoredReason),
}

impl NavOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, NavOutcome::Moved { .. })
    }
}

#[derive(Debug, Clone)]
pub struct WizardStateMachine {
    registry: &'static StepRegistry,
    current: usize,
    furthest_visited: usize,
}

impl Default for WizardStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardStateMachine {
    pub fn new() -> Self {
        Self::with_registry(StepRegistry::standard())
    }

    /// # Panics
    ///
    /// Panics if `registry` has no steps.
    pub fn with_registry(registry: &'static StepRegistry) -> Self {
        assert!(!registry.is_empty(), "wizard needs at least one step");
        Self {
            registry,
            current: 0,
            furthest_visited: 0,
        }
    }

    pub fn registry(&self) -> &'static StepRegistry {
        self.registry
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn furthest_visited(&self) -> usize {
        self.furthest_visited
    }

    pub fn current_definition(&self) -> &'static StepDefinition {
        let registry: &'static StepRegistry = self.registry;
        registry
            .get(self.current)
            .or_else(|| registry.get(registry.last_index()))
            .expect("step registry is never empty")
    }

    pub fn current_step(&self) -> StepId {
        self.current_definition().id
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current == self.registry.last_index()
    }

    /// Back affordance policy of the current step.
    pub fn can_go_back(&self) -> bool {
        self.current_definition().back_enabled
    }

    pub fn can_go_next(&self) -> bool {
        !self.is_last()
    }

    pub fn validate_current(&self, model: &FormModel) -> ValidationResult {
        self.current_definition().validate(model)
    }

    /// Advances one step. An invalid current step is logged, not blocked.
    pub fn next(&mut self, model: &FormModel) -> NavOutcome {
        if !self.can_go_next() {
            warn!(step = %self.current_step(), "next ignored on terminal step");
            return NavOutcome::Ignored(IgnoredReason::AtLastStep);
        }
        let validity = self.validate_current(model);
        if !validity.is_valid() {
            debug!(
                step = %self.current_step(),
                problems = validity.errors().len(),
                "advancing past incomplete step"
            );
        }
        let from = self.current_step();
        self.current += 1;
        self.furthest_visited = self.furthest_visited.max(self.current);
        let to = self.current_step();
        debug!(%from, %to, "next");
        NavOutcome::Moved { from, to }
    }

    pub fn back(&mut self) -> NavOutcome {
        if !self.can_go_back() {
            warn!(step = %self.current_step(), "back ignored on first step");
            return NavOutcome::Ignored(IgnoredReason::AtFirstStep);
        }
        let from = self.current_step();
        self.current -= 1;
        let to = self.current_step();
        debug!(%from, %to, "back");
        NavOutcome::Moved { from, to }
    }

    /// Sidebar navigation: always permitted, regardless of validity.
    pub fn jump_to(&mut self, step: StepId) -> NavOutcome {
        let Some(index) = self.registry.index_of(step) else {
            warn!(%step, "jump target not registered");
            return NavOutcome::Ignored(IgnoredReason::UnknownStep);
        };
        if index == self.current {
            debug!(%step, "jump to current step");
            return NavOutcome::Ignored(IgnoredReason::AlreadyCurrent);
        }
        let from = self.current_step();
        self.current = index;
        self.furthest_visited = self.furthest_visited.max(index);
        let to = self.current_step();
        debug!(%from, %to, "jump");
        NavOutcome::Moved { from, to }
    }

    /// Steps reachable from the sidebar. All of them, at any time.
    pub fn sidebar_targets(&self) -> Vec<StepId> {
        self.registry.iter().map(|step| step.id).collect()
    }
}
