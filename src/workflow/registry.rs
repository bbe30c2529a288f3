//! # Workflow Registry
//!
//! Named mapping from [`StepName`] to a step implementation. Pure composition
//! and lookup: the registry is built once by the composition root and read by
//! the orchestrator adapter; ordering and transition logic live in the
//! external orchestrator, never here.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::error::{Result, StepError};
use crate::workflow::types::{StepName, WorkflowStep};

/// Registry of the pipeline's named steps.
#[derive(Default)]
pub struct WorkflowRegistry {
    steps: HashMap<StepName, Arc<dyn WorkflowStep>>,
}

impl WorkflowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a step under a name, replacing any previous registration.
    pub fn register(&mut self, name: StepName, step: Arc<dyn WorkflowStep>) {
        info!(step = %name, "Registering workflow step");
        self.steps.insert(name, step);
    }

    /// Builder-style registration for composition roots.
    #[must_use]
    pub fn with_step(mut self, name: StepName, step: Arc<dyn WorkflowStep>) -> Self {
        self.register(name, step);
        self
    }

    /// Look up a step by name.
    pub fn get(&self, name: StepName) -> Result<Arc<dyn WorkflowStep>> {
        self.steps
            .get(&name)
            .cloned()
            .ok_or_else(|| StepError::NotFound(format!("workflow step {name}")))
    }

    /// Names with a registered implementation.
    pub fn registered_names(&self) -> Vec<StepName> {
        self.steps.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
