//! Trigonometry agent — calculation and identity skills.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::classify::{AgentRole, Classifier, Intent};
use super::prompts::{
    ANGLE_GUIDANCE, ANGLE_RANGE_ERROR, CODE_REJECTION, FUNCTION_GUIDANCE,
    TRIGONOMETRY_DESCRIPTION, TRIGONOMETRY_HELP,
};
use super::{Agent, Task, TaskResult};
use crate::trig::{evaluate, parse_angle, IdentityCatalog, TrigFunction};

/// Answers calculation and identity queries locally.
pub struct TrigonometryAgent {
    name: String,
    description: String,
    catalog: Arc<IdentityCatalog>,
    classifier: Classifier,
}

impl TrigonometryAgent {
    pub fn new(name: &str, catalog: Arc<IdentityCatalog>) -> Self {
        Self::with_description(name, TRIGONOMETRY_DESCRIPTION, catalog)
    }

    pub fn with_description(name: &str, description: &str, catalog: Arc<IdentityCatalog>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            classifier: Classifier::new(AgentRole::Trigonometry, catalog.clone()),
            catalog,
        }
    }

    /// Calculation skill.
    pub fn calculate(&self, query: &str) -> String {
        let query = query.trim().to_lowercase();
        debug!("calculating '{query}'");

        let Some(angle) = parse_angle(&query) else {
            return ANGLE_GUIDANCE.to_string();
        };
        if !angle.radians.is_finite() {
            warn!("angle in '{query}' is out of range");
            return ANGLE_RANGE_ERROR.to_string();
        }
        let Some(function) = TrigFunction::resolve(&query) else {
            return FUNCTION_GUIDANCE.to_string();
        };
        evaluate(function, angle)
    }

    /// Identity skill.
    pub fn identities(&self, query: &str) -> String {
        let query = query.trim().to_lowercase();
        debug!("looking up identities for '{query}'");
        self.catalog.lookup(&query).join("\n")
    }
}

#[async_trait]
impl Agent for TrigonometryAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn handle(&self, task: Task) -> TaskResult {
        let text = task.text();
        info!("{} received task '{text}'", self.name);

        match self.classifier.classify(text) {
            Intent::RejectAsCode => {
                warn!("{} rejecting code request '{text}'", self.name);
                TaskResult::input_required(&task.id, CODE_REJECTION)
            }
            Intent::Calculation | Intent::AmbiguousPreferCalculation => {
                TaskResult::completed(&task.id, &self.calculate(text))
            }
            Intent::Identity | Intent::AmbiguousPreferIdentity => {
                TaskResult::completed(&task.id, &self.identities(text))
            }
            Intent::GenerateCode | Intent::Unrecognized => {
                warn!("{} cannot handle '{text}', asking for input", self.name);
                TaskResult::input_required(&task.id, TRIGONOMETRY_HELP)
            }
        }
    }
}
