//! Coding agent — Python code for trigonometric functions and identities.
//!
//! With a completion backend the code is generated by the LLM; without one
//! a built-in template is chosen.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::classify::{AgentRole, Classifier, Intent};
use super::prompts::{build_code_prompt, CODING_DESCRIPTION, CODING_HELP};
use super::templates::{fenced, select_template};
use super::{Agent, Task, TaskResult};
use crate::llm::{CompletionBackend, LlmError};
use crate::trig::IdentityCatalog;

/// Generates trigonometry code.
pub struct CodingAgent {
    name: String,
    description: String,
    classifier: Classifier,
    backend: Option<Arc<dyn CompletionBackend>>,
}

impl CodingAgent {
    /// Template-only agent.
    pub fn new(name: &str, catalog: Arc<IdentityCatalog>) -> Self {
        Self {
            name: name.to_string(),
            description: CODING_DESCRIPTION.to_string(),
            classifier: Classifier::new(AgentRole::Coding, catalog),
            backend: None,
        }
    }

    /// Generate through `backend` instead of templates.
    pub fn with_backend(mut self, backend: Arc<dyn CompletionBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Code-generation skill.
    pub async fn generate(&self, query: &str) -> Result<String, LlmError> {
        let query = query.trim().to_lowercase();
        match &self.backend {
            Some(backend) => backend.complete(&build_code_prompt(&query)).await,
            None => {
                let template = select_template(&query);
                info!("{} using '{}' template", self.name, template.name);
                Ok(fenced(template.code))
            }
        }
    }
}

#[async_trait]
impl Agent for CodingAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn handle(&self, task: Task) -> TaskResult {
        let text = task.text();
        info!("{} received task '{text}'", self.name);

        if self.classifier.classify(text) != Intent::GenerateCode {
            warn!("{} determined '{text}' is not a code request", self.name);
            return TaskResult::input_required(&task.id, CODING_HELP);
        }

        match self.generate(text).await {
            Ok(code) => TaskResult::completed(&task.id, &code),
            Err(e) => {
                warn!("{} generation failed: {e}", self.name);
                TaskResult::failed(&task.id, &e.error_text())
            }
        }
    }
}
