//! Agents — named handlers that turn a task into a task result.
//!
//! ## Layout
//!
//! - `task`: Task / TaskResult types and the result contract
//! - `classify`: keyword rule tables choosing a skill per query
//! - `math`: trigonometry agent (calculation + identity skills)
//! - `coding`: Python code-generation agent
//! - `remote`: proxy for an agent reachable over `/tasks/send`
//! - `prompts`, `templates`: fixed texts

pub mod classify;
pub mod coding;
pub mod math;
pub mod prompts;
pub mod remote;
pub mod task;
pub mod templates;

use async_trait::async_trait;

pub use coding::CodingAgent;
pub use math::TrigonometryAgent;
pub use remote::RemoteAgent;
pub use task::{Task, TaskResult, TaskState};

/// A named handler exposing one or more skills.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Registry name, as the router refers to it.
    fn name(&self) -> &str;

    /// What the agent is for, embedded in the routing prompt.
    fn description(&self) -> &str;

    /// Handle one task. Failures are reported through the result state.
    async fn handle(&self, task: Task) -> TaskResult;

    /// Liveness check. Local agents are always up.
    async fn ping(&self) -> Result<(), String> {
        Ok(())
    }

    /// Whether the agent lives in another process.
    fn is_remote(&self) -> bool {
        false
    }
}
