//! Task and result types exchanged with agents.
//!
//! Serializes to the agent result contract:
//! - COMPLETED: `artifacts: [{parts: [{type: "text", text}]}]`
//! - otherwise: `status.message = {role: "agent", content: {text}}`

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::llm::types::TextContent;

/// Terminal state of a handled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    Completed,
    InputRequired,
    Failed,
    Error,
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskState::Completed => write!(f, "completed"),
            TaskState::InputRequired => write!(f, "input-required"),
            TaskState::Failed => write!(f, "failed"),
            TaskState::Error => write!(f, "error"),
        }
    }
}

/// A role-tagged text message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMessage {
    pub role: String,
    pub content: TextContent,
}

impl AgentMessage {
    pub fn new(role: &str, text: &str) -> Self {
        Self {
            role: role.to_string(),
            content: TextContent {
                text: text.to_string(),
            },
        }
    }
}

/// A single text part of an artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(rename = "type", default = "text_kind")]
    pub kind: String,
    pub text: String,
}

fn text_kind() -> String {
    "text".into()
}

/// Output of a completed task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub parts: Vec<Part>,
}

impl Artifact {
    pub fn text(text: &str) -> Self {
        Self {
            parts: vec![Part {
                kind: text_kind(),
                text: text.to_string(),
            }],
        }
    }
}

/// Status block: state plus an optional agent message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub state: TaskState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<AgentMessage>,
}

/// One request to an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub message: AgentMessage,
}

impl Task {
    /// A fresh user task with a random id.
    pub fn new(text: &str) -> Self {
        Self {
            id: format!("task-{}", uuid::Uuid::new_v4()),
            message: AgentMessage::new("user", text),
        }
    }

    pub fn text(&self) -> &str {
        &self.message.content.text
    }
}

/// What an agent hands back. Status is set exactly once, at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    #[serde(default)]
    pub id: String,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
}

impl TaskResult {
    pub fn completed(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            status: TaskStatus {
                state: TaskState::Completed,
                message: None,
            },
            artifacts: vec![Artifact::text(text)],
        }
    }

    pub fn input_required(id: &str, text: &str) -> Self {
        Self::with_message(id, TaskState::InputRequired, text)
    }

    pub fn failed(id: &str, text: &str) -> Self {
        Self::with_message(id, TaskState::Failed, text)
    }

    pub fn error(id: &str, text: &str) -> Self {
        Self::with_message(id, TaskState::Error, text)
    }

    fn with_message(id: &str, state: TaskState, text: &str) -> Self {
        Self {
            id: id.to_string(),
            status: TaskStatus {
                state,
                message: Some(AgentMessage::new("agent", text)),
            },
            artifacts: Vec::new(),
        }
    }

    pub fn state(&self) -> TaskState {
        self.status.state
    }

    /// The text a caller should show: the first artifact part when present,
    /// otherwise the status message.
    pub fn text(&self) -> &str {
        self.artifacts
            .first()
            .and_then(|a| a.parts.first())
            .map(|p| p.text.as_str())
            .or_else(|| self.status.message.as_ref().map(|m| m.content.text.as_str()))
            .unwrap_or("")
    }

    /// Read a result from a JSON reply, with or without a `result` wrapper.
    pub fn from_json(body: &Value) -> Option<Self> {
        let inner = body.get("result").unwrap_or(body);
        serde_json::from_value(inner.clone()).ok()
    }
}
