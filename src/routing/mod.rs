//! LLM routing — picks the downstream agent for a query.
//!
//! One completion call per query: the prompt lists the available agents,
//! the reply must be a single `agent_name|confidence` line. No retry, no
//! fallback agent. Confidence is advisory only; nothing gates on it.
//! Whether the named agent exists is checked by the caller at lookup.

use std::sync::Arc;

use tracing::{debug, info};

use crate::llm::{CompletionBackend, LlmError};

/// Default routing instructions, written for the two built-in agents.
pub const ROUTING_SYSTEM_PROMPT: &str = "\
You are a highly precise routing agent for a trigonometry assistant network. \
Route each user query to the most appropriate agent based on its intent.

ROUTING RULES:
1. Route to 'coding' ONLY IF the query explicitly asks for Python code generation:
   - Contains words: 'code', 'python', 'generate code', 'write code', 'script', 'function for', 'program'
   - Examples: 'code for sine calculation', 'python function for angle sum', 'write a script for tangent'
2. Route to 'trigonometry_math' for ALL other trigonometric queries:
   - Calculations: 'sine of 30 degrees', 'calculate tan 1.57 radians', 'what is cos(45)?'
   - Identities/Formulas: 'list basic identities', 'angle sum formulas', 'show double angle identities'
   - General questions: 'what are cofunction formulas?', 'tell me about reciprocal identities'

If unsure, default to 'trigonometry_math'. Only use 'coding' when code generation is explicitly requested.";

/// Name and description of a routable agent.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentDescriptor {
    pub name: String,
    pub description: String,
}

impl AgentDescriptor {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// The router's choice.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingDecision {
    pub agent_name: String,
    /// In `[0, 1]`.
    pub confidence: f64,
}

/// Errors from routing.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("routing call failed: {0}")]
    Completion(#[from] LlmError),

    #[error("malformed routing reply '{0}' (expected agent_name|confidence)")]
    MalformedReply(String),

    #[error("invalid confidence '{0}' in routing reply")]
    InvalidConfidence(String),

    #[error("routing confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f64),
}

/// Build the classification prompt for one query.
pub fn build_routing_prompt(system: &str, query: &str, agents: &[AgentDescriptor]) -> String {
    let mut prompt = system.to_string();

    prompt.push_str("\n\nAvailable agents:\n");
    for agent in agents {
        prompt.push_str(&format!("- {}: {}\n", agent.name, agent.description));
    }

    prompt.push_str(&format!("\nQuery: {query}\n\n"));
    prompt.push_str("Return your response in the format: agent_name|confidence_score");
    prompt
}

/// Parse `name|confidence`, split on the first `|`.
pub fn parse_routing_reply(reply: &str) -> Result<RoutingDecision, RoutingError> {
    let trimmed = reply.trim();
    let (name, confidence) = trimmed
        .split_once('|')
        .ok_or_else(|| RoutingError::MalformedReply(trimmed.to_string()))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(RoutingError::MalformedReply(trimmed.to_string()));
    }

    let confidence_str = confidence.trim();
    let confidence: f64 = confidence_str
        .parse()
        .map_err(|_| RoutingError::InvalidConfidence(confidence_str.to_string()))?;
    if !(0.0..=1.0).contains(&confidence) {
        return Err(RoutingError::ConfidenceOutOfRange(confidence));
    }

    Ok(RoutingDecision {
        agent_name: name.to_string(),
        confidence,
    })
}

/// Asks the completion backend which agent should take a query.
#[derive(Clone)]
pub struct Router {
    backend: Arc<dyn CompletionBackend>,
    system_prompt: String,
}

impl Router {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            system_prompt: ROUTING_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Replace the built-in routing instructions.
    pub fn with_system_prompt(mut self, system_prompt: &str) -> Self {
        self.system_prompt = system_prompt.to_string();
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Route a query among `agents`.
    pub async fn route(
        &self,
        query: &str,
        agents: &[AgentDescriptor],
    ) -> Result<RoutingDecision, RoutingError> {
        let prompt = build_routing_prompt(&self.system_prompt, query, agents);
        let reply = self.backend.complete(&prompt).await?;
        debug!("routing reply for '{query}': {reply:?}");

        let decision = parse_routing_reply(&reply)?;
        info!(
            "routed '{query}' to {} ({:.2})",
            decision.agent_name, decision.confidence
        );
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedBackend {
        reply: String,
        seen: Mutex<Option<String>>,
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            *self.seen.lock().unwrap() = Some(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    struct DownBackend;

    #[async_trait]
    impl CompletionBackend for DownBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Status {
                status: 503,
                body: String::new(),
            })
        }
    }

    fn agents() -> Vec<AgentDescriptor> {
        vec![
            AgentDescriptor::new("trigonometry_math", "calculations and identities"),
            AgentDescriptor::new("coding", "python code"),
        ]
    }

    // ── parse_routing_reply ──

    #[test]
    fn parses_name_and_confidence() {
        let d = parse_routing_reply("trigonometry_math|0.95").unwrap();
        assert_eq!(d.agent_name, "trigonometry_math");
        assert!((d.confidence - 0.95).abs() < 1e-12);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let d = parse_routing_reply("  coding | 1 \n").unwrap();
        assert_eq!(d.agent_name, "coding");
        assert_eq!(d.confidence, 1.0);
    }

    #[test]
    fn splits_on_first_pipe_only() {
        let err = parse_routing_reply("coding|0.5|extra").unwrap_err();
        assert!(matches!(err, RoutingError::InvalidConfidence(ref s) if s == "0.5|extra"));
    }

    #[test]
    fn rejects_missing_pipe() {
        let err = parse_routing_reply("coding").unwrap_err();
        assert!(matches!(err, RoutingError::MalformedReply(_)));
    }

    #[test]
    fn rejects_empty_name() {
        assert!(matches!(
            parse_routing_reply("|0.5").unwrap_err(),
            RoutingError::MalformedReply(_)
        ));
    }

    #[test]
    fn rejects_non_numeric_confidence() {
        assert!(matches!(
            parse_routing_reply("coding|high").unwrap_err(),
            RoutingError::InvalidConfidence(_)
        ));
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        for reply in ["coding|1.5", "coding|-0.1", "coding|NaN"] {
            assert!(
                matches!(
                    parse_routing_reply(reply).unwrap_err(),
                    RoutingError::ConfidenceOutOfRange(_)
                ),
                "{reply}"
            );
        }
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(parse_routing_reply("a|0").unwrap().confidence, 0.0);
        assert_eq!(parse_routing_reply("a|1.0").unwrap().confidence, 1.0);
    }

    // ── prompt ──

    #[test]
    fn prompt_lists_agents_and_query() {
        let prompt = build_routing_prompt("SYSTEM", "sine of 30 degrees", &agents());
        assert!(prompt.starts_with("SYSTEM"));
        assert!(prompt.contains("- trigonometry_math: calculations and identities"));
        assert!(prompt.contains("- coding: python code"));
        assert!(prompt.contains("Query: sine of 30 degrees"));
        assert!(prompt.ends_with("agent_name|confidence_score"));
    }

    // ── Router ──

    #[tokio::test]
    async fn route_uses_backend_reply() {
        let backend = Arc::new(ScriptedBackend {
            reply: "coding|0.8".into(),
            seen: Mutex::new(None),
        });
        let router = Router::new(backend.clone());
        let decision = router.route("code for sine", &agents()).await.unwrap();
        assert_eq!(decision.agent_name, "coding");

        let seen = backend.seen.lock().unwrap().clone().unwrap();
        assert!(seen.starts_with(ROUTING_SYSTEM_PROMPT));
        assert!(seen.contains("Query: code for sine"));
    }

    #[tokio::test]
    async fn route_does_not_validate_agent_name() {
        let backend = Arc::new(ScriptedBackend {
            reply: "astronomy|0.9".into(),
            seen: Mutex::new(None),
        });
        let decision = Router::new(backend).route("q", &agents()).await.unwrap();
        assert_eq!(decision.agent_name, "astronomy");
    }

    #[tokio::test]
    async fn custom_system_prompt() {
        let backend = Arc::new(ScriptedBackend {
            reply: "a|0.1".into(),
            seen: Mutex::new(None),
        });
        let router = Router::new(backend.clone()).with_system_prompt("Pick one.");
        router.route("q", &agents()).await.unwrap();
        assert!(backend
            .seen
            .lock()
            .unwrap()
            .as_deref()
            .unwrap()
            .starts_with("Pick one."));
    }

    #[tokio::test]
    async fn backend_failure_is_routing_error() {
        let err = Router::new(Arc::new(DownBackend))
            .route("q", &agents())
            .await
            .unwrap_err();
        assert!(matches!(err, RoutingError::Completion(_)));
        assert!(err.to_string().contains("status 503"));
    }
}
