//! Agent network — the registry plus the per-query pipeline.
//!
//! route → lookup → handle → optional summary. The routing call and the
//! agent call each run in a spawned task bounded by a timeout; a timed-out
//! task is aborted and the query fails on its own without touching the
//! next one.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use crate::agent::prompts::build_summary_prompt;
use crate::agent::{Agent, CodingAgent, RemoteAgent, Task, TaskResult, TaskState, TrigonometryAgent};
use crate::config::{AgentKind, NetworkConfig};
use crate::llm::{CompletionBackend, CompletionClient, LlmError};
use crate::routing::{AgentDescriptor, Router, RoutingDecision, RoutingError};
use crate::trig::IdentityCatalog;

/// Default bound on the routing and agent tasks.
pub const TASK_TIMEOUT: Duration = Duration::from_secs(45);

/// Per-query and registry errors.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error("agent '{0}' not found")]
    UnknownAgent(String),

    #[error("agent '{0}' is already registered")]
    DuplicateAgent(String),

    #[error("remote agent '{0}' has no url")]
    MissingUrl(String),

    #[error("{stage} timed out after {after:?}")]
    Timeout { stage: &'static str, after: Duration },

    #[error("{stage} task failed: {source}")]
    Worker {
        stage: &'static str,
        #[source]
        source: JoinError,
    },
}

/// Everything produced for one query.
#[derive(Debug)]
pub struct QueryOutcome {
    pub decision: RoutingDecision,
    pub result: TaskResult,
    /// Present only when summaries are on and the task completed.
    pub summary: Option<Result<String, LlmError>>,
}

/// Reachability of one health-check entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Health {
    Online,
    Offline(String),
    Local,
}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Health::Online => write!(f, "online"),
            Health::Offline(reason) => write!(f, "offline ({reason})"),
            Health::Local => write!(f, "local"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthEntry {
    pub name: String,
    pub health: Health,
}

/// Wait on a spawned task for at most `after`, aborting it on expiry.
async fn join_bounded<T>(
    mut handle: JoinHandle<T>,
    after: Duration,
    stage: &'static str,
) -> Result<Result<T, JoinError>, NetworkError> {
    match tokio::time::timeout(after, &mut handle).await {
        Ok(joined) => Ok(joined),
        Err(_) => {
            handle.abort();
            warn!("{stage} task aborted after {after:?}");
            Err(NetworkError::Timeout { stage, after })
        }
    }
}

/// Registered agents and the router that chooses among them.
pub struct AgentNetwork {
    agents: Vec<Arc<dyn Agent>>,
    router: Router,
    llm: Option<CompletionClient>,
    summarizer: Option<Arc<dyn CompletionBackend>>,
    routing_timeout: Duration,
    agent_timeout: Duration,
}

impl AgentNetwork {
    /// Empty network.
    pub fn new(router: Router) -> Self {
        Self {
            agents: Vec::new(),
            router,
            llm: None,
            summarizer: None,
            routing_timeout: TASK_TIMEOUT,
            agent_timeout: TASK_TIMEOUT,
        }
    }

    /// Build the network a config describes. Local agents share one
    /// identity catalog; the router and LLM-backed agents share one client.
    pub fn from_config(config: &NetworkConfig) -> Result<Self, NetworkError> {
        let client = CompletionClient::with_timeouts(
            config.llm.host.clone(),
            config.llm.generation_timeout(),
            config.llm.ping_timeout(),
        );
        let backend: Arc<dyn CompletionBackend> = Arc::new(client.clone());

        let mut router = Router::new(backend.clone());
        if let Some(prompt) = &config.routing.system_prompt {
            router = router.with_system_prompt(prompt);
        }

        let mut network = Self::new(router)
            .with_timeouts(config.routing.timeout(), config.routing.timeout());
        network.llm = Some(client);

        let catalog = Arc::new(IdentityCatalog::standard());
        for entry in &config.agents {
            let agent: Arc<dyn Agent> = match entry.kind {
                AgentKind::Trigonometry => Arc::new(TrigonometryAgent::with_description(
                    &entry.name,
                    entry.description(),
                    catalog.clone(),
                )),
                AgentKind::Coding => {
                    let mut agent = CodingAgent::new(&entry.name, catalog.clone())
                        .with_description(entry.description());
                    if entry.use_llm {
                        agent = agent.with_backend(backend.clone());
                    }
                    Arc::new(agent)
                }
                AgentKind::Remote => {
                    let url = entry
                        .url
                        .clone()
                        .ok_or_else(|| NetworkError::MissingUrl(entry.name.clone()))?;
                    let client = CompletionClient::with_timeouts(
                        url,
                        config.llm.generation_timeout(),
                        config.llm.ping_timeout(),
                    );
                    Arc::new(RemoteAgent::new(&entry.name, entry.description(), client))
                }
            };
            network.register(agent)?;
        }
        Ok(network)
    }

    pub fn with_timeouts(mut self, routing: Duration, agent: Duration) -> Self {
        self.routing_timeout = routing;
        self.agent_timeout = agent;
        self
    }

    /// Summarize completed results through `backend`.
    pub fn with_summarizer(mut self, backend: Arc<dyn CompletionBackend>) -> Self {
        self.summarizer = Some(backend);
        self
    }

    /// The completion client built from config, if any.
    pub fn llm_client(&self) -> Option<&CompletionClient> {
        self.llm.as_ref()
    }

    pub fn register(&mut self, agent: Arc<dyn Agent>) -> Result<(), NetworkError> {
        if self.agent(agent.name()).is_some() {
            return Err(NetworkError::DuplicateAgent(agent.name().to_string()));
        }
        debug!("registered agent {}", agent.name());
        self.agents.push(agent);
        Ok(())
    }

    pub fn agent(&self, name: &str) -> Option<Arc<dyn Agent>> {
        self.agents.iter().find(|a| a.name() == name).cloned()
    }

    pub fn agent_names(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.name()).collect()
    }

    /// Names and descriptions for the routing prompt, in registration order.
    pub fn descriptors(&self) -> Vec<AgentDescriptor> {
        self.agents
            .iter()
            .map(|a| AgentDescriptor::new(a.name(), a.description()))
            .collect()
    }

    /// Ask the router for an agent, in its own bounded task.
    pub async fn route(&self, query: &str) -> Result<RoutingDecision, NetworkError> {
        let router = self.router.clone();
        let agents = self.descriptors();
        let query = query.to_string();
        let handle = tokio::spawn(async move { router.route(&query, &agents).await });

        let decision = join_bounded(handle, self.routing_timeout, "routing")
            .await?
            .map_err(|source| NetworkError::Worker {
                stage: "routing",
                source,
            })??;
        Ok(decision)
    }

    /// Run one task on `agent` in its own bounded task. A panicking agent
    /// yields an ERROR result rather than a network error.
    pub async fn dispatch(
        &self,
        agent: Arc<dyn Agent>,
        task: Task,
    ) -> Result<TaskResult, NetworkError> {
        let task_id = task.id.clone();
        let name = agent.name().to_string();
        let handle = tokio::spawn(async move { agent.handle(task).await });

        match join_bounded(handle, self.agent_timeout, "agent").await? {
            Ok(result) => Ok(result),
            Err(e) => {
                warn!("agent {name} task {task_id} did not finish: {e}");
                Ok(TaskResult::error(&task_id, &format!("Error: agent task failed: {e}")))
            }
        }
    }

    /// The whole pipeline for one query.
    pub async fn handle_query(&self, query: &str) -> Result<QueryOutcome, NetworkError> {
        let decision = self.route(query).await?;
        let agent = self
            .agent(&decision.agent_name)
            .ok_or_else(|| NetworkError::UnknownAgent(decision.agent_name.clone()))?;

        let result = self.dispatch(agent, Task::new(query)).await?;
        info!(
            "{} finished task {} as {}",
            decision.agent_name,
            result.id,
            result.state()
        );

        let summary = match (&self.summarizer, result.state()) {
            (Some(backend), TaskState::Completed) => {
                let summary = backend.complete(&build_summary_prompt(result.text())).await;
                if let Err(e) = &summary {
                    warn!("summary failed: {e}");
                }
                Some(summary)
            }
            _ => None,
        };

        Ok(QueryOutcome {
            decision,
            result,
            summary,
        })
    }

    /// Ping the LLM host and every remote agent.
    pub async fn check_health(&self) -> Vec<HealthEntry> {
        let mut entries = Vec::new();

        if let Some(client) = &self.llm {
            let health = match client.ping().await {
                Ok(()) => Health::Online,
                Err(e) => Health::Offline(e.to_string()),
            };
            entries.push(HealthEntry {
                name: format!("llm ({})", client.host()),
                health,
            });
        }

        for agent in &self.agents {
            let health = if agent.is_remote() {
                match agent.ping().await {
                    Ok(()) => Health::Online,
                    Err(e) => Health::Offline(e),
                }
            } else {
                Health::Local
            };
            entries.push(HealthEntry {
                name: agent.name().to_string(),
                health,
            });
        }
        entries
    }
}
