//! End-to-end: config → network → HTTP LLM fake → agents.

mod common;

use std::sync::Arc;

use serde_json::json;
use tokio::io::BufReader;

use common::{completion, json_reply, routed_query, serve};
use trigonet::agent::TaskState;
use trigonet::config::{AgentConfig, AgentKind, NetworkConfig};
use trigonet::network::{AgentNetwork, Health, NetworkError};
use trigonet::repl;

/// Routes code-looking queries to `coding`, everything else to the math agent.
fn keyword_router(prompt: &str) -> Option<(u16, String)> {
    let query = routed_query(prompt)?.to_lowercase();
    let agent = if query.contains("code") || query.contains("python") {
        "coding"
    } else if query.contains("elsewhere") {
        "far"
    } else {
        "trigonometry_math"
    };
    Some(completion(&format!("{agent}|0.92")))
}

fn config_for(host: &str) -> NetworkConfig {
    let mut config = NetworkConfig::default();
    config.llm.host = host.to_string();
    config
}

#[tokio::test]
async fn calculation_through_http_router() {
    let host = serve(Arc::new(|prompt: &str| {
        keyword_router(prompt).unwrap_or_else(|| json_reply(500, json!({})))
    }))
    .await;
    let network = AgentNetwork::from_config(&config_for(&host)).unwrap();

    let outcome = network.handle_query("sine of 30 degrees").await.unwrap();
    assert_eq!(outcome.decision.agent_name, "trigonometry_math");
    assert!((outcome.decision.confidence - 0.92).abs() < 1e-9);
    assert_eq!(outcome.result.state(), TaskState::Completed);
    assert_eq!(outcome.result.text(), "The sine of 30.00 degrees is 0.5000");

    let outcome = network.handle_query("list basic identities").await.unwrap();
    assert!(outcome.result.text().starts_with("Basic Identities:\n- "));
}

#[tokio::test]
async fn code_generation_failure_fails_task() {
    // Routing works, code generation gets a 500.
    let host = serve(Arc::new(|prompt: &str| {
        keyword_router(prompt).unwrap_or_else(|| json_reply(500, json!({"error": "boom"})))
    }))
    .await;
    let network = AgentNetwork::from_config(&config_for(&host)).unwrap();

    let outcome = network
        .handle_query("Generate python code for sine calculation")
        .await
        .unwrap();
    assert_eq!(outcome.decision.agent_name, "coding");
    assert_eq!(outcome.result.state(), TaskState::Failed);
    assert!(outcome
        .result
        .text()
        .starts_with("Error: LLM server returned status 500"));
}

#[tokio::test]
async fn code_generation_through_llm() {
    let host = serve(Arc::new(|prompt: &str| {
        keyword_router(prompt).unwrap_or_else(|| completion("```python\nimport math\n```"))
    }))
    .await;
    let network = AgentNetwork::from_config(&config_for(&host)).unwrap();

    let outcome = network
        .handle_query("write python code for tangent")
        .await
        .unwrap();
    assert_eq!(outcome.result.state(), TaskState::Completed);
    assert_eq!(outcome.result.text(), "```python\nimport math\n```");
}

#[tokio::test]
async fn remote_agent_round_trip() {
    let remote = serve(Arc::new(|_: &str| {
        json_reply(
            200,
            json!({"result": {"status": {
                "state": "input-required",
                "message": {"role": "agent", "content": {"text": "Which angle?"}}
            }}}),
        )
    }))
    .await;
    let host = serve(Arc::new(|prompt: &str| {
        keyword_router(prompt).unwrap_or_else(|| json_reply(500, json!({})))
    }))
    .await;

    let mut config = config_for(&host);
    config.agents.push(AgentConfig {
        url: Some(remote),
        description: Some("Answers questions asked elsewhere".into()),
        ..AgentConfig::local("far", AgentKind::Remote)
    });
    let network = AgentNetwork::from_config(&config).unwrap();

    let outcome = network.handle_query("ask elsewhere").await.unwrap();
    assert_eq!(outcome.decision.agent_name, "far");
    assert_eq!(outcome.result.state(), TaskState::InputRequired);
    assert_eq!(outcome.result.text(), "Which angle?");

    let health = network.check_health().await;
    assert!(matches!(health[0].health, Health::Offline(_)));
    assert_eq!(health.last().unwrap().health, Health::Online);
}

#[tokio::test]
async fn bad_routing_reply_is_per_query_error() {
    let host = serve(Arc::new(|_: &str| completion("I think trigonometry"))).await;
    let network = AgentNetwork::from_config(&config_for(&host)).unwrap();

    let err = network.handle_query("sine of 30 degrees").await.unwrap_err();
    assert!(matches!(err, NetworkError::Routing(_)));
}

#[tokio::test]
async fn summaries_use_the_llm() {
    let host = serve(Arc::new(|prompt: &str| {
        keyword_router(prompt).unwrap_or_else(|| {
            assert!(prompt.starts_with("Briefly summarize this trigonometry result: "));
            completion("Sine of 30 degrees is one half.")
        })
    }))
    .await;
    let network = AgentNetwork::from_config(&config_for(&host)).unwrap();
    let client = network.llm_client().cloned().unwrap();
    let network = network.with_summarizer(Arc::new(client));

    let outcome = network.handle_query("sine of 30 degrees").await.unwrap();
    assert_eq!(
        outcome.summary.unwrap().unwrap(),
        "Sine of 30 degrees is one half."
    );
}

#[tokio::test]
async fn interactive_session() {
    let host = serve(Arc::new(|prompt: &str| {
        keyword_router(prompt).unwrap_or_else(|| json_reply(500, json!({})))
    }))
    .await;
    let network = AgentNetwork::from_config(&config_for(&host)).unwrap();

    let input = BufReader::new(&b"\n   \nsine of 30 degrees\nexplain the unit circle\nQUIT\nnever read\n"[..]);
    let mut output = Vec::new();
    repl::run(&network, input, &mut output).await.unwrap();
    let output = String::from_utf8(output).unwrap();

    assert!(output.contains(
        "Query: sine of 30 degrees\nRouting to trigonometry_math with 0.92 confidence"
    ));
    assert!(output.contains("Agent Response: The sine of 30.00 degrees is 0.5000"));
    assert!(output.contains("Agent requested input: Please ask for a trigonometric calculation"));
    assert_eq!(output.matches("Routing to").count(), 2);
    assert!(output.ends_with("Goodbye.\n"));
}

#[tokio::test]
async fn undecodable_line_does_not_end_session() {
    let host = serve(Arc::new(|prompt: &str| {
        keyword_router(prompt).unwrap_or_else(|| json_reply(500, json!({})))
    }))
    .await;
    let network = AgentNetwork::from_config(&config_for(&host)).unwrap();

    let input =
        BufReader::new(&b"sine of 30 degrees\n\xff\xfe bad bytes\ncos of 0 radians\nquit\n"[..]);
    let mut output = Vec::new();
    repl::run(&network, input, &mut output).await.unwrap();
    let output = String::from_utf8(output).unwrap();

    assert!(output.contains("Error: input is not valid UTF-8"));
    assert_eq!(output.matches("Routing to").count(), 2);
    assert!(output.contains("Agent Response: The sine of 30.00 degrees is 0.5000"));
    assert!(output.contains("Agent Response: The cosine of 0.00 radians is 1.0000"));
    assert!(output.ends_with("Goodbye.\n"));
}
