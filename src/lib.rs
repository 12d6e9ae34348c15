//! trigonet — a trigonometry assistant network.
//!
//! An LLM router picks one of several agents for each query: a local
//! calculation/identity agent, a Python code-generation agent, or a remote
//! agent reached over `/tasks/send`.

pub mod agent;
pub mod config;
pub mod llm;
pub mod network;
pub mod repl;
pub mod routing;
pub mod trig;
