//! Wire types for the `/tasks/send` completion endpoint.
//!
//! Requests are a single text message. Replies come in several shapes,
//! so they are read as `serde_json::Value` and probed in priority order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text payload: `{"text": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub text: String,
}

/// Message wrapper inside the request envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeMessage {
    pub content: TextContent,
}

/// Request body: `{"message": {"content": {"text": "..."}}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskEnvelope {
    pub message: EnvelopeMessage,
}

impl TaskEnvelope {
    pub fn text(text: &str) -> Self {
        Self {
            message: EnvelopeMessage {
                content: TextContent {
                    text: text.to_string(),
                },
            },
        }
    }
}

/// Where reply text may live, most specific first.
const REPLY_TEXT_POINTERS: &[&str] = &[
    "/result/artifacts/0/parts/0/text",
    "/artifacts/0/parts/0/text",
    "/message/content/text",
];

/// Extract the reply text from a response body.
pub fn extract_reply_text(body: &Value) -> Option<&str> {
    REPLY_TEXT_POINTERS
        .iter()
        .find_map(|pointer| body.pointer(pointer).and_then(Value::as_str))
}
