//! In-memory stand-in for the model, for tests. Built with the `test-util` feature.
//!
//! Every call is recorded so tests can assert on which gateway method ran and with
//! what history.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::errors::{GeminiError, GeminiResult};
use crate::gateway::ModelGateway;
use crate::transcript::Turn;

/// A call received by [`FakeGateway`].
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Generate { prompt: String },
    Converse { history: Vec<Turn>, message: String },
}

#[derive(Debug)]
enum Reply {
    Text(String),
    Failure(String),
}

/// Gateway that answers every call with the same canned reply.
#[derive(Debug)]
pub struct FakeGateway {
    reply: Reply,
    calls: Mutex<Vec<GatewayCall>>,
}

impl FakeGateway {
    /// Answer every call with `text`.
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Reply::Text(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail every call with a response error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Reply::Failure(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls received so far, oldest first.
    pub async fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().await.clone()
    }

    async fn answer(&self, call: GatewayCall) -> GeminiResult<String> {
        self.calls.lock().await.push(call);
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Failure(message) => Err(GeminiError::ResponseError(message.clone())),
        }
    }
}

#[async_trait]
impl ModelGateway for FakeGateway {
    async fn generate(&self, prompt: &str) -> GeminiResult<String> {
        self.answer(GatewayCall::Generate {
            prompt: prompt.to_string(),
        })
        .await
    }

    async fn converse(&self, history: &[Turn], message: &str) -> GeminiResult<String> {
        self.answer(GatewayCall::Converse {
            history: history.to_vec(),
            message: message.to_string(),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls_in_order() {
        let fake = FakeGateway::replying("ok");
        fake.generate("first").await.unwrap();
        fake.converse(&[Turn::user("a")], "second").await.unwrap();

        assert_eq!(
            fake.calls().await,
            vec![
                GatewayCall::Generate {
                    prompt: "first".to_string()
                },
                GatewayCall::Converse {
                    history: vec![Turn::user("a")],
                    message: "second".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_failing_gateway_still_records() {
        let fake = FakeGateway::failing("quota exceeded");
        let err = fake.generate("p").await.unwrap_err();
        assert_eq!(err.to_string(), "Response Error: quota exceeded");
        assert_eq!(fake.calls().await.len(), 1);
    }
}
