// Core functionality for the Larder backend:
// - Gemini API client and wire types
// - Conversation transcript handling
// - Prompt templates
// - Model output normalization
// - Shared error types

pub mod client;
pub use client::*;

pub mod config;
pub use config::*;

pub mod errors;
pub use errors::*;

#[cfg(any(test, feature = "test-util"))]
pub mod fake;
#[cfg(any(test, feature = "test-util"))]
pub use fake::{FakeGateway, GatewayCall};

pub mod gateway;
pub use gateway::ModelGateway;

pub mod meals;
pub use meals::{MealSuggestion, SuggestionSet};

pub mod normalize;

pub mod prompts;

pub mod transcript;
pub use transcript::{Role, Turn};

pub mod types;
pub use types::*;
