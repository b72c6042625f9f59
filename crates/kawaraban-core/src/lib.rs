//! kawaraban-core: conversation orchestration for a voice-driven news
//! recommendation assistant.
//!
//! The centerpiece is [`api::run_multiturn_conversation`], which drives one
//! user turn against a chat completion endpoint: the model may request zero
//! or more tool calls (resolved through a [`tools::ToolRegistry`] and fed
//! back into the [`transcript::Transcript`]) before yielding a final answer.
//!
//! The speech, translation, and language-detection providers the voice UI
//! needs are consumed through the traits in [`speech`]; the bundled news
//! dataset tools live in [`tools::news`].

pub mod api;
pub mod config;
pub mod llm;
pub mod safety;
pub mod speech;
pub mod tools;
pub mod transcript;

/// System prompt seeding every conversation session.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that helps users get news \
article recommendations. You have access to several tools and sometimes you \
may need to call multiple tools in sequence to get answers for your users. \
Don't return the article ID.";

// Re-export commonly used types
pub use api::{DEFAULT_MAX_TOOL_TURNS, TurnOutcome, run_multiturn_conversation};
pub use config::Config;
pub use llm::{ChatCompletion, ChatEndpoint, EndpointError, HttpChatEndpoint};
pub use tools::{ParamSpec, ToolDescriptor, ToolRegistry, check_args};
pub use transcript::{Message, Role, Transcript};
