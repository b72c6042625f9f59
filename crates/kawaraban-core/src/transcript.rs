//! Conversation transcript types.
//!
//! A transcript is the ordered message history of one conversation session.
//! It is append-only: turns are added by the caller (user turns) or by the
//! orchestrator (tool exchanges), never mutated in place and never removed.

use serde::{Deserialize, Serialize};

/// The role of a message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    /// Tool-result turn. Serialized as `function`, the role the legacy
    /// chat-completions protocol expects after a function call.
    Function,
}

/// A tool call recorded in an assistant message.
///
/// `arguments` holds the raw JSON string exactly as the endpoint sent it,
/// so the next request echoes the call back byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub name: String,
    pub arguments: String,
}

/// One turn in the conversation.
///
/// `content` is `None` while a tool call is pending resolution (the assistant
/// requested a call but has not spoken yet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Option<String>,
    #[serde(
        rename = "function_call",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tool_call: Option<ToolCallRecord>,
    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

impl Message {
    fn text(role: Role, content: &str) -> Self {
        Self {
            role,
            content: Some(content.to_string()),
            tool_call: None,
            tool_name: None,
        }
    }
}

/// The ordered, append-only message history of one conversation session.
#[derive(Debug)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates a transcript seeded with a single system message.
    pub fn new(system_prompt: &str) -> Self {
        Self {
            messages: vec![Message::text(Role::System, system_prompt)],
        }
    }

    /// Appends a user turn.
    pub fn push_user(&mut self, content: &str) {
        self.messages.push(Message::text(Role::User, content));
    }

    /// Appends an assistant turn (a spoken answer).
    pub fn push_assistant(&mut self, content: &str) {
        self.messages.push(Message::text(Role::Assistant, content));
    }

    /// Appends a resolved tool call as two messages, in order: the assistant
    /// call record (null content), then the function result carrying the same
    /// tool name. The chat protocol requires the pair to be adjacent so the
    /// model can ground its next turn in the call it made.
    pub fn push_tool_exchange(&mut self, name: &str, raw_arguments: &str, result: &str) {
        self.messages.push(Message {
            role: Role::Assistant,
            content: None,
            tool_call: Some(ToolCallRecord {
                name: name.to_string(),
                arguments: raw_arguments.to_string(),
            }),
            tool_name: None,
        });
        self.messages.push(Message {
            role: Role::Function,
            content: Some(result.to_string()),
            tool_call: None,
            tool_name: Some(name.to_string()),
        });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
