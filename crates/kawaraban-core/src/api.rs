//! Tool-call orchestration loop.
//!
//! Drives one user turn against the chat endpoint: send the transcript and
//! tool schemas, resolve any requested call through the registry, feed the
//! result back, and repeat until the model yields a final answer or the turn
//! aborts. Single-threaded and sequential: one request or one tool invocation
//! in flight at a time.

use crate::llm::{ChatEndpoint, ChatCompletion, EndpointError, FinishReason, build_request_body};
use crate::tools::{ToolRegistry, check_args};
use crate::transcript::Transcript;
use std::io::{self, ErrorKind};

/// Default ceiling on resolved tool calls per turn. A model that keeps
/// requesting tools would otherwise loop forever.
pub const DEFAULT_MAX_TOOL_TURNS: usize = 30;

/// Terminal state of one orchestrated turn.
#[derive(Debug)]
pub enum TurnOutcome {
    /// The model produced a final answer; the completion is returned
    /// unchanged. Appending the answer to the transcript is the caller's
    /// responsibility.
    Answer(ChatCompletion),
    /// The model requested a call the registry cannot honor (unknown name or
    /// inadmissible arguments). Carries a human-readable description; the
    /// conversation itself is still usable.
    Rejected(String),
    /// The completion request failed. Transport errors and content-policy
    /// rejections both land here, undistinguished; the caller apologizes and
    /// continues.
    Filtered,
}

/// Run the multi-turn tool-call loop for the current transcript.
///
/// Each iteration sends the full transcript plus the registry's tool schemas
/// (tool-choice auto, temperature 0). A requested call is validated against
/// its descriptor, invoked, and recorded in the transcript as the adjacent
/// call-record/result pair before the loop re-enters. Only the first call of
/// a response is honored; parallel calls are ignored.
///
/// Malformed (unparseable) tool arguments and handler failures are fatal for
/// the turn and propagate as errors.
pub async fn run_multiturn_conversation<E: ChatEndpoint>(
    endpoint: &E,
    model: &str,
    transcript: &mut Transcript,
    registry: &ToolRegistry,
    max_tool_turns: usize,
    verbose: bool,
) -> io::Result<TurnOutcome> {
    let mut resolved_calls = 0usize;

    loop {
        let request = build_request_body(model, transcript, registry);

        let completion = match endpoint.complete(request).await {
            Ok(completion) => completion,
            // Root cause is deliberately not surfaced: policy rejections and
            // transport failures share the filtered outcome.
            Err(EndpointError::ContentFilter) | Err(EndpointError::Transport(_)) => {
                return Ok(TurnOutcome::Filtered);
            }
        };

        let choice = match completion.choices.first() {
            Some(choice) => choice,
            None => {
                return Err(io::Error::new(
                    ErrorKind::InvalidData,
                    "Completion contained no choices",
                ));
            }
        };

        if choice.finish_reason != FinishReason::ToolCalls {
            return Ok(TurnOutcome::Answer(completion));
        }

        // Only the first requested call is honored.
        let call = match choice.message.tool_calls.first() {
            Some(call) => call,
            None => {
                return Err(io::Error::new(
                    ErrorKind::InvalidData,
                    "Stop reason was tool_calls but no call was present",
                ));
            }
        };
        let name = &call.function.name;
        if verbose {
            eprintln!("[Tool call requested: {} {}]", name, call.function.arguments);
        }

        let entry = match registry.find(name) {
            Some(entry) => entry,
            None => {
                return Ok(TurnOutcome::Rejected(format!(
                    "Function {} does not exist",
                    name
                )));
            }
        };

        let args: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&call.function.arguments).map_err(|e| {
                io::Error::new(
                    ErrorKind::InvalidData,
                    format!("Malformed arguments for {}: {}", name, e),
                )
            })?;

        if !check_args(entry.descriptor(), &args) {
            return Ok(TurnOutcome::Rejected(format!(
                "Invalid number of arguments for function: {}",
                name
            )));
        }

        let result = entry.invoke(&args)?;
        if verbose {
            eprintln!("[Tool {} returned: {}]", name, result);
        }

        transcript.push_tool_exchange(name, &call.function.arguments, &result);

        resolved_calls += 1;
        if resolved_calls >= max_tool_turns {
            return Err(io::Error::other(format!(
                "Tool call limit ({}) reached without a final answer",
                max_tool_turns
            )));
        }
    }
}
