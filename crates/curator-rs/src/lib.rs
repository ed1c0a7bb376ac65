//! Threshold-driven orchestration for agent context-reduction strategies.
//!
//! `curator-rs` decides *when* to invoke context-reduction strategies over a
//! conversational agent's message history — never *how* those strategies
//! reduce content. The host agent runtime calls
//! [`Curator::process()`](curator::pipeline::Curator::process) once per
//! reasoning step with the current messages; the curator estimates token
//! usage, evaluates per-strategy gates (token thresholds, step triggers,
//! enable flags, hook overrides), and runs the caller-supplied handlers for
//! up to four strategies in a fixed order:
//!
//! 1. **filter** — drop or truncate messages to fit a budget
//! 2. **compact** — replace verbose entries with compact placeholders
//! 3. **summarize** — fold old messages into a summary, keep recent ones
//! 4. **offload** — move reducible messages out of the live history
//!
//! Each stage's output feeds the next stage's input. Every handler result is
//! validated (or the call is rolled back) so a misbehaving strategy can never
//! destroy the conversation or abort the host's reasoning step.
//!
//! # Getting started
//!
//! ```ignore
//! use curator_rs::prelude::*;
//!
//! struct TruncateFilter;
//!
//! impl StrategyHandler for TruncateFilter {
//!     fn run<'a>(&'a self, input: StrategyInput<'a>) -> HandlerFuture<'a> {
//!         Box::pin(async move {
//!             let mut messages = input.messages;
//!             if messages.len() > 50 {
//!                 messages.drain(..messages.len() - 50);
//!                 Ok(Some(messages))
//!             } else {
//!                 Ok(None) // no opinion — leave the history unchanged
//!             }
//!         })
//!     }
//! }
//!
//! let config = CuratorConfig::default();
//! let filter = TruncateFilter;
//! let curator = Curator::new(config).with_handler(Strategy::Filter, &filter);
//!
//! let ctx = StepContext::new(messages, step_number);
//! match curator.process(&ctx).await {
//!     Some(reduced) => { /* adopt the replacement history */ }
//!     None => { /* no reduction needed this step */ }
//! }
//! ```
//!
//! # Where to find things
//!
//! - **Run the orchestrator:** [`Curator`](curator::pipeline::Curator) and
//!   [`CuratorConfig`](curator::config::CuratorConfig). All four strategies
//!   are enabled by default; a strategy only runs if a handler is attached
//!   for it.
//! - **Implement a strategy:** the
//!   [`StrategyHandler`](curator::strategy::StrategyHandler) trait, or
//!   [`FnHandler`](curator::strategy::FnHandler) for closures. Returning
//!   `Ok(None)` means "no opinion"; an empty replacement list is invalid by
//!   design — declining to act and acting destructively are different things.
//! - **Observe or gate decisions:** the
//!   [`CuratorHook`](curator::hooks::CuratorHook) trait — `before_process`,
//!   `should_run_strategy`, `after_modify`, `on_error`,
//!   `on_validation_error`. All methods have default no-op implementations.
//! - **Token counting:** the [`TokenCounter`](context::tokens::TokenCounter)
//!   trait; the default [`HeuristicCounter`](context::tokens::HeuristicCounter)
//!   divides extracted text length by 4.
//! - **Retention rules:** [`RetentionPolicy`](context::retention::RetentionPolicy)
//!   and the partitioning helpers in [`context::retention`].
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`curator`] | [`Curator`](curator::pipeline::Curator) pipeline, config, strategies, hooks |
//! | [`context`] | Token counting, retention partitioning, handler-output validation |
//!
//! # Design principles
//!
//! 1. **The curator never reduces anything itself.** Reduction is always a
//!    caller-supplied handler; the curator only decides when to call it and
//!    whether to trust its output.
//!
//! 2. **No failure escapes.** Handler errors, hook errors, and malformed
//!    results are absorbed, reported through hooks and `tracing`, and
//!    degrade to "no change". A single bad strategy must never abort the
//!    host's reasoning step.
//!
//! 3. **Stateless per call.** Each `process()` call is a self-contained pass
//!    over its arguments. No cross-call state, no background tasks, no
//!    locking — concurrent calls for different conversations are independent.

pub mod context;
pub mod curator;
pub mod prelude;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

// ── Message types ──────────────────────────────────────────────────

/// Role of a message in the conversation.
///
/// These are the only three roles the curator accepts; a handler cannot
/// construct a message with any other role.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
            MessageRole::System => write!(f, "system"),
        }
    }
}

/// One typed part of a message's content.
///
/// The curator only ever looks at [`ContentPart::Text`] (for default token
/// counting); everything else is carried opaquely for the host and the
/// handlers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    /// Plain text.
    Text { text: String },
    /// Opaque structured payload (tool calls, attachments, host extensions).
    Data { data: serde_json::Value },
}

/// Discriminated content wrapper: a literal `format` tag plus a list of
/// typed parts.
///
/// The single-variant enum keeps the wire shape (`{"format": "parts",
/// "parts": [...]}`) while making any other format unrepresentable.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum MessageContent {
    Parts { parts: Vec<ContentPart> },
}

impl MessageContent {
    /// Wrap a single text part.
    pub fn text(text: impl Into<String>) -> Self {
        MessageContent::Parts {
            parts: vec![ContentPart::Text { text: text.into() }],
        }
    }

    /// The content's parts.
    pub fn parts(&self) -> &[ContentPart] {
        match self {
            MessageContent::Parts { parts } => parts,
        }
    }
}

/// A message in the conversation — the unit the curator reduces.
///
/// The curator never creates messages (handlers do) and never deletes a
/// message list; it only passes lists through handler transformations and
/// returns either a replacement list or "no change".
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
    /// Unique identifier, assigned by the host or the constructing handler.
    pub id: String,
    pub role: MessageRole,
    pub content: MessageContent,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a message with the given role and a single text part,
    /// timestamped now.
    pub fn new(id: impl Into<String>, role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            content: MessageContent::text(text),
            created_at: Utc::now(),
        }
    }

    pub fn user(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, MessageRole::User, text)
    }

    pub fn assistant(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, MessageRole::Assistant, text)
    }

    pub fn system(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, MessageRole::System, text)
    }

    /// Concatenate the text parts of this message's content.
    ///
    /// Non-text parts contribute nothing; this is the view the default
    /// token counter sees.
    pub fn text(&self) -> String {
        self.content
            .parts()
            .iter()
            .filter_map(|p| match p {
                ContentPart::Text { text } => Some(text.as_str()),
                ContentPart::Data { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

// ── Invocation context ─────────────────────────────────────────────

/// Per-call argument bundle supplied by the host agent runtime.
///
/// The curator reads `messages`, `step_number`, and `model`; the remaining
/// fields are host passthrough, available to handlers and hooks but never
/// interpreted here. The context is read-only for the duration of one
/// [`process()`](crate::curator::pipeline::Curator::process) call — the
/// curator works on its own copy of `messages`.
#[derive(Clone, Debug, Default)]
pub struct StepContext {
    /// The current message history.
    pub messages: Vec<Message>,
    /// Monotonic step counter supplied by the host. Starts at 1.
    pub step_number: u32,
    /// Model identifier, forwarded to the token counter.
    pub model: Option<String>,
    /// Completed-step records from the host. Passthrough.
    pub step_history: Vec<serde_json::Value>,
    /// Host-managed system messages. Passthrough.
    pub system_messages: Vec<Message>,
    /// Cooperative cancellation flag shared with the host. The curator
    /// never polls it mid-handler — cancellation is the handler's and the
    /// host's responsibility.
    pub abort: Option<Arc<AtomicBool>>,
    /// Host retry counter for the current step. Passthrough.
    pub retry_count: u32,
}

impl StepContext {
    /// Create a context with messages and a step number; all passthrough
    /// fields empty.
    pub fn new(messages: Vec<Message>, step_number: u32) -> Self {
        Self {
            messages,
            step_number,
            ..Default::default()
        }
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Attach the host's step history.
    pub fn with_step_history(mut self, history: Vec<serde_json::Value>) -> Self {
        self.step_history = history;
        self
    }

    /// Attach the host's system messages.
    pub fn with_system_messages(mut self, messages: Vec<Message>) -> Self {
        self.system_messages = messages;
        self
    }

    /// Attach a shared abort flag.
    pub fn with_abort(mut self, abort: Arc<AtomicBool>) -> Self {
        self.abort = Some(abort);
        self
    }

    /// Set the host retry counter.
    pub fn with_retry_count(mut self, retries: u32) -> Self {
        self.retry_count = retries;
        self
    }
}
