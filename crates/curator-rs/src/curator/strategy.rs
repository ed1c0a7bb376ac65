//! Strategy abstraction: the four reduction slots and the handler trait.
//!
//! The curator never reduces anything itself — each strategy is a
//! caller-supplied [`StrategyHandler`] with an async `run` method. A handler
//! receives a [`StrategyInput`] (the invocation context, the one-per-call
//! token estimate, the current working list, and the strategy-specific
//! partitions) and returns:
//!
//! - `Ok(None)` — no opinion; the working list is left unchanged,
//! - `Ok(Some(list))` — a non-empty replacement list (validated before
//!   adoption),
//! - `Err(reason)` — a failure, absorbed by the pipeline and reported
//!   through the `on_error` hook.
//!
//! An empty `Some` list is *invalid*, never "delete everything" — declining
//! to act and acting destructively must stay distinguishable.

use crate::{Message, StepContext};
use std::future::Future;
use std::pin::Pin;

// ── Strategy ───────────────────────────────────────────────────────

/// One of the four named reduction slots, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Filter,
    Compact,
    Summarize,
    Offload,
}

impl Strategy {
    /// All strategies, in the fixed order the pipeline runs them.
    pub const ALL: [Strategy; 4] = [
        Strategy::Filter,
        Strategy::Compact,
        Strategy::Summarize,
        Strategy::Offload,
    ];

    /// The strategy's wire/log name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Filter => "filter",
            Strategy::Compact => "compact",
            Strategy::Summarize => "summarize",
            Strategy::Offload => "offload",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ── Handler input ──────────────────────────────────────────────────

/// Everything a handler gets to see for one stage.
///
/// `messages` is a snapshot of the current working list (already shaped by
/// earlier stages in this call). The partition fields are populated only
/// for the stage they belong to and are empty otherwise.
pub struct StrategyInput<'a> {
    /// Which strategy slot this invocation is for.
    pub strategy: Strategy,
    /// The host's per-call context (step number, model, passthrough fields).
    pub ctx: &'a StepContext,
    /// Token estimate for this call, computed once from the *original*
    /// input messages — not from `messages`.
    pub estimated_tokens: usize,
    /// The current working list.
    pub messages: Vec<Message>,
    /// Summarize only: messages older than the retained recent window.
    pub old_messages: Vec<Message>,
    /// Summarize only: the trailing retained messages.
    pub recent_messages: Vec<Message>,
    /// Offload only: messages the retention predicate marks reducible.
    pub to_offload: Vec<Message>,
    /// Offload only: messages the retention predicate exempts.
    pub to_keep: Vec<Message>,
}

impl<'a> StrategyInput<'a> {
    /// A plain input with empty partitions (filter/compact stages).
    pub(crate) fn new(
        strategy: Strategy,
        ctx: &'a StepContext,
        estimated_tokens: usize,
        messages: Vec<Message>,
    ) -> Self {
        Self {
            strategy,
            ctx,
            estimated_tokens,
            messages,
            old_messages: Vec::new(),
            recent_messages: Vec::new(),
            to_offload: Vec::new(),
            to_keep: Vec::new(),
        }
    }
}

// ── Handler trait ──────────────────────────────────────────────────

/// Boxed future returned by [`StrategyHandler::run`].
///
/// Type alias to keep trait signatures and implementations readable.
pub type HandlerFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Option<Vec<Message>>, String>> + Send + 'a>>;

/// A caller-supplied reduction strategy.
///
/// The pipeline awaits `run` to completion before moving to the next
/// stage — no two handlers are ever in flight concurrently within one
/// call. The curator enforces no timeout: a hanging handler hangs the
/// whole step.
///
/// # Example
///
/// ```ignore
/// struct KeepLast(usize);
///
/// impl StrategyHandler for KeepLast {
///     fn run<'a>(&'a self, input: StrategyInput<'a>) -> HandlerFuture<'a> {
///         let n = self.0;
///         Box::pin(async move {
///             let mut messages = input.messages;
///             if messages.len() > n {
///                 messages.drain(..messages.len() - n);
///                 Ok(Some(messages))
///             } else {
///                 Ok(None)
///             }
///         })
///     }
/// }
/// ```
pub trait StrategyHandler: Send + Sync {
    fn run<'a>(&'a self, input: StrategyInput<'a>) -> HandlerFuture<'a>;
}

/// A strategy handler backed by a closure.
///
/// Wraps a `Fn(StrategyInput) -> HandlerFuture` closure into a
/// [`StrategyHandler`] implementation, avoiding the boilerplate of a full
/// struct and impl for simple strategies.
///
/// # Example
///
/// ```ignore
/// let filter = FnHandler::new(|input: StrategyInput<'_>| -> HandlerFuture<'_> {
///     Box::pin(async move {
///         Ok(Some(input.messages.into_iter().rev().take(20).rev().collect()))
///     })
/// });
/// ```
pub struct FnHandler<F>(F)
where
    F: for<'a> Fn(StrategyInput<'a>) -> HandlerFuture<'a> + Send + Sync;

impl<F> FnHandler<F>
where
    F: for<'a> Fn(StrategyInput<'a>) -> HandlerFuture<'a> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> StrategyHandler for FnHandler<F>
where
    F: for<'a> Fn(StrategyInput<'a>) -> HandlerFuture<'a> + Send + Sync,
{
    fn run<'a>(&'a self, input: StrategyInput<'a>) -> HandlerFuture<'a> {
        (self.0)(input)
    }
}

// ── Handler registry ───────────────────────────────────────────────

/// The per-strategy handler slots attached to a curator.
///
/// Borrowed trait objects: the handlers must outlive the curator (bind them
/// to `let` bindings before building it).
#[derive(Default, Clone, Copy)]
pub(crate) struct StrategyHandlers<'a> {
    filter: Option<&'a dyn StrategyHandler>,
    compact: Option<&'a dyn StrategyHandler>,
    summarize: Option<&'a dyn StrategyHandler>,
    offload: Option<&'a dyn StrategyHandler>,
}

impl<'a> StrategyHandlers<'a> {
    pub(crate) fn get(&self, strategy: Strategy) -> Option<&'a dyn StrategyHandler> {
        match strategy {
            Strategy::Filter => self.filter,
            Strategy::Compact => self.compact,
            Strategy::Summarize => self.summarize,
            Strategy::Offload => self.offload,
        }
    }

    pub(crate) fn set(&mut self, strategy: Strategy, handler: &'a dyn StrategyHandler) {
        match strategy {
            Strategy::Filter => self.filter = Some(handler),
            Strategy::Compact => self.compact = Some(handler),
            Strategy::Summarize => self.summarize = Some(handler),
            Strategy::Offload => self.offload = Some(handler),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_order_is_fixed() {
        assert_eq!(
            Strategy::ALL,
            [
                Strategy::Filter,
                Strategy::Compact,
                Strategy::Summarize,
                Strategy::Offload
            ]
        );
    }

    #[test]
    fn strategy_names() {
        assert_eq!(Strategy::Filter.to_string(), "filter");
        assert_eq!(Strategy::Offload.name(), "offload");
    }

    #[tokio::test]
    async fn fn_handler_delegates_to_closure() {
        let handler = FnHandler::new(|input: StrategyInput<'_>| -> HandlerFuture<'_> {
            Box::pin(async move {
                let mut messages = input.messages;
                messages.truncate(1);
                Ok(Some(messages))
            })
        });

        let ctx = StepContext::new(vec![], 1);
        let input = StrategyInput::new(
            Strategy::Filter,
            &ctx,
            0,
            vec![Message::user("m1", "a"), Message::user("m2", "b")],
        );
        let result = handler.run(input).await.unwrap().unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "m1");
    }

    #[test]
    fn registry_roundtrip() {
        let handler = FnHandler::new(|_input: StrategyInput<'_>| -> HandlerFuture<'_> {
            Box::pin(async { Ok(None) })
        });
        let mut handlers = StrategyHandlers::default();
        assert!(handlers.get(Strategy::Compact).is_none());
        handlers.set(Strategy::Compact, &handler);
        assert!(handlers.get(Strategy::Compact).is_some());
        assert!(handlers.get(Strategy::Filter).is_none());
    }
}
