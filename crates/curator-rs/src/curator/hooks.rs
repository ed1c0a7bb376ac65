//! Lifecycle hooks: observe and gate orchestration decisions.
//!
//! Hooks never implement reduction — that is a handler's job. They let the
//! host veto strategies, rewrite adopted output, and observe failures:
//!
//! | Hook | Fires | Effect of return value |
//! |------|-------|------------------------|
//! | `before_process` | once, before anything else | `Err` aborts the call ("no change") |
//! | `should_run_strategy` | per strategy that passed every other gate | `false` skips the strategy |
//! | `after_modify` | per adopted handler result | `Ok(list)` becomes the working list; `Err` rolls back to the original input |
//! | `on_error` | per absorbed failure | informational (see below) |
//! | `on_validation_error` | per malformed handler result | informational (see below) |
//!
//! All methods have default implementations — implement only the hooks you
//! need. The `on_error` / `on_validation_error` booleans do not change
//! pipeline behavior (the pipeline continues with the prior working list
//! either way); they exist so host hook stacks can signal intent to their
//! own layers, and the pipeline logs the answer.

use super::strategy::Strategy;
use crate::{Message, StepContext};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`CuratorHook`] methods.
pub type HookFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Typed lifecycle hooks with default no-op implementations.
///
/// # Example
///
/// ```ignore
/// struct StepLimitHook;
///
/// impl CuratorHook for StepLimitHook {
///     fn should_run_strategy<'a>(
///         &'a self,
///         strategy: Strategy,
///         ctx: &'a StepContext,
///         _estimated_tokens: usize,
///     ) -> HookFuture<'a, bool> {
///         // Hold summarization back during the first few steps.
///         Box::pin(async move { strategy != Strategy::Summarize || ctx.step_number > 3 })
///     }
/// }
/// ```
pub trait CuratorHook: Send + Sync {
    /// Called once before any strategy is considered. Returning `Err`
    /// aborts the whole call: the curator reports the failure via
    /// [`on_error`](Self::on_error) and returns "no change".
    fn before_process<'a>(&'a self, _ctx: &'a StepContext) -> HookFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    /// Consulted per strategy after the enabled/threshold/step gates all
    /// passed. Return `false` to veto the strategy for this call. The
    /// default is `true` (absence of an opinion never blocks).
    fn should_run_strategy<'a>(
        &'a self,
        _strategy: Strategy,
        _ctx: &'a StepContext,
        _estimated_tokens: usize,
    ) -> HookFuture<'a, bool> {
        Box::pin(async { true })
    }

    /// Called with every validated handler result; the returned list
    /// becomes the working list (the default returns it unchanged). An
    /// `Err` rolls the working list back to the original input and clears
    /// the changed flag.
    fn after_modify<'a>(
        &'a self,
        _ctx: &'a StepContext,
        messages: Vec<Message>,
        _strategy: Strategy,
    ) -> HookFuture<'a, Result<Vec<Message>, String>> {
        Box::pin(async move { Ok(messages) })
    }

    /// Called for every absorbed failure (pre-flight, handler, or
    /// `after_modify`), with the failing strategy slot. Informational.
    fn on_error<'a>(
        &'a self,
        _error: &'a str,
        _strategy: Strategy,
        _ctx: &'a StepContext,
    ) -> HookFuture<'a, bool> {
        Box::pin(async { true })
    }

    /// Called when a handler's result fails validation (malformed or empty
    /// list). Informational.
    fn on_validation_error<'a>(
        &'a self,
        _strategy: Strategy,
        _ctx: &'a StepContext,
        _reason: &'a str,
    ) -> HookFuture<'a, bool> {
        Box::pin(async { true })
    }
}

/// A no-op hook set: never vetoes, never rewrites.
pub struct NoopHook;
impl CuratorHook for NoopHook {}

/// Shared instance used when no hooks are attached.
pub(crate) static NOOP_HOOK: NoopHook = NoopHook;
