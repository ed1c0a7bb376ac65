//! The orchestration pipeline: per-step gating and sequential execution of
//! the four reduction strategies.
//!
//! [`Curator::process()`] runs a single pass per host reasoning step:
//!
//! 1. `before_process` hook (an `Err` aborts the call with "no change"),
//! 2. one token estimate, computed from the *original* input messages,
//! 3. four strategy stages in fixed order (filter, compact, summarize,
//!    offload), each conditionally executed, threading one working list,
//! 4. `Some(working)` if any durable change survived, else `None`.
//!
//! No failure ever propagates to the host: handler errors, hook errors, and
//! malformed results are absorbed, reported through hooks and `tracing`,
//! and degrade to "no change" for the stage (or the call).

use super::config::CuratorConfig;
use super::hooks::{CuratorHook, NOOP_HOOK};
use super::strategy::{Strategy, StrategyHandler, StrategyHandlers, StrategyInput};
use crate::context::retention::{partition_for_offload, split_for_summary};
use crate::context::tokens::{DEFAULT_TOKEN_COUNTER, TokenCounter};
use crate::context::validation::validate_replacement;
use crate::{Message, StepContext};
use tracing::{debug, trace, warn};

// ── Curator ────────────────────────────────────────────────────────

/// The threshold-driven orchestrator.
///
/// Holds a resolved [`CuratorConfig`] plus borrowed handler, hook, and
/// token-counter trait objects. The curator itself is stateless across
/// calls — each [`process()`](Self::process) is a self-contained pass over
/// its arguments, so one curator can serve concurrent conversations
/// without locking.
///
/// ```ignore
/// let config = CuratorConfig::default().with_filter_threshold(30_000);
/// let filter = MyFilter::new();
/// let hooks = MyHooks::new();
///
/// let curator = Curator::new(config)
///     .with_handler(Strategy::Filter, &filter)
///     .with_hooks(&hooks);
///
/// if let Some(reduced) = curator.process(&ctx).await {
///     // adopt the replacement history
/// }
/// ```
///
/// # Lifetimes
///
/// `Curator<'a>` borrows its handlers, hooks, and counter by reference to
/// avoid heap allocation per attachment. Bind them to `let` bindings
/// *before* building the curator so they outlive every `process()` call.
pub struct Curator<'a> {
    config: CuratorConfig,
    handlers: StrategyHandlers<'a>,
    hooks: &'a dyn CuratorHook,
    token_counter: &'a dyn TokenCounter,
}

impl<'a> Curator<'a> {
    /// Create a curator with the given config, no handlers, no-op hooks,
    /// and the default heuristic token counter.
    pub fn new(config: CuratorConfig) -> Self {
        Self {
            config,
            handlers: StrategyHandlers::default(),
            hooks: &NOOP_HOOK,
            token_counter: &DEFAULT_TOKEN_COUNTER,
        }
    }

    /// Attach a handler to one strategy slot.
    pub fn with_handler(mut self, strategy: Strategy, handler: &'a dyn StrategyHandler) -> Self {
        self.handlers.set(strategy, handler);
        self
    }

    /// Attach a hook set.
    pub fn with_hooks(mut self, hooks: &'a dyn CuratorHook) -> Self {
        self.hooks = hooks;
        self
    }

    /// Attach a token counter.
    pub fn with_token_counter(mut self, counter: &'a dyn TokenCounter) -> Self {
        self.token_counter = counter;
        self
    }

    /// The resolved configuration.
    pub fn config(&self) -> &CuratorConfig {
        &self.config
    }

    /// Run one orchestration pass over the host's current step.
    ///
    /// Returns `Some(replacement)` when at least one strategy produced a
    /// durable change, `None` when no reduction is needed this step. Never
    /// returns an error — every internal failure is absorbed and reported
    /// through the hook set.
    ///
    /// The token estimate is computed once, from the original input
    /// messages, and reused for every gate. A strategy that shrinks the
    /// working list does not re-gate the strategies after it; this keeps
    /// gating deterministic within a call and stops strategies from
    /// compound-triggering on each other's output, at the cost of
    /// occasionally running a later strategy whose threshold the already
    /// reduced list would no longer exceed.
    pub async fn process(&self, ctx: &StepContext) -> Option<Vec<Message>> {
        if let Err(error) = self.hooks.before_process(ctx).await {
            warn!("before_process hook failed, aborting step: {error}");
            // No strategy has started; report under the first slot.
            let _ = self.hooks.on_error(&error, Strategy::Filter, ctx).await;
            return None;
        }

        let estimated = self
            .token_counter
            .count(&ctx.messages, ctx.model.as_deref())
            .await;
        debug!(
            step = ctx.step_number,
            messages = ctx.messages.len(),
            estimated_tokens = estimated,
            "curator pass"
        );

        let mut working = ctx.messages.clone();
        let mut changed = false;

        for strategy in Strategy::ALL {
            if !self.config.strategies.enabled(strategy) {
                continue;
            }
            let Some(handler) = self.handlers.get(strategy) else {
                continue;
            };

            let threshold = self.config.thresholds.for_strategy(strategy);
            if estimated <= threshold {
                trace!(%strategy, estimated, threshold, "below threshold");
                continue;
            }
            if !self.step_gate(strategy, ctx.step_number) {
                trace!(%strategy, step = ctx.step_number, "step gate not met");
                continue;
            }
            if !self
                .hooks
                .should_run_strategy(strategy, ctx, estimated)
                .await
            {
                debug!(%strategy, "vetoed by should_run_strategy hook");
                continue;
            }

            // Partitions are computed from the *current* working list, so
            // each stage sees the previous stage's output.
            let mut input = StrategyInput::new(strategy, ctx, estimated, working.clone());
            match strategy {
                Strategy::Summarize => {
                    let (old, recent) =
                        split_for_summary(&working, self.config.retention.keep_recent);
                    if old.is_empty() {
                        trace!(%strategy, "nothing older than the recent window");
                        continue;
                    }
                    input.old_messages = old;
                    input.recent_messages = recent;
                }
                Strategy::Offload => {
                    let (to_offload, to_keep) =
                        partition_for_offload(&working, &self.config.retention);
                    if to_offload.is_empty() {
                        trace!(%strategy, "retention keeps every message");
                        continue;
                    }
                    input.to_offload = to_offload;
                    input.to_keep = to_keep;
                }
                Strategy::Filter | Strategy::Compact => {}
            }

            let replacement = match handler.run(input).await {
                Ok(Some(list)) => list,
                Ok(None) => {
                    trace!(%strategy, "handler declined");
                    continue;
                }
                Err(error) => {
                    warn!(%strategy, "handler failed: {error}");
                    let acknowledged = self.hooks.on_error(&error, strategy, ctx).await;
                    trace!(%strategy, acknowledged, "continuing with prior working list");
                    continue;
                }
            };

            if self.config.validate_handlers
                && let Err(reason) = validate_replacement(&replacement)
            {
                warn!(%strategy, "rejected handler result: {reason}");
                let _ = self
                    .hooks
                    .on_validation_error(strategy, ctx, &reason)
                    .await;
                continue;
            }

            match self.hooks.after_modify(ctx, replacement, strategy).await {
                Ok(list) => {
                    debug!(
                        %strategy,
                        before = working.len(),
                        after = list.len(),
                        "adopted replacement history"
                    );
                    working = list;
                    changed = true;
                }
                Err(error) => {
                    warn!(%strategy, "after_modify hook failed, rolling back: {error}");
                    let _ = self.hooks.on_error(&error, strategy, ctx).await;
                    // Single-step rollback history: revert to the original
                    // input, not to the pre-stage intermediate state.
                    working = ctx.messages.clone();
                    changed = false;
                }
            }
        }

        if changed { Some(working) } else { None }
    }

    /// Strategy-specific step gating. Filter is ungated; summarize fires
    /// only on exact multiples of its period.
    fn step_gate(&self, strategy: Strategy, step: u32) -> bool {
        let triggers = &self.config.step_triggers;
        match strategy {
            Strategy::Filter => true,
            Strategy::Compact => step >= triggers.min_steps_for_compact,
            Strategy::Offload => step >= triggers.min_steps_for_offload,
            Strategy::Summarize => {
                triggers.summarize_every > 0
                    && step >= triggers.summarize_every
                    && step % triggers.summarize_every == 0
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────
