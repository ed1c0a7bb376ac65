//! The orchestrator: configuration, strategies, hooks, and the pipeline.
//!
//! [`Curator`](pipeline::Curator) runs a single synchronous-style pass per
//! host reasoning step: `before_process` hook → one token estimate → four
//! strategy stages in fixed order (filter, compact, summarize, offload),
//! each conditionally executed → final result. Strategies are
//! caller-supplied [`StrategyHandler`](strategy::StrategyHandler)s; the
//! curator decides when to run them and whether to trust what they return.

pub mod config;
pub mod hooks;
pub mod pipeline;
pub mod strategy;

// Re-export commonly used items at the module level.
pub use config::{CuratorConfig, StepTriggers, StrategyToggles, Thresholds};
pub use hooks::{CuratorHook, HookFuture, NoopHook};
pub use pipeline::Curator;
pub use strategy::{FnHandler, HandlerFuture, Strategy, StrategyHandler, StrategyInput};
