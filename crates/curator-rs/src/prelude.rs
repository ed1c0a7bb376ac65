//! Convenience re-exports for the common case.
//!
//! ```ignore
//! use curator_rs::prelude::*;
//! ```

pub use crate::context::retention::RetentionPolicy;
pub use crate::context::tokens::{CountFuture, HeuristicCounter, TokenCounter};
pub use crate::curator::config::{CuratorConfig, StepTriggers, StrategyToggles, Thresholds};
pub use crate::curator::hooks::{CuratorHook, HookFuture, NoopHook};
pub use crate::curator::pipeline::Curator;
pub use crate::curator::strategy::{
    FnHandler, HandlerFuture, Strategy, StrategyHandler, StrategyInput,
};
pub use crate::{ContentPart, Message, MessageContent, MessageRole, StepContext};
