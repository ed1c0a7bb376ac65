//! Context utilities the pipeline leans on: token estimation, retention
//! partitioning, and handler-output validation.
//!
//! 1. **[`tokens`]** — the [`TokenCounter`] trait and the default
//!    [`HeuristicCounter`] (extracted text length divided by 4). The
//!    pipeline counts once per call, against the original input.
//!
//! 2. **[`retention`]** — [`RetentionPolicy`] and the partitioning helpers
//!    that split a working list into "old/to-reduce" and "recent/to-keep"
//!    for the summarize and offload stages.
//!
//! 3. **[`validation`]** — the well-formedness check applied to every
//!    non-skip handler result before it is adopted.

pub mod retention;
pub mod tokens;
pub mod validation;

// Re-export commonly used items at the module level.
pub use retention::RetentionPolicy;
pub use tokens::{DEFAULT_CHARS_PER_TOKEN, HeuristicCounter, TokenCounter};
