//! Configuration for the [`Curator`](super::pipeline::Curator).
//!
//! Every field has a named default, so a partial configuration is expressed
//! as builder calls (or struct-update syntax) over [`CuratorConfig::default()`]
//! — each section merges independently, the merge is total, and construction
//! is pure. All four strategies are **enabled by default**; a strategy still
//! only runs when a handler is attached for it.
//!
//! # Examples
//!
//! Everything at defaults:
//!
//! ```ignore
//! let config = CuratorConfig::default();
//! ```
//!
//! Overriding individual knobs:
//!
//! ```ignore
//! let config = CuratorConfig::default()
//!     .with_filter_threshold(30_000)
//!     .with_keep_recent(10)
//!     .with_validate_handlers(false);
//! ```
//!
//! Replacing whole sections via struct-update syntax:
//!
//! ```ignore
//! let config = CuratorConfig {
//!     strategies: StrategyToggles { offload: false, ..Default::default() },
//!     ..CuratorConfig::default()
//! };
//! ```

use super::strategy::Strategy;
use crate::context::retention::RetentionPolicy;

// ── Thresholds ─────────────────────────────────────────────────────

/// Per-strategy token ceilings. A strategy's gate requires the estimated
/// token count to be *strictly greater* than its threshold.
///
/// The reference defaults follow the convention
/// `filter < compact < offload < summarize`, but the ordering is a
/// documented convention, not a validated invariant — callers may set any
/// values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thresholds {
    pub filter: usize,
    pub compact: usize,
    pub summarize: usize,
    pub offload: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            filter: 40_000,
            compact: 50_000,
            summarize: 70_000,
            offload: 60_000,
        }
    }
}

impl Thresholds {
    /// The threshold for one strategy.
    pub fn for_strategy(&self, strategy: Strategy) -> usize {
        match strategy {
            Strategy::Filter => self.filter,
            Strategy::Compact => self.compact,
            Strategy::Summarize => self.summarize,
            Strategy::Offload => self.offload,
        }
    }
}

// ── Step triggers ──────────────────────────────────────────────────

/// Step-count gating. Filter has no step gate; compact and offload wait
/// for a minimum step number; summarize fires only on exact multiples of
/// its period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTriggers {
    /// Compact runs only when `step_number >= min_steps_for_compact`.
    pub min_steps_for_compact: u32,
    /// Offload runs only when `step_number >= min_steps_for_offload`.
    pub min_steps_for_offload: u32,
    /// Summarize runs only when `step_number` is a positive multiple of
    /// this period (never before the first full period). Zero disables
    /// summarize entirely.
    pub summarize_every: u32,
}

impl Default for StepTriggers {
    fn default() -> Self {
        Self {
            min_steps_for_compact: 10,
            min_steps_for_offload: 5,
            summarize_every: 20,
        }
    }
}

// ── Strategy toggles ───────────────────────────────────────────────

/// Per-strategy enable flags. All enabled by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyToggles {
    pub filter: bool,
    pub compact: bool,
    pub summarize: bool,
    pub offload: bool,
}

impl Default for StrategyToggles {
    fn default() -> Self {
        Self {
            filter: true,
            compact: true,
            summarize: true,
            offload: true,
        }
    }
}

impl StrategyToggles {
    /// Whether one strategy is enabled.
    pub fn enabled(&self, strategy: Strategy) -> bool {
        match strategy {
            Strategy::Filter => self.filter,
            Strategy::Compact => self.compact,
            Strategy::Summarize => self.summarize,
            Strategy::Offload => self.offload,
        }
    }
}

// ── Main config ────────────────────────────────────────────────────

/// Resolved, immutable-per-call configuration for a
/// [`Curator`](super::pipeline::Curator).
///
/// Handlers, hooks, and the token counter attach to the `Curator` itself
/// (they are borrowed trait objects, not data); everything here is plain
/// data with named defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct CuratorConfig {
    /// Per-strategy token ceilings.
    pub thresholds: Thresholds,
    /// Step-count gating.
    pub step_triggers: StepTriggers,
    /// Which messages are exempt from summarize/offload reduction.
    pub retention: RetentionPolicy,
    /// Per-strategy enable flags.
    pub strategies: StrategyToggles,
    /// Validate every non-skip handler result before adopting it.
    /// Disable only for trusted handlers.
    pub validate_handlers: bool,
}

impl CuratorConfig {
    // ── Builder methods ───────────────────────────────────────────
    //
    // Only the knobs callers routinely customise get builder methods;
    // whole sections can be replaced through the public fields with
    // struct-update syntax.

    /// Set the filter token threshold.
    pub fn with_filter_threshold(mut self, tokens: usize) -> Self {
        self.thresholds.filter = tokens;
        self
    }

    /// Set the compact token threshold.
    pub fn with_compact_threshold(mut self, tokens: usize) -> Self {
        self.thresholds.compact = tokens;
        self
    }

    /// Set the summarize token threshold.
    pub fn with_summarize_threshold(mut self, tokens: usize) -> Self {
        self.thresholds.summarize = tokens;
        self
    }

    /// Set the offload token threshold.
    pub fn with_offload_threshold(mut self, tokens: usize) -> Self {
        self.thresholds.offload = tokens;
        self
    }

    /// Set the summarize period (steps between summarize invocations).
    pub fn with_summarize_every(mut self, steps: u32) -> Self {
        self.step_triggers.summarize_every = steps;
        self
    }

    /// Set the trailing recent-window size for retention.
    pub fn with_keep_recent(mut self, n: usize) -> Self {
        self.retention.keep_recent = n;
        self
    }

    /// Enable or disable a single strategy.
    pub fn with_strategy_enabled(mut self, strategy: Strategy, enabled: bool) -> Self {
        match strategy {
            Strategy::Filter => self.strategies.filter = enabled,
            Strategy::Compact => self.strategies.compact = enabled,
            Strategy::Summarize => self.strategies.summarize = enabled,
            Strategy::Offload => self.strategies.offload = enabled,
        }
        self
    }

    /// Enable or disable handler-output validation.
    pub fn with_validate_handlers(mut self, validate: bool) -> Self {
        self.validate_handlers = validate;
        self
    }
}

// `validate_handlers` defaults to true, so `Default` can't be derived.
impl Default for CuratorConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            step_triggers: StepTriggers::default(),
            retention: RetentionPolicy::default(),
            strategies: StrategyToggles::default(),
            validate_handlers: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let config = CuratorConfig::default();
        assert_eq!(config.thresholds.filter, 40_000);
        assert_eq!(config.thresholds.compact, 50_000);
        assert_eq!(config.thresholds.summarize, 70_000);
        assert_eq!(config.thresholds.offload, 60_000);
        assert_eq!(config.step_triggers.min_steps_for_compact, 10);
        assert_eq!(config.step_triggers.min_steps_for_offload, 5);
        assert_eq!(config.step_triggers.summarize_every, 20);
        assert_eq!(config.retention.keep_recent, 5);
        assert!(config.retention.keep_user_messages);
        assert!(config.retention.keep_system_messages);
        assert!(config.strategies.filter);
        assert!(config.strategies.compact);
        assert!(config.strategies.summarize);
        assert!(config.strategies.offload);
        assert!(config.validate_handlers);
    }

    #[test]
    fn builder_overrides_leave_other_defaults() {
        // Overriding one threshold must not disturb the others.
        let config = CuratorConfig::default().with_filter_threshold(100);
        assert_eq!(config.thresholds.filter, 100);
        assert_eq!(config.thresholds.compact, 50_000);
        assert_eq!(config.step_triggers.summarize_every, 20);
        assert!(config.validate_handlers);
    }

    #[test]
    fn section_replacement_via_struct_update() {
        let config = CuratorConfig {
            strategies: StrategyToggles {
                offload: false,
                ..Default::default()
            },
            ..CuratorConfig::default()
        };
        assert!(config.strategies.filter);
        assert!(!config.strategies.offload);
    }

    #[test]
    fn per_strategy_accessors() {
        let config = CuratorConfig::default().with_strategy_enabled(Strategy::Compact, false);
        assert!(!config.strategies.enabled(Strategy::Compact));
        assert!(config.strategies.enabled(Strategy::Filter));
        assert_eq!(
            config.thresholds.for_strategy(Strategy::Summarize),
            70_000
        );
    }
}
