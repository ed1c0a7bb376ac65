//! Token estimation for gating decisions.
//!
//! The pipeline needs one number per call: an estimate of how many tokens
//! the input history occupies, compared against each strategy's threshold.
//! Hosts with access to a real tokenizer can plug one in via
//! [`TokenCounter`]; the default [`HeuristicCounter`] uses a character-ratio
//! heuristic, which is plenty for threshold gating.

use crate::Message;
use std::future::Future;
use std::pin::Pin;

/// Default characters per token for the heuristic counter.
///
/// Most tokenizers average 3-4 characters per token on English text; the
/// default counter divides each message's extracted text length by 4 and
/// sums the results.
pub const DEFAULT_CHARS_PER_TOKEN: usize = 4;

/// Boxed future returned by [`TokenCounter::count`].
pub type CountFuture<'a> = Pin<Box<dyn Future<Output = usize> + Send + 'a>>;

/// Pluggable token counting.
///
/// Called exactly once per [`process()`](crate::curator::pipeline::Curator::process)
/// call, with the *original* input messages and the optional model
/// identifier. Counting is infallible by contract — an implementation that
/// can fail internally should fall back to a heuristic rather than guess a
/// zero, since a zero estimate disables every threshold gate.
pub trait TokenCounter: Send + Sync {
    fn count<'a>(&'a self, messages: &'a [Message], model: Option<&'a str>) -> CountFuture<'a>;
}

/// Character-ratio token estimate for a single message.
#[inline]
pub fn estimate_message_tokens(message: &Message, chars_per_token: usize) -> usize {
    message.text().len().div_ceil(chars_per_token.max(1))
}

/// Character-ratio token estimate for a sequence of messages: the sum of
/// per-message estimates, each rounded up independently.
pub fn estimate_tokens(messages: &[Message], chars_per_token: usize) -> usize {
    messages
        .iter()
        .map(|m| estimate_message_tokens(m, chars_per_token))
        .sum()
}

/// The default counter: per-message extracted text lengths divided by
/// [`DEFAULT_CHARS_PER_TOKEN`], summed. Ignores the model identifier.
#[derive(Debug, Clone)]
pub struct HeuristicCounter {
    pub chars_per_token: usize,
}

impl Default for HeuristicCounter {
    fn default() -> Self {
        Self {
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
        }
    }
}

impl TokenCounter for HeuristicCounter {
    fn count<'a>(&'a self, messages: &'a [Message], _model: Option<&'a str>) -> CountFuture<'a> {
        let estimate = estimate_tokens(messages, self.chars_per_token);
        Box::pin(async move { estimate })
    }
}

/// Shared instance used when no counter is attached.
pub(crate) static DEFAULT_TOKEN_COUNTER: HeuristicCounter = HeuristicCounter {
    chars_per_token: DEFAULT_CHARS_PER_TOKEN,
};
