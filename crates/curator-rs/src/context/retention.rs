//! Retention rules: which messages are exempt from reduction.
//!
//! The summarize and offload stages split the working list into an
//! "old/to-reduce" part and a "recent/to-keep" part. Summarize uses a
//! purely positional split (everything but the trailing retained window is
//! old); offload uses the full retention predicate, which also exempts
//! user and system messages when configured. Both splits preserve the
//! relative order of messages on each side.

use crate::{Message, MessageRole};

/// How many trailing messages count as "recent", and which roles are
/// always kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Number of trailing messages exempt from reduction.
    pub keep_recent: usize,
    /// Keep all user messages, regardless of position.
    pub keep_user_messages: bool,
    /// Keep all system messages, regardless of position.
    pub keep_system_messages: bool,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            keep_recent: 5,
            keep_user_messages: true,
            keep_system_messages: true,
        }
    }
}

impl RetentionPolicy {
    /// Set the trailing recent-window size.
    pub fn with_keep_recent(mut self, n: usize) -> Self {
        self.keep_recent = n;
        self
    }

    /// Keep or reduce user messages.
    pub fn with_keep_user_messages(mut self, keep: bool) -> Self {
        self.keep_user_messages = keep;
        self
    }

    /// Keep or reduce system messages.
    pub fn with_keep_system_messages(mut self, keep: bool) -> Self {
        self.keep_system_messages = keep;
        self
    }

    /// The retention predicate: is the message at `idx` (in a list of
    /// `total`) exempt from reduction?
    ///
    /// Kept iff it sits within the trailing `keep_recent` positions, OR it
    /// is a user message and `keep_user_messages` is set, OR it is a system
    /// message and `keep_system_messages` is set.
    pub fn is_kept(&self, message: &Message, idx: usize, total: usize) -> bool {
        if idx >= total.saturating_sub(self.keep_recent) {
            return true;
        }
        match message.role {
            MessageRole::User => self.keep_user_messages,
            MessageRole::System => self.keep_system_messages,
            MessageRole::Assistant => false,
        }
    }
}

/// Positional split for the summarize stage: `(old, recent)` where
/// `recent` is the trailing `keep_recent` messages and `old` is everything
/// before them.
///
/// When the list has at most `keep_recent` messages, `old` is empty — and
/// the summarize stage skips entirely, since there is nothing to fold into
/// a summary.
pub fn split_for_summary(messages: &[Message], keep_recent: usize) -> (Vec<Message>, Vec<Message>) {
    let boundary = messages.len().saturating_sub(keep_recent);
    let (old, recent) = messages.split_at(boundary);
    (old.to_vec(), recent.to_vec())
}

/// Predicate-based partition for the offload stage:
/// `(to_offload, to_keep)`.
///
/// Recomputed fresh against the current working list at the time the
/// offload gate fires, not against the original input.
pub fn partition_for_offload(
    messages: &[Message],
    policy: &RetentionPolicy,
) -> (Vec<Message>, Vec<Message>) {
    let total = messages.len();
    let mut to_offload = Vec::new();
    let mut to_keep = Vec::new();
    for (idx, msg) in messages.iter().enumerate() {
        if policy.is_kept(msg, idx, total) {
            to_keep.push(msg.clone());
        } else {
            to_offload.push(msg.clone());
        }
    }
    (to_offload, to_keep)
}
