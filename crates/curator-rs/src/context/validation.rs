//! Well-formedness checks for handler output.
//!
//! Roles, content shape, and timestamps are valid by construction in this
//! crate's [`Message`] type, so runtime validation covers exactly the
//! residue the type system cannot express: the replacement list must be
//! non-empty (an empty list is *invalid*, never "delete everything"), every
//! message must carry a non-empty identifier, and every content wrapper
//! must hold at least one part.

use crate::Message;

/// Validate a handler's non-skip replacement list.
///
/// Returns a human-readable reason on failure, suitable for the
/// `on_validation_error` hook.
///
/// Note: a message whose `parts` list is empty is rejected, even though
/// the wrapper shape alone would permit it. A zero-part message carries
/// nothing for token counting or any downstream handler, so it is treated
/// the same as a missing content payload.
pub fn validate_replacement(messages: &[Message]) -> Result<(), String> {
    if messages.is_empty() {
        return Err(
            "handler returned an empty message list; return None to decline instead".into(),
        );
    }
    for (idx, msg) in messages.iter().enumerate() {
        if msg.id.is_empty() {
            return Err(format!("message at index {idx} has an empty id"));
        }
        if msg.content.parts().is_empty() {
            return Err(format!(
                "message '{}' (index {idx}) has no content parts",
                msg.id
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MessageContent, MessageRole};
    use chrono::Utc;

    #[test]
    fn valid_replacement_passes() {
        let messages = vec![
            Message::user("m1", "hello"),
            Message::assistant("m2", "world"),
        ];
        assert!(validate_replacement(&messages).is_ok());
    }

    #[test]
    fn empty_list_is_invalid() {
        let err = validate_replacement(&[]).unwrap_err();
        assert!(err.contains("empty message list"));
    }

    #[test]
    fn blank_id_is_invalid() {
        let messages = vec![Message::user("", "hello")];
        let err = validate_replacement(&messages).unwrap_err();
        assert!(err.contains("empty id"));
    }

    #[test]
    fn empty_parts_is_invalid() {
        let messages = vec![Message {
            id: "m1".into(),
            role: MessageRole::Assistant,
            content: MessageContent::Parts { parts: vec![] },
            created_at: Utc::now(),
        }];
        let err = validate_replacement(&messages).unwrap_err();
        assert!(err.contains("no content parts"));
    }

    #[test]
    fn reports_first_offending_index() {
        let messages = vec![Message::user("ok", "fine"), Message::user("", "bad")];
        let err = validate_replacement(&messages).unwrap_err();
        assert!(err.contains("index 1"));
    }
}
