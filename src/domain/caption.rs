//! Caption helpers: remaining-character budget and caret-based
//! hashtag/mention autocomplete.
//!
//! A trigger is an unbroken `#`/`@` token ending at the caret; inserting a
//! completion replaces that partial token and appends a space.

use crate::domain::entities::UploadType;

/// Which suggestion list an active trigger should draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    Hashtag,
    Mention,
}

/// An in-progress `#tag` or `@mention` immediately before the caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTrigger {
    pub kind: TriggerKind,
    /// Byte offset of the trigger sigil within the text.
    pub start: usize,
    /// Partial token including the sigil, e.g. "#sun" or "@mi".
    pub partial: String,
}

/// Characters remaining before the per-type caption cap. Zero when over.
pub fn remaining_chars(caption: &str, upload_type: UploadType) -> usize {
    upload_type
        .caption_limit()
        .saturating_sub(caption.chars().count())
}

/// Find an active `#`/`@` token ending exactly at `caret` (a byte offset).
/// Returns None when the caret is mid-word, the sigil is missing, or the
/// sigil is glued to a preceding word character.
pub fn active_trigger(text: &str, caret: usize) -> Option<ActiveTrigger> {
    if caret > text.len() || !text.is_char_boundary(caret) {
        return None;
    }
    let before = &text[..caret];
    // Walk back over token characters to the nearest sigil.
    let mut start = None;
    for (i, ch) in before.char_indices().rev() {
        if ch == '#' || ch == '@' {
            start = Some(i);
            break;
        }
        if !(ch.is_alphanumeric() || ch == '_') {
            return None;
        }
    }
    let start = start?;
    // A sigil glued to a word ("foo#bar") is not a trigger.
    if let Some(prev) = before[..start].chars().next_back() {
        if prev.is_alphanumeric() || prev == '_' {
            return None;
        }
    }
    let partial = before[start..].to_string();
    let kind = if partial.starts_with('#') {
        TriggerKind::Hashtag
    } else {
        TriggerKind::Mention
    };
    Some(ActiveTrigger {
        kind,
        start,
        partial,
    })
}

/// Replace the active partial token with `completion` plus a trailing space.
/// Returns the new text and caret. When no trigger is active the text is
/// returned unchanged.
pub fn insert_completion(text: &str, caret: usize, completion: &str) -> (String, usize) {
    match active_trigger(text, caret) {
        Some(trigger) => {
            let mut out = String::with_capacity(text.len() + completion.len() + 1);
            out.push_str(&text[..trigger.start]);
            out.push_str(completion);
            out.push(' ');
            let new_caret = out.len();
            out.push_str(&text[caret..]);
            (out, new_caret)
        }
        None => (text.to_string(), caret),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_chars_per_type() {
        assert_eq!(remaining_chars("hello", UploadType::Story), 95);
        assert_eq!(remaining_chars("hello", UploadType::Post), 2195);
        assert_eq!(remaining_chars(&"x".repeat(200), UploadType::Story), 0);
    }

    #[test]
    fn detects_hashtag_trigger_at_caret() {
        let text = "sunset #sun";
        let trigger = active_trigger(text, text.len()).expect("trigger");
        assert_eq!(trigger.kind, TriggerKind::Hashtag);
        assert_eq!(trigger.start, 7);
        assert_eq!(trigger.partial, "#sun");
    }

    #[test]
    fn detects_mention_trigger() {
        let text = "cc @mi";
        let trigger = active_trigger(text, text.len()).expect("trigger");
        assert_eq!(trigger.kind, TriggerKind::Mention);
        assert_eq!(trigger.partial, "@mi");
    }

    #[test]
    fn bare_sigil_is_a_trigger() {
        let trigger = active_trigger("hello #", 7).expect("trigger");
        assert_eq!(trigger.partial, "#");
    }

    #[test]
    fn no_trigger_without_sigil_or_mid_word() {
        assert_eq!(active_trigger("plain text", 10), None);
        // sigil glued to a word is not a trigger
        assert_eq!(active_trigger("foo#bar", 7), None);
        // space breaks the token
        assert_eq!(active_trigger("#tag done", 9), None);
    }

    #[test]
    fn insert_replaces_partial_and_moves_caret() {
        let (text, caret) = insert_completion("sunset #sun", 11, "#sunset");
        assert_eq!(text, "sunset #sunset ");
        assert_eq!(caret, text.len());
    }

    #[test]
    fn insert_preserves_tail_after_caret() {
        let s = "hey @mi and more";
        let caret = 7; // after "@mi"
        let (text, new_caret) = insert_completion(s, caret, "@mike_chen");
        assert_eq!(text, "hey @mike_chen  and more");
        assert_eq!(&text[..new_caret], "hey @mike_chen ");
    }

    #[test]
    fn insert_without_trigger_is_identity() {
        let (text, caret) = insert_completion("plain", 5, "#x");
        assert_eq!(text, "plain");
        assert_eq!(caret, 5);
    }
}
