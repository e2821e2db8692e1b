//! Spoken-text extraction for `*action*` narration markup.
//!
//! Characters narrate gestures between asterisks (`*smiles warmly*`). These
//! helpers find those spans, strip them for display, and pick the part of a
//! reply that is worth reading aloud.

use serde::Serialize;

/// Replies longer than this many words are cut down before being spoken.
pub const MAX_SPOKEN_WORDS: usize = 50;
/// Longest first sentence still spoken on its own, in UTF-16 code units.
pub const MAX_SPOKEN_SENTENCE_UNITS: usize = 200;

/// One run of a reply: plain dialogue or an asterisk-wrapped action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text")]
pub enum Segment {
    #[serde(rename = "plain")]
    Plain(String),
    #[serde(rename = "action")]
    Action(String),
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Byte ranges of every `*...*` span, asterisks included.
///
/// Spans are non-greedy and never cross a line break.
fn action_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut pos = 0;
    while let Some(offset) = text[pos..].find('*') {
        let start = pos + offset;
        let body = &text[start + 1..];
        match body.find(|c: char| c == '*' || is_line_break(c)) {
            Some(close) if body[close..].starts_with('*') => {
                let end = start + 1 + close + 1;
                spans.push((start, end));
                pos = end;
            }
            _ => pos = start + 1,
        }
    }
    spans
}

pub fn has_asterisk_content(text: &str) -> bool {
    !action_spans(text).is_empty()
}

/// Pick the text a voice should read for a reply.
///
/// Actions win when present; otherwise short replies are read whole and long
/// ones fall back to their first sentence.
pub fn extract_speech_text(text: &str) -> Option<String> {
    let spans = action_spans(text);
    if !spans.is_empty() {
        let actions: Vec<&str> = spans
            .iter()
            .map(|&(start, end)| &text[start + 1..end - 1])
            .collect();
        return Some(actions.join(" "));
    }

    if text.split_whitespace().count() <= MAX_SPOKEN_WORDS {
        return Some(text.to_string());
    }

    let first_sentence = text
        .split(|c: char| matches!(c, '.' | '!' | '?'))
        .next()
        .unwrap_or_default()
        .trim();
    // Emoji and other astral characters count twice, as speech engines see them.
    if !first_sentence.is_empty()
        && first_sentence.encode_utf16().count() <= MAX_SPOKEN_SENTENCE_UNITS
    {
        return Some(first_sentence.to_string());
    }

    None
}

/// Remove the asterisks around actions, keeping their text.
pub fn strip_asterisks(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pos = 0;
    for (start, end) in action_spans(text) {
        result.push_str(&text[pos..start]);
        result.push_str(&text[start + 1..end - 1]);
        pos = end;
    }
    result.push_str(&text[pos..]);
    result
}

/// Split a reply into ordered dialogue and action segments.
pub fn split_narration(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut pos = 0;
    for (start, end) in action_spans(text) {
        if start > pos {
            segments.push(Segment::Plain(text[pos..start].to_string()));
        }
        segments.push(Segment::Action(text[start + 1..end - 1].to_string()));
        pos = end;
    }
    if pos < text.len() {
        segments.push(Segment::Plain(text[pos..].to_string()));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_actions() {
        assert!(has_asterisk_content("I see. *smiles warmly*"));
        assert!(has_asterisk_content("**"));
        assert!(!has_asterisk_content("a * b"));
        assert!(!has_asterisk_content("*half\nline*"));
    }

    #[test]
    fn actions_are_spoken_first() {
        let text = "Fascinating! *leans forward* Tell me more. *nods*";
        assert_eq!(
            extract_speech_text(text).as_deref(),
            Some("leans forward nods")
        );
    }

    #[test]
    fn short_reply_spoken_whole() {
        let text = "  That is a wonderful question.  ";
        assert_eq!(extract_speech_text(text).as_deref(), Some(text));
        assert_eq!(extract_speech_text("").as_deref(), Some(""));
    }

    #[test]
    fn long_reply_uses_first_sentence() {
        let text = format!("First sentence here! {}", "word ".repeat(60));
        assert_eq!(
            extract_speech_text(&text).as_deref(),
            Some("First sentence here")
        );
    }

    #[test]
    fn long_first_sentence_is_dropped() {
        let text = "word ".repeat(60);
        assert_eq!(extract_speech_text(&text), None);
    }

    #[test]
    fn sentence_limit_counts_utf16_units() {
        let filler = "word ".repeat(60);
        // 100 notes are 200 UTF-16 units: still spoken.
        let fits = format!("{}. {}", "🎵".repeat(100), filler);
        assert_eq!(extract_speech_text(&fits), Some("🎵".repeat(100)));
        // 101 notes are 202 units, though only 101 chars.
        let too_long = format!("{}. {}", "🎵".repeat(101), filler);
        assert_eq!(extract_speech_text(&too_long), None);
        // Accented letters stay one unit each.
        let accented = format!("{}. {}", "é".repeat(200), filler);
        assert_eq!(extract_speech_text(&accented), Some("é".repeat(200)));
    }

    #[test]
    fn line_break_blocks_a_span() {
        // The first '*' cannot close across the newline; the second pair can.
        let text = "*a\n*b*";
        assert_eq!(strip_asterisks(text), "*a\nb");
    }

    #[test]
    fn strip_keeps_action_text() {
        assert_eq!(
            strip_asterisks("I see what you mean. *smiles warmly*"),
            "I see what you mean. smiles warmly"
        );
        assert_eq!(strip_asterisks("no markup"), "no markup");
    }

    #[test]
    fn narration_segments_in_order() {
        let segments = split_narration("*waves* Hello there! *bows*");
        assert_eq!(
            segments,
            vec![
                Segment::Action("waves".to_string()),
                Segment::Plain(" Hello there! ".to_string()),
                Segment::Action("bows".to_string()),
            ]
        );
        assert!(split_narration("").is_empty());
    }

    #[test]
    fn segment_serializes_tagged() {
        let json = serde_json::to_string(&Segment::Action("nods".into())).unwrap();
        assert_eq!(json, r#"{"type":"action","text":"nods"}"#);
    }
}
