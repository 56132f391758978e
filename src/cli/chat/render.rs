use color_print::cformat;

use crate::cli::chat::conversation_state::{ChatEntry, ConversationState, Origin};

/// Formats one chat entry as one styled line. Exactly two presentation
/// variants exist, keyed on the entry's origin.
pub fn entry_line(entry: &ChatEntry) -> String {
    match entry.origin {
        Origin::User => cformat!("<bold><blue>you</blue></bold>   {}", entry.text),
        Origin::Bot => cformat!("<bold><green>bong</green></bold>  {}", entry.text),
    }
}

/// Projects the whole transcript in insertion order, one line per entry.
/// Pure with respect to the state; never mutates it.
pub fn transcript(state: &ConversationState) -> String {
    state
        .entries()
        .iter()
        .map(entry_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> ConversationState {
        let mut state = ConversationState::new();
        state.begin("hello").unwrap();
        state.resolve("ugh hello".to_string());
        state
    }

    #[test]
    fn test_entry_line_carries_the_entry_text() {
        let state = sample_state();
        for entry in state.entries() {
            assert!(entry_line(entry).contains(&entry.text));
        }
    }

    #[test]
    fn test_origins_render_as_distinct_variants() {
        let state = sample_state();
        let user_line = entry_line(&state.entries()[0]);
        let bot_line = entry_line(&state.entries()[1]);

        assert!(user_line.contains("you"));
        assert!(bot_line.contains("bong"));
        assert_ne!(user_line, bot_line);
    }

    #[test]
    fn test_same_origin_uses_the_same_variant() {
        let mut state = ConversationState::new();
        state.begin("same text").unwrap();
        state.resolve("same text".to_string());
        state.begin("same text").unwrap();
        state.resolve("same text".to_string());

        let entries = state.entries();
        assert_eq!(entry_line(&entries[0]), entry_line(&entries[2]));
        assert_eq!(entry_line(&entries[1]), entry_line(&entries[3]));
    }

    #[test]
    fn test_transcript_preserves_insertion_order() {
        let mut state = ConversationState::new();
        state.begin("first").unwrap();
        state.resolve("second".to_string());
        state.begin("third").unwrap();
        state.resolve("fourth".to_string());

        let rendered = transcript(&state);
        let positions: Vec<usize> = ["first", "second", "third", "fourth"]
            .iter()
            .map(|text| rendered.find(text).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(rendered.lines().count(), 4);
    }
}
