//! Conversation history: the persona turn, the replay window, and the cap.
//!
//! History is in-memory only and owned by the chat service; it is lost on
//! restart and reset wholesale by the clear-memory operation.

use crate::llm::types::{ChatMessage, Role};

/// Persona turn that anchors every conversation. Also the state the
/// clear-memory operation resets to.
pub const PERSONA_PROMPT: &str = r#"You are an expert sales representative for PartSelect, specializing in dishwasher and refrigerator parts. Your role is to:

1. Provide knowledgeable, friendly assistance on products and installations.
2. Demonstrate expertise in dishwasher and refrigerator parts and their functions.
3. Offer clear, concise explanations and step-by-step installation instructions.
4. Maintain a professional tone and prioritize customer needs.

Remember to be concise and respond in bullet points wherever possible. If a query is unrelated to dishwashers, refrigerators, or general appliance concerns, respond:

"I specialize in dishwasher and refrigerator parts. How can I assist you with these appliances today?"

Always aim to provide excellent customer service while effectively representing PartSelect."#;

/// Upper bound on stored turns, persona included.
pub const MAX_TURNS: usize = 10;

/// How many trailing turns are replayed into each model call.
pub const HISTORY_WINDOW: usize = 5;

/// A fresh conversation: exactly the persona turn.
pub fn initial_turns() -> Vec<ChatMessage> {
    vec![ChatMessage::system(PERSONA_PROMPT)]
}

/// The last `window` turns with system turns filtered out, in original order.
/// These are replayed verbatim after the per-query messages.
pub fn recent_window(turns: &[ChatMessage], window: usize) -> Vec<ChatMessage> {
    let start = turns.len().saturating_sub(window);
    turns[start..]
        .iter()
        .filter(|turn| turn.role != Role::System)
        .cloned()
        .collect()
}

/// Drop the oldest non-system turns until at most `cap` remain. The persona
/// turn at index 0 always survives.
pub fn enforce_cap(turns: &mut Vec<ChatMessage>, cap: usize) {
    if turns.len() <= cap {
        return;
    }
    let excess = turns.len() - cap;
    turns.drain(1..1 + excess);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(i: usize) -> ChatMessage {
        ChatMessage::assistant(format!("reply {}", i))
    }

    #[test]
    fn initial_state_is_single_persona_turn() {
        let turns = initial_turns();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, Role::System);
        assert_eq!(turns[0].content, PERSONA_PROMPT);
    }

    #[test]
    fn window_excludes_system_turns() {
        let mut turns = initial_turns();
        turns.push(ChatMessage::user("q1"));
        turns.push(ChatMessage::assistant("a1"));

        let window = recent_window(&turns, HISTORY_WINDOW);
        assert_eq!(window.len(), 2);
        assert!(window.iter().all(|t| t.role != Role::System));
    }

    #[test]
    fn window_takes_only_trailing_turns() {
        let mut turns = initial_turns();
        for i in 0..8 {
            turns.push(turn(i));
        }

        let window = recent_window(&turns, HISTORY_WINDOW);
        assert_eq!(window.len(), HISTORY_WINDOW);
        assert_eq!(window[0].content, "reply 3");
        assert_eq!(window[4].content, "reply 7");
    }

    #[test]
    fn cap_drops_oldest_non_system_turns() {
        let mut turns = initial_turns();
        for i in 0..12 {
            turns.push(turn(i));
        }

        enforce_cap(&mut turns, MAX_TURNS);
        assert_eq!(turns.len(), MAX_TURNS);
        assert_eq!(turns[0].role, Role::System);
        assert_eq!(turns[1].content, "reply 3");
        assert_eq!(turns[9].content, "reply 11");
    }

    #[test]
    fn cap_is_a_no_op_under_limit() {
        let mut turns = initial_turns();
        turns.push(turn(0));
        enforce_cap(&mut turns, MAX_TURNS);
        assert_eq!(turns.len(), 2);
    }
}
