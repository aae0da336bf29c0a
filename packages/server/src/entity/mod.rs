pub mod conversation_turn;
pub mod document;
