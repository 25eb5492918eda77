// Conversation orchestration: the live transcript, the archive operations over
// it, and the spoken introduction.

pub mod controller;
pub mod handlers;
pub mod speech;

pub use controller::ConversationController;
pub use speech::{SpeechOutput, UtteranceSlot};
