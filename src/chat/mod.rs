//! Chat-style translation sessions

mod session;

pub use session::{ChatError, ChatMessage, ChatSession, Exchange, Notice, NoticeLevel, GREETING};
