pub mod client;
pub mod graph;
mod prompts;
mod stream;
mod types;

pub use client::TutorAI;
pub use graph::GraphSpec;
pub use prompts::{connection_error_message, topic_hint, PERSONA_BLURB, PERSONA_TITLE};
pub use types::{ChatMessage, Difficulty, Role, Topic, Transcript, TutorSettings};
