pub mod banner;
pub mod color;
pub mod completer;
pub mod highlighter;
pub mod plot;
pub mod prompt;
pub mod tutor;
pub mod typewriter;
