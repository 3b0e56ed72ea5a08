use clap::Parser;
use tracing::info;

use super::CommandResult;
use crate::ai::{topic_hint, Topic};
use crate::session::state::SessionState;

/// topic: トピックを表示・変更する。
#[derive(Parser)]
#[command(name = "topic", about = "Show or set the topic")]
struct TopicArgs {
    /// Topic name; multi-word names may be written with spaces or hyphens
    name: Vec<String>,
}

pub(super) fn execute(args: &[&str], state: &mut SessionState) -> CommandResult {
    let parsed = match super::parse_args::<TopicArgs>("topic", args) {
        Ok(a) => a,
        Err(result) => return result,
    };

    if parsed.name.is_empty() {
        let options: Vec<&str> = Topic::ALL.iter().map(|t| t.as_str()).collect();
        let msg = format!(
            "Topic: {}\nOptions: {}\n",
            state.settings.topic,
            options.join(", ")
        );
        print!("{msg}");
        return CommandResult::success(msg);
    }

    let name = parsed.name.join(" ");
    match name.parse::<Topic>() {
        Ok(topic) => {
            state.settings.topic = topic;
            info!(topic = %topic, "Topic changed");
            let mut msg = format!("📖 Topic set to {topic}\n");
            if let Some(hint) = topic_hint(topic) {
                msg.push_str(&format!("{hint}\n"));
            }
            print!("{msg}");
            CommandResult::success(msg)
        }
        Err(e) => {
            let msg = format!("apilab: topic: {e}\n");
            eprint!("{msg}");
            CommandResult::error(msg, 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_word_topic_without_quotes() {
        let mut state = SessionState::default();
        let result = execute(&["quantum", "physics"], &mut state);
        assert_eq!(result.exit_code, 0);
        assert_eq!(state.settings.topic, Topic::QuantumPhysics);
        assert!(result.stdout.contains("Ask me anything about Quantum Physics!"));
    }

    #[test]
    fn general_topic_has_no_hint() {
        let mut state = SessionState::default();
        state.settings.topic = Topic::Algebra;
        let result = execute(&["general"], &mut state);
        assert_eq!(state.settings.topic, Topic::General);
        assert!(!result.stdout.contains("Ask me anything"));
    }

    #[test]
    fn lists_options_without_argument() {
        let mut state = SessionState::default();
        let result = execute(&[], &mut state);
        assert!(result.stdout.contains("Topic: General"));
        assert!(result.stdout.contains("Linear Algebra"));
    }

    #[test]
    fn unknown_topic_is_an_error() {
        let mut state = SessionState::default();
        let result = execute(&["alchemy"], &mut state);
        assert_eq!(result.exit_code, 1);
        assert_eq!(state.settings.topic, Topic::General);
    }
}
