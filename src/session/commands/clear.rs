use clap::Parser;
use tracing::info;

use super::CommandResult;
use crate::session::state::SessionState;

/// clear: チャット履歴を消去する。
#[derive(Parser)]
#[command(name = "clear", about = "Clear the chat history")]
struct ClearArgs {}

pub(super) fn execute(args: &[&str], state: &mut SessionState) -> CommandResult {
    if let Err(result) = super::parse_args::<ClearArgs>("clear", args) {
        return result;
    }

    let removed = state.transcript.len();
    state.transcript.clear();
    info!(removed, "Chat history cleared");

    let msg = "🗑️ Chat history cleared.\n".to_string();
    print!("{msg}");
    CommandResult::success(msg)
}
