use clap::Parser;
use termimad::MadSkin;

use super::CommandResult;
use crate::cli::tutor::{empty_history_notice, render_message};
use crate::session::state::SessionState;

/// history: チャットの履歴を再描画する。
#[derive(Parser)]
#[command(name = "history", about = "Redraw the chat transcript")]
struct HistoryArgs {
    /// Show only the last N messages
    #[arg(short = 'n', long = "last")]
    last: Option<usize>,
}

/// トランスクリプトを古い順に再描画する。
/// アシスタントの応答は Markdown としてレンダリングする。
pub(super) fn execute(args: &[&str], state: &mut SessionState) -> CommandResult {
    let parsed = match super::parse_args::<HistoryArgs>("history", args) {
        Ok(a) => a,
        Err(result) => return result,
    };

    if state.transcript.is_empty() {
        let msg = format!("{}\n", empty_history_notice());
        print!("{msg}");
        return CommandResult::success(msg);
    }

    let skip = parsed
        .last
        .map(|n| state.transcript.len().saturating_sub(n))
        .unwrap_or(0);

    let skin = MadSkin::default();
    let mut output = String::new();
    for message in state.transcript.iter().skip(skip) {
        output.push_str(&render_message(&skin, message));
        output.push_str("\n\n");
    }

    print!("{output}");
    CommandResult::success(output)
}
