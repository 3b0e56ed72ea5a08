use clap::Parser;

use super::{CommandResult, COMMANDS};

/// help: スラッシュコマンドの一覧を表示する。
#[derive(Parser)]
#[command(name = "help", about = "Show the tutor's slash commands")]
struct HelpArgs {
    /// Command to describe in detail
    command: Option<String>,
}

/// help: スラッシュコマンドのヘルプを表示する。
/// - 引数なし → 全コマンドの一覧
/// - `help <command>` → 指定コマンドの `--help` に委譲
pub(super) fn execute(args: &[&str]) -> CommandResult {
    let parsed = match super::parse_args::<HelpArgs>("help", args) {
        Ok(a) => a,
        Err(result) => return result,
    };

    match parsed.command {
        None => list_commands(),
        Some(cmd) => show_command_help(cmd.trim_start_matches('/')),
    }
}

fn list_commands() -> CommandResult {
    let mut output = String::from("Tutor commands:\n");
    for (name, desc) in COMMANDS {
        output.push_str(&format!("  /{name:<12}{desc}\n"));
    }
    output.push_str("\nAnything else is sent to the tutor as a question.\n");

    print!("{output}");
    CommandResult::success(output)
}

fn show_command_help(cmd: &str) -> CommandResult {
    if !super::is_command(cmd) {
        let msg = format!("apilab: help: no such command: /{cmd}\n");
        eprint!("{msg}");
        return CommandResult::error(msg, 1);
    }

    let mut scratch = crate::session::state::SessionState::default();
    match super::dispatch(cmd, &["--help"], &mut scratch) {
        super::CommandOutcome::Done(result) => result,
        super::CommandOutcome::Media(_) => {
            CommandResult::error(format!("apilab: help: /{cmd}: unexpected error\n"), 1)
        }
    }
}
