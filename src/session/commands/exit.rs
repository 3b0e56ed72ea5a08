use clap::Parser;

use super::CommandResult;

/// exit: チューターを終了する。
#[derive(Parser)]
#[command(name = "exit", about = "Leave the tutor")]
struct ExitArgs {}

/// exit: REPL ループを終了する。
/// - `exit --help` → ヘルプ表示（終了しない）
pub(super) fn execute(args: &[&str]) -> CommandResult {
    match super::parse_args::<ExitArgs>("exit", args) {
        Ok(_) => CommandResult::exit(),
        Err(result) => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::commands::LoopAction;

    #[test]
    fn exit_returns_exit_action() {
        let result = execute(&[]);
        assert_eq!(result.action, LoopAction::Exit);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn exit_help_does_not_exit() {
        let result = execute(&["--help"]);
        assert_eq!(result.action, LoopAction::Continue);
        assert!(result.stdout.contains("exit"));
    }

    #[test]
    fn exit_rejects_arguments() {
        let result = execute(&["now"]);
        assert_eq!(result.action, LoopAction::Continue);
        assert_eq!(result.exit_code, 2);
    }
}
