use clap::Parser;
use tracing::info;

use super::CommandResult;
use crate::ai::Difficulty;
use crate::session::state::SessionState;

/// difficulty: 難易度を表示・変更する。
#[derive(Parser)]
#[command(name = "difficulty", about = "Show or set the difficulty level")]
struct DifficultyArgs {
    /// Beginner, Standard, Advanced or Expert
    level: Option<String>,
}

/// - 引数なし → 現在の難易度と選択肢を表示
/// - `difficulty <LEVEL>` → 変更
pub(super) fn execute(args: &[&str], state: &mut SessionState) -> CommandResult {
    let parsed = match super::parse_args::<DifficultyArgs>("difficulty", args) {
        Ok(a) => a,
        Err(result) => return result,
    };

    let Some(level) = parsed.level else {
        let options: Vec<&str> = Difficulty::ALL.iter().map(|d| d.as_str()).collect();
        let msg = format!(
            "Difficulty: {} (options: {})\n",
            state.settings.difficulty,
            options.join(", ")
        );
        print!("{msg}");
        return CommandResult::success(msg);
    };

    match level.parse::<Difficulty>() {
        Ok(difficulty) => {
            state.settings.difficulty = difficulty;
            info!(difficulty = %difficulty, "Difficulty changed");
            let msg = format!("🎯 Difficulty set to {difficulty}\n");
            print!("{msg}");
            CommandResult::success(msg)
        }
        Err(e) => {
            let msg = format!("apilab: difficulty: {e}\n");
            eprint!("{msg}");
            CommandResult::error(msg, 1)
        }
    }
}
