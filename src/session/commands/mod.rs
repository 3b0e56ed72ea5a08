//! スラッシュコマンド
//!
//! `/` で始まる入力はチューターへの質問ではなく REPL 内のコマンドとして扱う。
//! ローカルで完結するコマンドはここで実行し、生成 AI や外部 API を使うコマンドは
//! `MediaRequest` として呼び出し元に返す。

mod clear;
mod difficulty;
mod exit;
mod help;
mod history;
mod media;
mod topic;

pub use media::MediaRequest;

use super::state::SessionState;

/// REPL ループの制御アクション
#[derive(Debug, Clone, PartialEq)]
pub enum LoopAction {
    /// ループを続行する
    Continue,
    /// ループを終了する（/exit）
    Exit,
}

/// コマンド実行の結果
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// 表示した出力
    pub stdout: String,
    /// 表示したエラー出力
    pub stderr: String,
    /// 終了コード (0 = 成功)
    pub exit_code: i32,
    /// REPL ループの制御アクション
    pub action: LoopAction,
}

impl CommandResult {
    /// 成功結果（Continue）を返すヘルパー
    pub fn success(stdout: String) -> Self {
        Self {
            stdout,
            stderr: String::new(),
            exit_code: 0,
            action: LoopAction::Continue,
        }
    }

    /// エラー結果（Continue）を返すヘルパー
    pub fn error(stderr: String, exit_code: i32) -> Self {
        Self {
            stdout: String::new(),
            stderr,
            exit_code,
            action: LoopAction::Continue,
        }
    }

    /// Exit アクションを返すヘルパー
    pub fn exit() -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 0,
            action: LoopAction::Exit,
        }
    }
}

/// コマンドの振り分け結果
#[derive(Debug)]
pub enum CommandOutcome {
    /// ローカルで実行済み
    Done(CommandResult),
    /// 生成 AI / 外部 API を使う処理が必要
    Media(MediaRequest),
}

/// コマンド名と説明の一覧（`/help` と補完で使用）。
pub const COMMANDS: &[(&str, &str)] = &[
    ("clear", "Clear the chat history"),
    ("difficulty", "Show or set the difficulty level"),
    ("exit", "Leave the tutor"),
    ("graph", "Plot a function or data set described in words"),
    ("help", "Show this list"),
    ("history", "Redraw the chat transcript"),
    ("image", "Generate an illustration from a description"),
    ("speak", "Read the last answer (or the given text) aloud"),
    ("topic", "Show or set the topic"),
];

/// clap の `try_parse_from` を使って引数をパースする共通ヘルパー。
///
/// - パース成功 → `Ok(T)`
/// - `--help` → stdout に出力し `Err(CommandResult::success(...))`
/// - 引数エラー → stderr に出力し `Err(CommandResult::error(..., 2))`
fn parse_args<T: clap::Parser>(cmd: &str, args: &[&str]) -> Result<T, CommandResult> {
    T::try_parse_from(std::iter::once(cmd).chain(args.iter().copied())).map_err(|e| {
        let msg = e.to_string();
        if e.use_stderr() {
            eprint!("{msg}");
            CommandResult::error(msg, 2)
        } else {
            print!("{msg}");
            CommandResult::success(msg)
        }
    })
}

/// 指定された名前（`/` なし）がスラッシュコマンドかどうかを判定する。
pub fn is_command(name: &str) -> bool {
    COMMANDS.iter().any(|(n, _)| *n == name)
}

/// 入力行がスラッシュコマンドであればパースして実行する。
/// コマンドでない場合は `None` を返し、呼び出し元が質問として扱う。
pub fn try_command(line: &str, state: &mut SessionState) -> Option<CommandOutcome> {
    let rest = line.trim().strip_prefix('/')?;

    // 説明文を受け取るコマンドはクオートを解釈せず、残りをそのまま渡す
    let (name, raw_args) = rest
        .split_once(char::is_whitespace)
        .map(|(n, a)| (n, a.trim()))
        .unwrap_or((rest, ""));
    if media::is_media_command(name) {
        return Some(media::parse(name, raw_args));
    }

    let tokens = match shell_words::split(rest) {
        Ok(tokens) => tokens,
        Err(e) => {
            let msg = format!("apilab: parse error: {e}\n");
            eprint!("{msg}");
            return Some(CommandOutcome::Done(CommandResult::error(msg, 1)));
        }
    };

    let (cmd, args) = match tokens.split_first() {
        Some((cmd, args)) => (cmd.as_str(), args.iter().map(String::as_str).collect::<Vec<_>>()),
        None => {
            let msg = "apilab: empty command (try /help)\n".to_string();
            eprint!("{msg}");
            return Some(CommandOutcome::Done(CommandResult::error(msg, 1)));
        }
    };

    Some(dispatch(cmd, &args, state))
}

/// コマンドを振り分ける。未知のコマンドはエラー結果を返す。
pub fn dispatch(cmd: &str, args: &[&str], state: &mut SessionState) -> CommandOutcome {
    let result = match cmd {
        "clear" => clear::execute(args, state),
        "difficulty" => difficulty::execute(args, state),
        "exit" => exit::execute(args),
        "help" => help::execute(args),
        "history" => history::execute(args, state),
        "topic" => topic::execute(args, state),
        "graph" | "image" | "speak" => return media::parse(cmd, &args.join(" ")),
        _ => {
            let msg = format!("apilab: unknown command: /{cmd} (try /help)\n");
            eprint!("{msg}");
            CommandResult::error(msg, 127)
        }
    };
    CommandOutcome::Done(result)
}
