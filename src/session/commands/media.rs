use clap::Parser;

use super::{CommandOutcome, CommandResult};

/// 生成 AI / 外部 API を必要とする要求
#[derive(Debug, Clone, PartialEq)]
pub enum MediaRequest {
    /// 説明文からグラフを描く
    Graph(String),
    /// 説明文から画像を生成する
    Image(String),
    /// テキストを読み上げる（`None` なら直近の回答）
    Speak(Option<String>),
}

/// graph: 説明文に合うデータ点を生成し、ターミナルに散布図を描く。
#[derive(Parser)]
#[command(name = "graph", about = "Plot a function or data set described in words")]
struct GraphArgs {
    /// What to plot, e.g. "sin(x) from 0 to 2π"
    #[arg(required = true)]
    description: Vec<String>,
}

/// image: 説明文から画像を生成して保存する。
#[derive(Parser)]
#[command(name = "image", about = "Generate an illustration from a description")]
struct ImageArgs {
    /// What to draw, e.g. "a free-body diagram of a block on a slope"
    #[arg(required = true)]
    description: Vec<String>,
}

/// speak: テキストを音声ファイルに変換する。
#[derive(Parser)]
#[command(name = "speak", about = "Read the last answer (or the given text) aloud")]
struct SpeakArgs {
    /// Text to read; defaults to the tutor's last answer
    text: Vec<String>,
}

pub(super) fn is_media_command(name: &str) -> bool {
    matches!(name, "graph" | "image" | "speak")
}

/// 生の引数文字列から `MediaRequest` を組み立てる。
///
/// `-h` / `--help` のみの場合はヘルプを表示する。
/// 説明文が必須のコマンドで空の場合は clap の引数エラーを表示する。
pub(super) fn parse(cmd: &str, raw_args: &str) -> CommandOutcome {
    let raw = raw_args.trim();

    if raw.is_empty() || raw == "-h" || raw == "--help" {
        let args: &[&str] = if raw.is_empty() { &[] } else { &[raw] };
        let parsed = match cmd {
            "graph" => super::parse_args::<GraphArgs>(cmd, args).map(|_| ()),
            "image" => super::parse_args::<ImageArgs>(cmd, args).map(|_| ()),
            _ => super::parse_args::<SpeakArgs>(cmd, args).map(|_| ()),
        };
        // `/speak` は引数なしでも Ok になる
        if let Err(result) = parsed {
            return CommandOutcome::Done(result);
        }
    }

    let text = (!raw.is_empty()).then(|| raw.to_string());
    let request = match (cmd, text) {
        ("graph", Some(t)) => MediaRequest::Graph(t),
        ("image", Some(t)) => MediaRequest::Image(t),
        ("speak", text) => MediaRequest::Speak(text),
        _ => {
            let msg = format!("apilab: {cmd}: a description is required\n");
            eprint!("{msg}");
            return CommandOutcome::Done(CommandResult::error(msg, 2));
        }
    };
    CommandOutcome::Media(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(outcome: CommandOutcome) -> MediaRequest {
        match outcome {
            CommandOutcome::Media(m) => m,
            CommandOutcome::Done(r) => panic!("expected media request, got {r:?}"),
        }
    }

    #[test]
    fn graph_keeps_hyphenated_numbers() {
        let req = media(parse("graph", "y = x^2 from -3 to 3"));
        assert_eq!(req, MediaRequest::Graph("y = x^2 from -3 to 3".to_string()));
    }

    #[test]
    fn graph_without_description_is_an_error() {
        match parse("graph", "") {
            CommandOutcome::Done(r) => assert_eq!(r.exit_code, 2),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn image_help_is_shown() {
        match parse("image", "--help") {
            CommandOutcome::Done(r) => {
                assert_eq!(r.exit_code, 0);
                assert!(r.stdout.contains("image"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn speak_without_text_uses_last_answer() {
        assert_eq!(media(parse("speak", "")), MediaRequest::Speak(None));
        assert_eq!(
            media(parse("speak", "Hello class")),
            MediaRequest::Speak(Some("Hello class".to_string()))
        );
    }
}
