//! スラッシュコマンド補完: Tab キーでコマンド名と難易度・トピック名を補完
//!
//! - 先頭トークン（`/` で始まる場合のみ）: スラッシュコマンド名
//! - `/difficulty` の引数: 難易度名
//! - `/topic` の引数: トピック名（空白を含む名前はハイフン区切りで補完）

use reedline::{Completer, Span, Suggestion};

use crate::ai::{Difficulty, Topic};
use crate::session::commands::COMMANDS;

/// チューター REPL 用の補完エンジン
pub struct TutorCompleter {
    /// `/` 付きのコマンド名（ソート済み）
    commands: Vec<String>,
}

impl TutorCompleter {
    pub fn new() -> Self {
        let mut commands: Vec<String> = COMMANDS.iter().map(|(name, _)| format!("/{name}")).collect();
        commands.sort();
        Self { commands }
    }

    fn suggestion(value: String, description: Option<&str>, span: Span) -> Suggestion {
        Suggestion {
            value,
            description: description.map(str::to_string),
            style: None,
            extra: None,
            span,
            append_whitespace: true,
            match_indices: None,
        }
    }

    /// コマンド名補完（先頭トークン）
    fn complete_command(&self, partial: &str, span: Span) -> Vec<Suggestion> {
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(partial))
            .map(|cmd| {
                let description = COMMANDS
                    .iter()
                    .find(|(name, _)| cmd[1..] == **name)
                    .map(|(_, desc)| *desc);
                Self::suggestion(cmd.clone(), description, span)
            })
            .collect()
    }

    /// 引数補完（第 2 トークン）
    fn complete_argument(command: &str, partial: &str, span: Span) -> Vec<Suggestion> {
        let candidates: Vec<String> = match command {
            "/difficulty" => Difficulty::ALL.iter().map(|d| d.as_str().to_string()).collect(),
            "/topic" => Topic::ALL
                .iter()
                .map(|t| t.as_str().replace(' ', "-"))
                .collect(),
            _ => return vec![],
        };

        let wanted = partial.to_lowercase();
        candidates
            .into_iter()
            .filter(|c| c.to_lowercase().starts_with(&wanted))
            .map(|c| Self::suggestion(c, None, span))
            .collect()
    }

    /// カーソルより前の文字列から、補完対象トークンの開始位置を返す。
    fn token_start(line: &str, pos: usize) -> usize {
        line[..pos].rfind(' ').map(|i| i + 1).unwrap_or(0)
    }
}

impl Default for TutorCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for TutorCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        if !line.starts_with('/') {
            return vec![];
        }

        let start = Self::token_start(line, pos);
        let partial = &line[start..pos];
        let span = Span::new(start, pos);

        if start == 0 {
            return self.complete_command(partial, span);
        }

        let command = line.split_whitespace().next().unwrap_or("");
        // 第 3 トークン以降は補完しない
        if line[..start].split_whitespace().count() > 1 {
            return vec![];
        }
        Self::complete_argument(command, partial, span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(suggestions: Vec<Suggestion>) -> Vec<String> {
        suggestions.into_iter().map(|s| s.value).collect()
    }

    #[test]
    fn completes_slash_command_names() {
        let mut c = TutorCompleter::new();
        let got = values(c.complete("/cl", 3));
        assert_eq!(got, vec!["/clear"]);
    }

    #[test]
    fn plain_questions_are_not_completed() {
        let mut c = TutorCompleter::new();
        assert!(c.complete("what is", 7).is_empty());
    }

    #[test]
    fn completes_difficulty_names_case_insensitively() {
        let mut c = TutorCompleter::new();
        let got = values(c.complete("/difficulty ex", 14));
        assert_eq!(got, vec!["Expert"]);
    }

    #[test]
    fn completes_topic_names_with_hyphens() {
        let mut c = TutorCompleter::new();
        let got = values(c.complete("/topic lin", 10));
        assert_eq!(got, vec!["Linear-Algebra"]);
        // 補完結果はそのまま Topic としてパースできる
        assert_eq!("Linear-Algebra".parse::<Topic>().unwrap(), Topic::LinearAlgebra);
    }

    #[test]
    fn no_argument_completion_for_other_commands() {
        let mut c = TutorCompleter::new();
        assert!(c.complete("/clear x", 8).is_empty());
    }
}
