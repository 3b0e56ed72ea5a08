use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use crate::session::commands::is_command;

/// チューター REPL 用のハイライター
///
/// - 既知のスラッシュコマンド（先頭単語）: Cyan + Bold
/// - 未知のスラッシュコマンド: Red
/// - 引数・通常の質問: 明るい白
pub struct TutorHighlighter;

impl Highlighter for TutorHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();
        // Color::White は ANSI 7 (灰色) になるため、RGB で明るい白を指定
        let plain = Style::new().fg(Color::Rgb(255, 255, 255));

        let Some(rest) = line.strip_prefix('/') else {
            styled.push((plain, line.to_string()));
            return styled;
        };

        let name_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let name = &rest[..name_end];
        let style = if is_command(name) {
            Style::new().fg(Color::Cyan).bold()
        } else {
            Style::new().fg(Color::LightRed)
        };

        styled.push((style, format!("/{name}")));
        if name_end < rest.len() {
            styled.push((plain, rest[name_end..].to_string()));
        }
        styled
    }
}
