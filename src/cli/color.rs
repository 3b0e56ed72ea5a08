use nu_ansi_term::{Color, Style};

use crate::ai::Difficulty;

fn styled(color: Color, text: &str, is_bold: bool) -> String {
    let style = if is_bold {
        color.bold()
    } else {
        Style::new().fg(color)
    };
    style.paint(text).to_string()
}

pub fn red(text: &str) -> String {
    styled(Color::LightRed, text, false)
}

pub fn green(text: &str) -> String {
    styled(Color::LightGreen, text, false)
}

pub fn yellow(text: &str) -> String {
    styled(Color::Yellow, text, false)
}

pub fn cyan(text: &str) -> String {
    styled(Color::Cyan, text, false)
}

pub fn white(text: &str) -> String {
    styled(Color::LightGray, text, false)
}

pub fn dim(text: &str) -> String {
    styled(Color::DarkGray, text, false)
}

pub fn bold_cyan(text: &str) -> String {
    styled(Color::Cyan, text, true)
}

/// 難易度ごとの表示色（易しいほど緑、難しいほど赤）
pub fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Beginner => Color::LightGreen,
        Difficulty::Standard => Color::Cyan,
        Difficulty::Advanced => Color::Yellow,
        Difficulty::Expert => Color::LightRed,
    }
}

/// `text` を難易度の色で塗る。Expert のみ太字。
pub fn paint_difficulty(difficulty: Difficulty, text: &str) -> String {
    styled(
        difficulty_color(difficulty),
        text,
        difficulty == Difficulty::Expert,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harder_levels_get_warmer_colors() {
        assert_eq!(difficulty_color(Difficulty::Beginner), Color::LightGreen);
        assert_eq!(difficulty_color(Difficulty::Expert), Color::LightRed);
    }

    #[test]
    fn painted_text_keeps_content() {
        let painted = paint_difficulty(Difficulty::Advanced, "Advanced");
        assert!(painted.contains("Advanced"));
        assert_ne!(painted, "Advanced");
    }
}
