//! システムプロンプトとプロンプト組み立て

use super::types::{Difficulty, Topic, TutorSettings};

pub const SYSTEM_PROMPT: &str = r#"You are an expert Physics and Mathematics tutor with a passion for teaching. Your role is to:

1. Help students solve physics and mathematics problems step-by-step
2. Explain concepts clearly using analogies and real-world examples
3. Show detailed workings for calculations
4. Identify common misconceptions and correct them gently
5. Encourage critical thinking by asking guiding questions
6. Use clear mathematical notation for expressions

Your teaching style is:
- Patient and encouraging
- Detail-oriented in explanations
- Focused on building understanding, not just giving answers
- Enthusiastic about problem-solving

When a student asks a question, first understand what they're asking, then break down the solution into clear, logical steps."#;

/// グラフ生成用プロンプト。応答はデータのみ（JSON）で、コードは受け取らない。
pub const GRAPH_PROMPT: &str = r#"You produce data for a terminal chart. Reply with a single JSON object and nothing else:
{"title": string, "x_label": string, "y_label": string, "points": [[x, y], ...]}
Rules:
- 20 to 60 points, sorted by x, all numbers finite.
- Choose a sensible x range for the requested function or data.
- No commentary, no code, no Markdown outside the JSON."#;

/// サイドバーに相当するペルソナ紹介
pub const PERSONA_TITLE: &str = "Expert Physics & Maths Tutor";
pub const PERSONA_BLURB: &str = "I'm here to help you understand and solve physics and mathematics problems with clear, step-by-step explanations!";

/// API 接続エラー時にアシスタントの応答として表示する文言
pub fn connection_error_message(error: &str) -> String {
    format!(
        "⚠️ Error connecting to API: {error}\n\nPlease check your API key and internet connection."
    )
}

/// 難易度・トピックのタグを質問の先頭に付与する。
///
/// - 難易度が Standard 以外 → `[Difficulty: X] `
/// - トピックが General 以外 → `[Topic: Y] `
pub fn decorate_question(question: &str, settings: &TutorSettings) -> String {
    let mut prefix = String::new();
    if settings.difficulty != Difficulty::Standard {
        prefix.push_str(&format!("[Difficulty: {}] ", settings.difficulty));
    }
    if settings.topic != Topic::General {
        prefix.push_str(&format!("[Topic: {}] ", settings.topic));
    }
    format!("{prefix}{question}")
}

/// トピック選択時のヒント（General の場合は `None`）
pub fn topic_hint(topic: Topic) -> Option<String> {
    match topic {
        Topic::General => None,
        t => Some(format!("💡 Ask me anything about {t}!")),
    }
}
