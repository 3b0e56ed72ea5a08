use chrono::{Local, Timelike};
use rand::Rng;

use super::color::{bold_cyan, cyan, dim, paint_difficulty, white, yellow};
use super::tutor::tutor_talk;
use crate::ai::{topic_hint, TutorSettings, PERSONA_BLURB, PERSONA_TITLE};

/// 時間帯に応じた挨拶を返す。
///  - 5〜11時:  "Good morning"
///  - 12〜17時: "Good afternoon"
///  - 18〜4時:  "Good evening"
fn time_greeting() -> &'static str {
    greeting_for_hour(Local::now().hour())
}

fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    }
}

/// 現在の難易度・トピックの 1 行表示
pub fn settings_line(settings: &TutorSettings) -> String {
    format!(
        "🎯 Difficulty: {}   📖 Topic: {}",
        paint_difficulty(settings.difficulty, settings.difficulty.as_str()),
        yellow(settings.topic.as_str())
    )
}

/// チューター起動時の Welcome バナーを表示する。
pub fn print_welcome(settings: &TutorSettings, ai_enabled: bool) {
    let version = env!("CARGO_PKG_VERSION");
    let separator = "=".repeat(56);

    println!();
    println!("{}", bold_cyan("🔬 Physics & Maths Question Solver"));
    println!(
        "{} {}",
        white("Your AI-powered tutor for Physics and Mathematics"),
        dim(&format!("v{version}"))
    );
    println!("{}", cyan(&separator));
    println!("📚 {}", white(PERSONA_TITLE));
    println!("   {}", dim(PERSONA_BLURB));
    println!("{}", settings_line(settings));
    if let Some(hint) = topic_hint(settings.topic) {
        println!("{hint}");
    }
    println!("{}", cyan(&separator));
    println!("{}", dim("Type /help for commands, /exit or Ctrl-D to leave."));
    println!();

    if ai_enabled {
        tutor_talk(&format!(
            "{}! Ask me a physics or maths question...",
            time_greeting()
        ));
    }
    println!();
}

/// チューター終了時の Farewell メッセージを表示する。
pub fn print_goodbye() {
    let greeting = time_greeting();

    let messages: &[&str] = &[
        "Keep practising, and the equations will start to feel like old friends.",
        "Class dismissed. Remember to show your working!",
        &format!("{greeting}! Come back whenever a problem needs solving."),
        "Every expert was once a beginner. See you next time.",
    ];

    let idx = rand::rng().random_range(0..messages.len());

    println!();
    tutor_talk(messages[idx]);
    println!();
}
