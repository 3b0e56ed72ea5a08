//! スパイ・コードネームジェネレーター
//!
//! 名前を尋ね、形容詞と動物をランダムに組み合わせたコードネームと
//! ラッキーナンバーをタイプライター風に表示する。

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::info;

use crate::cli::typewriter::typewriter;

pub const ADJECTIVES: &[&str] = &["Stealthy", "Swift", "Silent", "Cunning", "Phantom", "Shadow"];
pub const ANIMALS: &[&str] = &["Falcon", "Eagle", "Dolphin", "Shark", "Albatross", "Seahawk"];

/// ラッキーナンバーの範囲（両端を含む）
pub const LUCKY_NUMBER_RANGE: std::ops::RangeInclusive<u32> = 1..=99;

/// 区切り線の幅
const RULE_WIDTH: usize = 40;

/// 生成されたコードネーム
#[derive(Debug, Clone, PartialEq)]
pub struct Codename {
    pub agent: String,
    pub adjective: &'static str,
    pub animal: &'static str,
    pub lucky_number: u32,
}

impl Codename {
    /// `Stealthy Falcon` 形式のコードネーム
    pub fn title(&self) -> String {
        format!("{} {}", self.adjective, self.animal)
    }
}

/// 乱数生成器を受け取ってコードネームを生成する。
pub fn generate<R: Rng + ?Sized>(agent: &str, rng: &mut R) -> Codename {
    Codename {
        agent: agent.to_string(),
        adjective: ADJECTIVES.choose(rng).copied().unwrap_or(ADJECTIVES[0]),
        animal: ANIMALS.choose(rng).copied().unwrap_or(ANIMALS[0]),
        lucky_number: rng.random_range(LUCKY_NUMBER_RANGE),
    }
}

/// 対話的にコードネームジェネレーターを実行する。
///
/// `name` が `None` の場合は `input` から 1 行読み取る。
pub fn run<R, W>(name: Option<String>, input: &mut R, out: &mut W, delay: Duration) -> Result<Codename>
where
    R: BufRead,
    W: Write,
{
    let rule = "=".repeat(RULE_WIDTH);

    typewriter(out, "🕵️  SPY CODENAME GENERATOR 🕵️", delay)?;
    typewriter(out, &rule, delay)?;

    writeln!(out)?;
    let agent = match name {
        Some(name) => name,
        None => {
            write!(out, "Enter your name, agent: ")?;
            out.flush()?;
            let mut line = String::new();
            input
                .read_line(&mut line)
                .context("failed to read agent name")?;
            line.trim().to_string()
        }
    };

    let codename = generate(&agent, &mut rand::rng());
    info!(agent = %codename.agent, codename = %codename.title(), "Codename generated");

    writeln!(out)?;
    typewriter(out, &rule, delay)?;
    typewriter(out, &format!("Agent {}:", codename.agent), delay)?;
    typewriter(out, &format!("🎭 Codename: {}", codename.title()), delay)?;
    typewriter(out, &format!("🍀 Lucky Number: {}", codename.lucky_number), delay)?;
    typewriter(out, &rule, delay)?;
    writeln!(out)?;
    typewriter(out, "Good luck on your mission! 🚁", delay)?;

    Ok(codename)
}

/// 標準入出力でコードネームジェネレーターを実行する。
pub fn run_stdio(name: Option<String>, delay: Duration) -> Result<Codename> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(name, &mut stdin.lock(), &mut stdout.lock(), delay)
}
