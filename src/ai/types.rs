//! チューター AI の公開型定義

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// 問題の難易度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Difficulty {
    Beginner,
    #[default]
    Standard,
    Advanced,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Standard,
        Difficulty::Advanced,
        Difficulty::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Standard => "Standard",
            Difficulty::Advanced => "Advanced",
            Difficulty::Expert => "Expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown difficulty '{s}' (expected one of: {})",
                    Difficulty::ALL.map(|d| d.as_str()).join(", ")
                )
            })
    }
}

// 設定ファイルでも CLI と同じ表記ゆれを受け付ける
impl TryFrom<String> for Difficulty {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// 質問のトピック
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Topic {
    #[default]
    General,
    Mechanics,
    Thermodynamics,
    Electromagnetism,
    QuantumPhysics,
    Algebra,
    Calculus,
    Geometry,
    Statistics,
    LinearAlgebra,
}

impl Topic {
    pub const ALL: [Topic; 10] = [
        Topic::General,
        Topic::Mechanics,
        Topic::Thermodynamics,
        Topic::Electromagnetism,
        Topic::QuantumPhysics,
        Topic::Algebra,
        Topic::Calculus,
        Topic::Geometry,
        Topic::Statistics,
        Topic::LinearAlgebra,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::General => "General",
            Topic::Mechanics => "Mechanics",
            Topic::Thermodynamics => "Thermodynamics",
            Topic::Electromagnetism => "Electromagnetism",
            Topic::QuantumPhysics => "Quantum Physics",
            Topic::Algebra => "Algebra",
            Topic::Calculus => "Calculus",
            Topic::Geometry => "Geometry",
            Topic::Statistics => "Statistics",
            Topic::LinearAlgebra => "Linear Algebra",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 比較用に英数字以外を取り除いて小文字化する（`quantum-physics` == `Quantum Physics`）。
fn squash(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = squash(s);
        Topic::ALL
            .into_iter()
            .find(|t| squash(t.as_str()) == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown topic '{s}' (expected one of: {})",
                    Topic::ALL.map(|t| t.as_str()).join(", ")
                )
            })
    }
}

// 設定ファイルでも CLI と同じ表記ゆれを受け付ける
impl TryFrom<String> for Topic {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// 質問に付与する設定（難易度・トピック）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TutorSettings {
    pub difficulty: Difficulty,
    pub topic: Topic,
}

/// メッセージの発言者
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// トランスクリプト中の 1 メッセージ
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// セッション中だけメモリに保持するチャット履歴。永続化はしない。
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: Role::User,
            content: content.into(),
        });
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: Role::Assistant,
            content: content.into(),
        });
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatMessage> {
        self.messages.iter()
    }

    /// 直近のアシスタント応答
    pub fn last_assistant(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.role == Role::Assistant)
    }
}
