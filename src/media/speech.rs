//! 音声合成: OpenAI 互換の speech エンドポイントでテキストを mp3 にする

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequestArgs, SpeechModel, Voice},
    Client,
};
use tracing::{debug, info};

use super::write_output;
use crate::config::MediaConfig;

/// 1 リクエストで送れる最大文字数（API 側の上限）
pub const MAX_SPEECH_CHARS: usize = 4096;

/// 音声合成クライアント
pub struct Speaker {
    client: Client<OpenAIConfig>,
    model: SpeechModel,
    voice: Voice,
}

impl Speaker {
    /// `OPENAI_API_KEY` 環境変数と `[media]` 設定から初期化する。
    pub fn new(config: &MediaConfig) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY is not set. Text-to-speech is disabled.")?;
        if api_key.trim().is_empty() {
            anyhow::bail!("OPENAI_API_KEY is empty. Text-to-speech is disabled.");
        }

        let openai_config = OpenAIConfig::new()
            .with_api_base(&config.speech_api_base)
            .with_api_key(&api_key);

        Ok(Self {
            client: Client::with_config(openai_config),
            model: speech_model(&config.speech_model),
            voice: voice(&config.speech_voice),
        })
    }

    /// テキストを音声に変換し、`output_dir` に mp3 として保存する。
    pub async fn speak(&self, text: &str, output_dir: &Path) -> Result<PathBuf> {
        let input = truncate_chars(text, MAX_SPEECH_CHARS);
        debug!(chars = input.chars().count(), "Requesting speech synthesis");

        let request = CreateSpeechRequestArgs::default()
            .input(input)
            .model(self.model.clone())
            .voice(self.voice.clone())
            .build()
            .context("failed to build speech request")?;

        let response = self
            .client
            .audio()
            .speech(request)
            .await
            .context("speech request failed")?;

        let path = write_output(output_dir, "speech", "mp3", &response.bytes)?;
        info!(path = %path.display(), size = response.bytes.len(), "Speech saved");
        Ok(path)
    }
}

fn speech_model(name: &str) -> SpeechModel {
    match name {
        "tts-1-hd" => SpeechModel::Tts1Hd,
        _ => SpeechModel::Tts1,
    }
}

fn voice(name: &str) -> Voice {
    match name.to_lowercase().as_str() {
        "echo" => Voice::Echo,
        "fable" => Voice::Fable,
        "onyx" => Voice::Onyx,
        "nova" => Voice::Nova,
        "shimmer" => Voice::Shimmer,
        _ => Voice::Alloy,
    }
}

/// 文字境界を壊さずに先頭 `max` 文字までに切り詰める。
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn unknown_voice_falls_back_to_alloy() {
        assert!(matches!(voice("Nova"), Voice::Nova));
        assert!(matches!(voice("robot"), Voice::Alloy));
    }

    #[test]
    fn model_names_map_to_variants() {
        assert!(matches!(speech_model("tts-1-hd"), SpeechModel::Tts1Hd));
        assert!(matches!(speech_model("tts-1"), SpeechModel::Tts1));
    }

    #[test]
    #[serial]
    fn new_fails_without_api_key() {
        let original = std::env::var("OPENAI_API_KEY").ok();
        std::env::remove_var("OPENAI_API_KEY");

        assert!(Speaker::new(&MediaConfig::default()).is_err());

        if let Some(key) = original {
            std::env::set_var("OPENAI_API_KEY", key);
        }
    }
}
