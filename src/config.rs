//! 設定ファイル管理
//!
//! `~/.config/apilab/config.toml` から TOML 形式の設定を読み込む。
//! ファイルが存在しない場合はテンプレートを生成し、デフォルト値を使用する。
//! API キーは設定ファイルには書かず、環境変数（`.env`）から読み込む。
//!
//! # 設定ファイル例
//!
//! ```toml
//! [tutor]
//! model = "gemini-2.0-flash"
//! difficulty = "Advanced"
//! topic = "Calculus"
//!
//! [news]
//! query = "Malaysia"
//! limit = 5
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::ai::{Difficulty, Topic};

/// apilab の設定全体
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// チューター（チャットボット）関連設定
    pub tutor: TutorConfig,
    /// ZenQuotes API 設定
    pub quotes: QuotesConfig,
    /// CoinGecko API 設定
    pub crypto: CryptoConfig,
    /// News API 設定
    pub news: NewsConfig,
    /// HTTP クライアント設定
    pub http: HttpConfig,
    /// 画像生成・音声合成の設定
    pub media: MediaConfig,
}

/// チューター関連の設定
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TutorConfig {
    /// 使用するモデル名
    pub model: String,
    /// OpenAI 互換エンドポイントのベース URL
    pub api_base: String,
    /// 起動時の難易度
    pub difficulty: Difficulty,
    /// 起動時のトピック
    pub topic: Topic,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            api_base: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            difficulty: Difficulty::Standard,
            topic: Topic::General,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuotesConfig {
    pub base_url: String,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            base_url: "https://zenquotes.io".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    pub base_url: String,
    /// 価格の表示通貨（CoinGecko の `vs_currencies`）
    pub vs_currency: String,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com/api/v3".to_string(),
            vs_currency: "usd".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub base_url: String,
    /// 検索キーワード
    pub query: String,
    /// 表示する記事数
    pub limit: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://newsapi.org".to_string(),
            query: "Malaysia".to_string(),
            limit: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 1 リクエストあたりのタイムアウト（秒）
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 20 }
    }
}

/// 画像生成・音声合成の設定
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// 生成物の保存先。未指定ならデータディレクトリ配下の `media/`
    pub output_dir: Option<PathBuf>,
    /// 画像生成エンドポイントのテンプレート（先頭から順に試す）。
    /// `{prompt}` が URL エンコード済みの説明文に置換される。
    pub image_endpoints: Vec<String>,
    /// 音声合成 API のベース URL
    pub speech_api_base: String,
    pub speech_model: String,
    pub speech_voice: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            image_endpoints: vec![
                "https://image.pollinations.ai/prompt/{prompt}".to_string(),
                "https://image.pollinations.ai/prompt/{prompt}?model=turbo".to_string(),
            ],
            speech_api_base: "https://api.openai.com/v1".to_string(),
            speech_model: "tts-1".to_string(),
            speech_voice: "alloy".to_string(),
        }
    }
}

impl MediaConfig {
    /// 生成物の保存先ディレクトリを返す。
    pub fn resolved_output_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.output_dir {
            return dir.clone();
        }
        ProjectDirs::from("", "", "apilab")
            .map(|d| d.data_dir().join("media"))
            .unwrap_or_else(|| PathBuf::from("apilab-media"))
    }
}

impl AppConfig {
    /// 設定ファイルを読み込む。
    ///
    /// `~/.config/apilab/config.toml` が存在すればパースし、
    /// 存在しなければテンプレートを生成してデフォルト値を返す。
    /// パースエラーの場合は警告を表示してデフォルト値を返す。
    pub fn load() -> Self {
        let path = Self::config_path();
        debug!(path = %path.display(), "Loading config file");

        if !path.exists() {
            Self::create_default_config(&path);
            return Self::default();
        }

        Self::load_from(&path)
    }

    /// 指定パスから設定を読み込む。失敗時はデフォルト値。
    fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        model = %config.tutor.model,
                        difficulty = %config.tutor.difficulty,
                        topic = %config.tutor.topic,
                        image_endpoints = config.media.image_endpoints.len(),
                        "Config loaded successfully"
                    );
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file");
                    eprintln!("apilab: warning: failed to parse config file: {e}");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read config file");
                eprintln!("apilab: warning: failed to read config file: {e}");
                Self::default()
            }
        }
    }

    /// 設定ファイルのパスを返す。
    ///
    /// dotfiles として管理しやすいよう `~/.config/apilab/config.toml` 固定とする。
    /// `$HOME` が取得できない場合は `./.config/apilab/config.toml` にフォールバックする。
    pub fn config_path() -> PathBuf {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".config/apilab/config.toml")
    }

    /// 設定ファイルが存在しない場合にテンプレートから生成する。
    ///
    /// 生成に失敗しても警告のみで処理は継続する。
    fn create_default_config(path: &Path) {
        const TEMPLATE: &str = r#"# apilab configuration
#
# API keys are read from the environment (or a .env file):
#   GEMINI_API_KEY, NEWS_API_KEY, OPENAI_API_KEY

[tutor]
# model = "gemini-2.0-flash"
# difficulty = "Standard"   # Beginner | Standard | Advanced | Expert
# topic = "General"

[news]
# query = "Malaysia"
# limit = 5

[crypto]
# vs_currency = "usd"

[http]
# timeout_secs = 20

[media]
# output_dir = "/tmp/apilab"
# speech_voice = "alloy"
"#;

        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %e, "Failed to create config directory");
                eprintln!("apilab: warning: failed to create config directory: {e}");
                return;
            }
        }

        match std::fs::write(path, TEMPLATE) {
            Ok(()) => {
                info!(path = %path.display(), "Created default config file");
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to create default config file");
                eprintln!("apilab: warning: failed to create config file: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_from_str(content: &str) -> AppConfig {
        toml::from_str(content).unwrap()
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = AppConfig::default();
        assert_eq!(config.tutor.model, "gemini-2.0-flash");
        assert_eq!(config.tutor.difficulty, Difficulty::Standard);
        assert_eq!(config.tutor.topic, Topic::General);
        assert_eq!(config.news.query, "Malaysia");
        assert_eq!(config.news.limit, 5);
        assert_eq!(config.crypto.vs_currency, "usd");
        assert_eq!(config.media.image_endpoints.len(), 2);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[tutor]
model = "gemini-1.5-pro"
difficulty = "Expert"
topic = "Quantum Physics"

[news]
query = "Rust"
limit = 3

[http]
timeout_secs = 5

[media]
output_dir = "/tmp/out"
image_endpoints = ["https://a.example/{prompt}"]
"#;
        let config = load_from_str(toml);
        assert_eq!(config.tutor.model, "gemini-1.5-pro");
        assert_eq!(config.tutor.difficulty, Difficulty::Expert);
        assert_eq!(config.tutor.topic, Topic::QuantumPhysics);
        assert_eq!(config.news.query, "Rust");
        assert_eq!(config.news.limit, 3);
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(
            config.media.resolved_output_dir(),
            PathBuf::from("/tmp/out")
        );
        assert_eq!(config.media.image_endpoints, vec!["https://a.example/{prompt}"]);
    }

    #[test]
    fn parse_partial_config_uses_defaults() {
        let config = load_from_str("[news]\nquery = \"Japan\"\n");
        assert_eq!(config.news.query, "Japan");
        assert_eq!(config.news.limit, 5);
        assert_eq!(config.tutor.model, "gemini-2.0-flash");
        assert_eq!(config.quotes.base_url, "https://zenquotes.io");
    }

    #[test]
    fn parse_empty_config() {
        let config = load_from_str("");
        assert_eq!(config.tutor.difficulty, Difficulty::Standard);
        assert_eq!(config.http.timeout_secs, 20);
    }

    #[test]
    fn settings_accept_same_spellings_as_cli() {
        let config = load_from_str("[tutor]\ndifficulty = \"advanced\"\ntopic = \"quantum-physics\"\n");
        assert_eq!(config.tutor.difficulty, Difficulty::Advanced);
        assert_eq!(config.tutor.topic, Topic::QuantumPhysics);

        let config = load_from_str("[tutor]\ntopic = \"linear algebra\"\n");
        assert_eq!(config.tutor.topic, Topic::LinearAlgebra);
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        let result = toml::from_str::<AppConfig>("[tutor]\ndifficulty = \"Impossible\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_from_invalid_file_falls_back_to_default() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[tutor\nmodel = ").unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.tutor.model, "gemini-2.0-flash");
    }

    #[test]
    fn config_path_contains_expected_components() {
        let path = AppConfig::config_path();
        assert!(path.to_string_lossy().contains(".config/apilab/config.toml"));
    }

    #[test]
    fn create_default_config_creates_file_and_dirs() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("sub/dir/config.toml");

        assert!(!path.exists());
        AppConfig::create_default_config(&path);
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[tutor]"));
        assert!(content.contains("[media]"));

        // テンプレートが有効な TOML としてパースできること
        let config: AppConfig = toml::from_str(&content).unwrap();
        assert_eq!(config.tutor.model, "gemini-2.0-flash");
        assert_eq!(config.news.limit, 5);
    }
}
