//! Session モジュール: チューター REPL ループとセッション状態管理
//!
//! `Session` 構造体にすべての状態を集約し、
//! 入力ハンドリング、スラッシュコマンド、付加機能（グラフ・画像・音声）を
//! サブモジュールに分離する。

pub mod commands;
mod editor;
mod input;
mod media;
pub mod state;

use std::path::PathBuf;

use reedline::{Reedline, Signal};
use tracing::{info, warn};

use crate::ai::{TutorAI, TutorSettings};
use crate::cli::prompt::TutorPrompt;
use crate::config::AppConfig;
use crate::media::speech::Speaker;
use state::SessionState;

/// チューター REPL の状態を管理する構造体。
/// エディタ、AI クライアント、トランスクリプトを保持する。
pub struct Session {
    editor: Reedline,
    prompt: TutorPrompt,
    ai_client: Option<TutorAI>,
    /// 音声合成クライアント（`OPENAI_API_KEY` 未設定時は `None`）
    speaker: Option<Speaker>,
    http: reqwest::Client,
    image_endpoints: Vec<String>,
    output_dir: PathBuf,
    state: SessionState,
}

impl Session {
    /// 新しい Session を作成する。
    ///
    /// AI クライアントの初期化に失敗してもセッションは開始し、
    /// 質問には接続エラーメッセージで応答する。
    pub fn new(config: &AppConfig, settings: TutorSettings, http: reqwest::Client) -> Self {
        let ai_client = match TutorAI::new(&config.tutor) {
            Ok(ai) => {
                info!(model = %ai.model(), "Tutor AI initialized successfully");
                Some(ai)
            }
            Err(e) => {
                warn!("Tutor AI disabled: {e}");
                eprintln!("apilab: warning: {e}");
                None
            }
        };

        let speaker = match Speaker::new(&config.media) {
            Ok(s) => Some(s),
            Err(e) => {
                info!("Speech disabled: {e}");
                None
            }
        };

        Self {
            editor: editor::build_editor(),
            prompt: TutorPrompt::new(settings),
            ai_client,
            speaker,
            http,
            image_endpoints: config.media.image_endpoints.clone(),
            output_dir: config.media.resolved_output_dir(),
            state: SessionState::new(settings),
        }
    }

    /// REPL ループを実行する。
    ///
    /// Ctrl-D または `/exit` で終了する。
    /// 戻り値: 終了コード（REPL 内部エラー時のみ 1）。
    pub async fn run(&mut self) -> i32 {
        crate::cli::banner::print_welcome(&self.state.settings, self.ai_client.is_some());

        let mut repl_error = false;

        loop {
            match self.editor.read_line(&self.prompt) {
                Ok(Signal::Success(line)) => {
                    if !self.handle_input(&line).await {
                        break;
                    }
                }
                Ok(Signal::CtrlC) => {
                    // 入力中の行を破棄するだけ
                    println!();
                }
                Ok(Signal::CtrlD) => {
                    info!("Ctrl-D received, ending session");
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "REPL error, exiting");
                    eprintln!("apilab: error: {e}");
                    repl_error = true;
                    break;
                }
            }
        }

        info!(
            messages = self.state.transcript.len(),
            "Tutor session finished"
        );
        crate::cli::banner::print_goodbye();

        if repl_error {
            1
        } else {
            0
        }
    }
}
