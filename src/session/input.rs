//! 入力ハンドリング
//!
//! スラッシュコマンドはローカルで実行し、それ以外はチューターへの質問として送る。

use tracing::{debug, info, warn};

use super::commands::{try_command, CommandOutcome, LoopAction};
use super::Session;
use crate::ai::connection_error_message;
use crate::cli::tutor::tutor_warn;

impl Session {
    /// ユーザー入力を処理する。
    ///
    /// 戻り値: `true` = REPL ループ続行、`false` = セッション終了
    pub(super) async fn handle_input(&mut self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return true;
        }

        debug!(input = %line, "User input received");

        if let Some(outcome) = try_command(line, &mut self.state) {
            // /difficulty や /topic の変更をプロンプトに反映
            self.prompt.update_settings(self.state.settings);

            let keep_going = match outcome {
                CommandOutcome::Done(result) => {
                    debug!(
                        command = %line,
                        exit_code = result.exit_code,
                        stdout_len = result.stdout.len(),
                        stderr = %result.stderr.trim_end(),
                        action = ?result.action,
                        "Slash command executed"
                    );
                    result.action == LoopAction::Continue
                }
                CommandOutcome::Media(request) => {
                    self.run_media(request).await;
                    true
                }
            };
            println!();
            if !keep_going {
                info!("Exit command received");
            }
            return keep_going;
        }

        self.ask(line).await;
        println!();
        true
    }

    /// 質問をチューターに送り、回答をトランスクリプトに追加する。
    ///
    /// API エラーの応答はトランスクリプトに残さない（次の質問の文脈に混ざるため）。
    async fn ask(&mut self, question: &str) {
        let Some(ref ai) = self.ai_client else {
            tutor_warn(&connection_error_message(
                "GEMINI_API_KEY is not configured",
            ));
            return;
        };

        match ai
            .ask(&self.state.transcript, question, &self.state.settings)
            .await
        {
            Ok(reply) => {
                if reply.text.is_empty() {
                    if !reply.interrupted {
                        tutor_warn("The tutor returned an empty answer. Please try rephrasing.");
                    }
                    return;
                }
                self.state.transcript.push_user(question);
                self.state.transcript.push_assistant(reply.text);
                debug!(
                    transcript_len = self.state.transcript.len(),
                    "Transcript updated"
                );
            }
            Err(e) => {
                warn!(error = %e, "Tutor request failed");
                tutor_warn(&connection_error_message(&format!("{e:#}")));
            }
        }
    }
}
