//! AI ストリーミングレスポンス処理
//!
//! OpenAI 互換 API からのストリーミングレスポンスを受け取り、
//! テキストを逐次ターミナルに表示しながら全文を蓄積する。
//! Ctrl-C (SIGINT) による中断にも対応する。

use std::io::{self, Write};

use anyhow::{Context, Result};
use async_openai::{config::OpenAIConfig, types::CreateChatCompletionRequest, Client};
use futures_util::StreamExt;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{debug, info, warn};

use crate::cli::color::red;
use crate::cli::tutor::{tutor_print_chunk, tutor_print_end, tutor_print_prefix, tutor_spinner};

/// ストリーム処理の結果
pub struct StreamResult {
    /// ストリーミングで受信したテキスト全文
    pub full_text: String,
    /// Ctrl-C (SIGINT) でストリームが中断されたかどうか
    pub interrupted: bool,
}

/// ストリーミングレスポンスを処理し、受信したテキスト全文を返す。
///
/// 最初のテキスト片が届くまでは `Thinking...` スピナーを表示する。
pub async fn process_stream(
    client: &Client<OpenAIConfig>,
    request: CreateChatCompletionRequest,
) -> Result<StreamResult> {
    // 作成時点以降の SIGINT のみ受け取る
    let mut sigint =
        signal(SignalKind::interrupt()).context("Failed to register SIGINT handler")?;

    let spinner = tutor_spinner("Thinking...");

    // API 接続待ちも Ctrl-C で中断できるようにする
    let chat = client.chat();
    let mut stream = tokio::select! {
        result = chat.create_stream(request) => {
            match result {
                Ok(s) => s,
                Err(e) => {
                    spinner.finish_and_clear();
                    return Err(anyhow::anyhow!(e).context("Failed to create chat stream"));
                }
            }
        }
        _ = sigint.recv() => {
            info!("Ctrl-C received while waiting for API connection, interrupting");
            spinner.finish_and_clear();
            return Ok(StreamResult {
                full_text: String::new(),
                interrupted: true,
            });
        }
    };

    debug!("Stream created successfully, starting to process chunks");

    let mut full_text = String::new();
    let mut started_text = false;
    let mut spinner_cleared = false;
    let mut chunk_count: u32 = 0;
    let mut interrupted = false;

    loop {
        tokio::select! {
            chunk = stream.next() => {
                let result = match chunk {
                    Some(r) => r,
                    None => break,
                };

                chunk_count += 1;
                let response = match result {
                    Ok(r) => r,
                    Err(e) => {
                        warn!(
                            error = %e,
                            chunks_received = chunk_count,
                            text_so_far_len = full_text.len(),
                            "Stream error occurred"
                        );
                        if !spinner_cleared {
                            spinner.finish_and_clear();
                        }
                        if started_text {
                            tutor_print_end();
                        }
                        anyhow::bail!("Stream error: {e}");
                    }
                };

                for choice in &response.choices {
                    if let Some(ref content) = choice.delta.content {
                        debug!(
                            chunk = chunk_count,
                            content_length = content.len(),
                            "Received text chunk"
                        );
                        if !started_text {
                            if !spinner_cleared {
                                spinner.finish_and_clear();
                                spinner_cleared = true;
                            }
                            tutor_print_prefix();
                            started_text = true;
                        }
                        tutor_print_chunk(content);
                        let _ = io::stdout().flush();
                        full_text.push_str(content);
                    } else {
                        debug!(
                            chunk = chunk_count,
                            role = ?choice.delta.role,
                            finish_reason = ?choice.finish_reason,
                            "Received chunk with no content"
                        );
                    }
                }
            }
            _ = sigint.recv() => {
                info!(
                    chunks_received = chunk_count,
                    text_so_far_len = full_text.len(),
                    "Ctrl-C received during streaming, interrupting"
                );
                interrupted = true;
                break;
            }
        }
    }

    if !spinner_cleared {
        spinner.finish_and_clear();
    }

    if started_text {
        if interrupted {
            tutor_print_chunk(&red(" [interrupted]"));
            let _ = io::stdout().flush();
        }
        tutor_print_end();
    }

    debug!(
        total_chunks = chunk_count,
        full_text_length = full_text.len(),
        interrupted = interrupted,
        "Stream processing completed"
    );

    Ok(StreamResult {
        full_text,
        interrupted,
    })
}
