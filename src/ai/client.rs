//! 生成 AI クライアント: Physics & Maths Tutor
//!
//! Gemini の OpenAI 互換エンドポイントに接続し、
//! チャット履歴と新しい質問を送ってストリーミングで回答を受け取る。

use anyhow::{Context, Result};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest,
    },
    Client,
};
use tracing::{debug, info, warn};

use super::graph::{parse_graph, GraphSpec};
use super::prompts::{decorate_question, GRAPH_PROMPT, SYSTEM_PROMPT};
use super::stream::process_stream;
use super::types::{Role, Transcript, TutorSettings};
use crate::cli::tutor::tutor_spinner;
use crate::config::TutorConfig;

/// API キーが未設定であることを示すプレースホルダー
const PLACEHOLDER_KEYS: &[&str] = &["your_google_API_key", "your_gemini_api_key"];

/// 1 回の質問に対する回答
#[derive(Debug, Clone)]
pub struct TutorReply {
    /// 回答テキスト（ストリーミング表示済み）
    pub text: String,
    /// Ctrl-C で中断されたかどうか
    pub interrupted: bool,
}

/// Physics & Maths Tutor の AI クライアント
pub struct TutorAI {
    client: Client<OpenAIConfig>,
    model: String,
}

impl TutorAI {
    /// `GEMINI_API_KEY` 環境変数と設定ファイルの `[tutor]` セクションから初期化する。
    pub fn new(config: &TutorConfig) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY is not set. The tutor cannot answer questions.")?;

        if api_key.trim().is_empty() || PLACEHOLDER_KEYS.contains(&api_key.as_str()) {
            anyhow::bail!("GEMINI_API_KEY is not configured. Please set a valid API key in .env");
        }

        let openai_config = OpenAIConfig::new()
            .with_api_base(&config.api_base)
            .with_api_key(&api_key);

        info!(model = %config.model, api_base = %config.api_base, "Tutor AI configured");

        Ok(Self {
            client: Client::with_config(openai_config),
            model: config.model.clone(),
        })
    }

    /// 使用中のモデル名
    pub fn model(&self) -> &str {
        &self.model
    }

    /// 質問を送り、回答をストリーミング表示しながら全文を返す。
    ///
    /// `transcript` にはこの質問を含めない（呼び出し元が回答後に追加する）。
    pub async fn ask(
        &self,
        transcript: &Transcript,
        question: &str,
        settings: &TutorSettings,
    ) -> Result<TutorReply> {
        let messages = build_messages(transcript, question, settings)?;

        debug!(
            model = %self.model,
            message_count = messages.len(),
            difficulty = %settings.difficulty,
            topic = %settings.topic,
            "Sending question to tutor model"
        );

        let request = CreateChatCompletionRequest {
            model: self.model.clone(),
            messages,
            stream: Some(true),
            ..Default::default()
        };

        let result = process_stream(&self.client, request).await?;

        if result.full_text.is_empty() && !result.interrupted {
            warn!(question = %question, "Tutor model returned an empty reply");
        } else {
            info!(
                reply_length = result.full_text.len(),
                interrupted = result.interrupted,
                "Tutor reply received"
            );
        }

        Ok(TutorReply {
            text: result.full_text,
            interrupted: result.interrupted,
        })
    }

    /// グラフ用のデータ点を生成 AI に問い合わせる。
    ///
    /// 応答は JSON データとして解釈するだけで、コードとして実行することはない。
    pub async fn generate_graph(&self, description: &str) -> Result<GraphSpec> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(GRAPH_PROMPT)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(description)
                .build()?
                .into(),
        ];

        let request = CreateChatCompletionRequest {
            model: self.model.clone(),
            messages,
            ..Default::default()
        };

        debug!(description = %description, "Requesting graph data");

        let spinner = tutor_spinner("Plotting...");
        let response = self.client.chat().create(request).await;
        spinner.finish_and_clear();

        let response = response.context("graph request failed")?;
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .context("missing field: graph response contained no choices")?;

        debug!(response_length = text.len(), "Graph data received");
        parse_graph(&text)
    }
}

/// `[system, ...過去のトランスクリプト, user(タグ付き質問)]` を組み立てる。
///
/// 過去のユーザー発言はタグなしで保存されているため、そのまま送る。
pub fn build_messages(
    transcript: &Transcript,
    question: &str,
    settings: &TutorSettings,
) -> Result<Vec<ChatCompletionRequestMessage>> {
    let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(transcript.len() + 2);

    messages.push(
        ChatCompletionRequestSystemMessageArgs::default()
            .content(SYSTEM_PROMPT)
            .build()?
            .into(),
    );

    for message in transcript.iter() {
        let built: ChatCompletionRequestMessage = match message.role {
            Role::User => ChatCompletionRequestUserMessageArgs::default()
                .content(message.content.as_str())
                .build()?
                .into(),
            Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(message.content.as_str())
                .build()?
                .into(),
        };
        messages.push(built);
    }

    messages.push(
        ChatCompletionRequestUserMessageArgs::default()
            .content(decorate_question(question, settings))
            .build()?
            .into(),
    );

    Ok(messages)
}
