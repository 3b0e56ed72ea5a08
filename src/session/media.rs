//! 付加機能のルーティング: グラフ描画・画像生成・音声合成

use tracing::{info, warn};

use super::commands::MediaRequest;
use super::Session;
use crate::cli::plot::{render_plot, PLOT_HEIGHT, PLOT_WIDTH};
use crate::cli::tutor::{tutor_notice, tutor_spinner, tutor_warn};
use crate::media::image::generate_image;

impl Session {
    /// `MediaRequest` を実行する。失敗はメッセージ表示のみでセッションは続行する。
    pub(super) async fn run_media(&mut self, request: MediaRequest) {
        info!(request = ?request, "Media request");
        match request {
            MediaRequest::Graph(description) => self.graph(&description).await,
            MediaRequest::Image(description) => self.image(&description).await,
            MediaRequest::Speak(text) => self.speak(text).await,
        }
    }

    async fn graph(&self, description: &str) {
        let Some(ref ai) = self.ai_client else {
            tutor_warn("Graph generation needs GEMINI_API_KEY.");
            return;
        };

        match ai.generate_graph(description).await {
            Ok(spec) => {
                info!(title = %spec.title, points = spec.points.len(), "Graph generated");
                println!("{}", render_plot(&spec, PLOT_WIDTH, PLOT_HEIGHT));
            }
            Err(e) => {
                warn!(error = %e, "Graph generation failed");
                tutor_warn(&format!("Graph generation failed: {e:#}"));
            }
        }
    }

    async fn image(&self, description: &str) {
        let spinner = tutor_spinner("Drawing...");
        let result = generate_image(
            &self.http,
            &self.image_endpoints,
            description,
            &self.output_dir,
        )
        .await;
        spinner.finish_and_clear();

        match result {
            Ok(image) => {
                info!(endpoint = %image.endpoint, path = %image.path.display(), "Image generated");
                tutor_notice(&format!("Image saved to {}", image.path.display()));
            }
            Err(e) => {
                warn!(error = %e, "Image generation failed");
                tutor_warn(&format!("{e:#}"));
            }
        }
    }

    async fn speak(&self, text: Option<String>) {
        let Some(ref speaker) = self.speaker else {
            tutor_warn("Text-to-speech needs OPENAI_API_KEY.");
            return;
        };

        let text = match text {
            Some(t) => t,
            None => match self.state.transcript.last_assistant() {
                Some(m) => m.content.clone(),
                None => {
                    tutor_warn("There is no answer to read yet.");
                    return;
                }
            },
        };

        let spinner = tutor_spinner("Recording...");
        let result = speaker.speak(&text, &self.output_dir).await;
        spinner.finish_and_clear();

        match result {
            Ok(path) => tutor_notice(&format!("Audio saved to {}", path.display())),
            Err(e) => {
                warn!(error = %e, "Speech synthesis failed");
                tutor_warn(&format!("Text-to-speech failed: {e:#}"));
            }
        }
    }
}
