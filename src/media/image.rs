//! 画像生成: 固定のエンドポイント一覧を順に試し、最初に HTTP 200 を返したものを使う

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, info, warn};

use super::write_output;

/// エンドポイントテンプレート中の置換対象
const PROMPT_PLACEHOLDER: &str = "{prompt}";

/// 生成された画像
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub path: PathBuf,
    /// 実際に応答したエンドポイント
    pub endpoint: String,
}

/// テンプレートの `{prompt}` を URL エンコード済みの説明文で置き換える。
pub fn render_endpoint(template: &str, prompt: &str) -> Result<Url> {
    // パスセグメントとしてエンコードするため、ダミー URL に push して取り出す
    let mut scratch = Url::parse("http://placeholder.invalid/").context("invalid scratch URL")?;
    scratch
        .path_segments_mut()
        .map_err(|_| anyhow::anyhow!("cannot encode prompt"))?
        .pop_if_empty()
        .push(prompt);
    let encoded = scratch.path().trim_start_matches('/').to_string();

    let url = template.replace(PROMPT_PLACEHOLDER, &encoded);
    Url::parse(&url).with_context(|| format!("invalid image endpoint: {template}"))
}

/// Content-Type から保存用の拡張子を決める。
pub fn extension_for(content_type: Option<&str>) -> &'static str {
    match content_type.map(|c| c.split(';').next().unwrap_or("").trim()) {
        Some("image/jpeg") | Some("image/jpg") => "jpg",
        Some("image/webp") => "webp",
        Some("image/gif") => "gif",
        _ => "png",
    }
}

/// エンドポイントを順に試して画像を生成し、`output_dir` に保存する。
///
/// すべて失敗した場合はエラーを返す。HTTP 200 以外はスキップ扱い。
pub async fn generate_image(
    client: &Client,
    endpoints: &[String],
    prompt: &str,
    output_dir: &Path,
) -> Result<GeneratedImage> {
    for template in endpoints {
        let url = match render_endpoint(template, prompt) {
            Ok(url) => url,
            Err(e) => {
                warn!(template = %template, error = %e, "Skipping invalid image endpoint");
                continue;
            }
        };

        debug!(url = %url, "Trying image endpoint");
        let response = match client.get(url.clone()).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(url = %url, error = %e, "Image endpoint request failed");
                continue;
            }
        };

        if response.status() != StatusCode::OK {
            warn!(url = %url, status = response.status().as_u16(), "Image endpoint returned non-200");
            continue;
        }

        let ext = extension_for(
            response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        );
        let bytes = match response.bytes().await {
            Ok(b) => b,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to read image body");
                continue;
            }
        };

        let path = write_output(output_dir, "image", ext, &bytes)?;
        info!(url = %url, path = %path.display(), size = bytes.len(), "Image generated");
        return Ok(GeneratedImage {
            path,
            endpoint: template.clone(),
        });
    }

    anyhow::bail!("Image generation failed: all endpoints were unavailable")
}
