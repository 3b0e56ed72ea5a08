//! ZenQuotes: ランダムな名言を 1 件取得する

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::info;

use super::str_field;
use crate::config::QuotesConfig;
use crate::http;

/// 名言 1 件
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

/// `GET /api/random` を呼び出して名言を取得する。
pub async fn fetch_quote(client: &Client, config: &QuotesConfig) -> Result<Quote> {
    let url = format!("{}/api/random", config.base_url.trim_end_matches('/'));
    let body = http::get_json(client, "ZenQuotes", &url).await?;
    let quote = parse_quote(&body)?;
    info!(author = %quote.author, "Quote fetched");
    Ok(quote)
}

/// `[{"q": "...", "a": "..."}]` 形式のレスポンスから先頭の名言を取り出す。
pub fn parse_quote(body: &Value) -> Result<Quote> {
    let first = body
        .as_array()
        .and_then(|items| items.first())
        .context("missing field: response contains no quotes")?;

    Ok(Quote {
        text: str_field(first, "q")?.to_string(),
        author: str_field(first, "a")?.to_string(),
    })
}

/// 表示用の 2 行を返す。
pub fn format_quote(quote: &Quote) -> String {
    format!("\"{}\"\n- {}", quote.text, quote.author)
}
