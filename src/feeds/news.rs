//! News API: キーワードに関する最新ニュースを取得する

use anyhow::{Context, Result};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::str_field;
use crate::config::NewsConfig;
use crate::http;

/// 見出し行・区切り線の幅
const RULE_WIDTH: usize = 60;

/// 記事 1 件
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// 削除済み記事などでは null（表示時は省略）
    pub title: Option<String>,
    pub source_name: String,
    pub published_at: String,
    pub url: String,
    pub description: Option<String>,
}

/// News API のレスポンス
#[derive(Debug, Clone, PartialEq)]
pub enum NewsReport {
    /// `status == "ok"`
    Articles(Vec<Article>),
    /// `status != "ok"`。API が返した `message`（なければ `Unknown error`）
    ApiError(String),
}

/// `NEWS_API_KEY` 環境変数から API キーを読み込む。
pub fn api_key_from_env() -> Result<String> {
    let key = std::env::var("NEWS_API_KEY")
        .context("NEWS_API_KEY is not set. Get a key at https://newsapi.org and put it in .env")?;
    if key.trim().is_empty() {
        anyhow::bail!("NEWS_API_KEY is empty");
    }
    Ok(key)
}

/// `GET /v2/everything?q=<query>&sortBy=publishedAt&apiKey=<key>` を呼び出す。
pub async fn fetch_news(
    client: &Client,
    config: &NewsConfig,
    api_key: &str,
    query: &str,
    limit: usize,
) -> Result<NewsReport> {
    let url = Url::parse_with_params(
        &format!("{}/v2/everything", config.base_url.trim_end_matches('/')),
        &[("q", query), ("sortBy", "publishedAt"), ("apiKey", api_key)],
    )
    .context("invalid News API base URL")?;

    // News API はエラー時も 4xx で `{"status": "error", "message": ..}` を返す
    let (status, body) = http::get_json_with_status(client, "News API", url.as_str()).await?;
    debug!(status = status.as_u16(), "News API responded");
    let report = parse_news(&body, limit)?;

    match report {
        NewsReport::Articles(ref articles) => {
            info!(query, count = articles.len(), "News fetched")
        }
        NewsReport::ApiError(ref message) => warn!(query, message = %message, "News API error"),
    }
    Ok(report)
}

/// レスポンスを解析し、先頭 `limit` 件の記事を返す。
pub fn parse_news(body: &Value, limit: usize) -> Result<NewsReport> {
    let status = str_field(body, "status")?;
    if status != "ok" {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error");
        return Ok(NewsReport::ApiError(message.to_string()));
    }

    let items = body
        .get("articles")
        .and_then(Value::as_array)
        .context("missing field: 'articles'")?;

    let articles = items
        .iter()
        .take(limit)
        .map(parse_article)
        .collect::<Result<Vec<_>>>()?;

    Ok(NewsReport::Articles(articles))
}

fn parse_article(item: &Value) -> Result<Article> {
    let source_name = item
        .get("source")
        .map(|source| str_field(source, "name"))
        .transpose()?
        .context("missing field: 'source'")?;

    let title = item
        .get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let description = item
        .get("description")
        .and_then(Value::as_str)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    Ok(Article {
        title,
        source_name: source_name.to_string(),
        published_at: str_field(item, "publishedAt")?.to_string(),
        url: str_field(item, "url")?.to_string(),
        description,
    })
}

/// 記事一覧をバナー付きで整形する。
pub fn format_articles(query: &str, articles: &[Article]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = format!(
        "{rule}\nLATEST NEWS ABOUT {}\n{rule}\n",
        query.to_uppercase()
    );

    for (i, article) in articles.iter().enumerate() {
        match article.title {
            Some(ref title) => out.push_str(&format!("\n{}. {title}\n", i + 1)),
            None => out.push_str(&format!("\n{}.\n", i + 1)),
        }
        out.push_str(&format!("   Source: {}\n", article.source_name));
        out.push_str(&format!("   Published: {}\n", article.published_at));
        out.push_str(&format!("   URL: {}\n", article.url));
        if let Some(ref description) = article.description {
            out.push_str(&format!("   Description: {description}\n"));
        }
    }

    out
}

/// API エラー時のメッセージ。
pub fn format_api_error(message: &str) -> String {
    format!("Error fetching news: {message}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::test_server;
    use serde_json::json;

    fn sample_body() -> Value {
        json!({
            "status": "ok",
            "totalResults": 3,
            "articles": [
                {
                    "source": {"id": null, "name": "The Star"},
                    "title": "Monsoon season begins",
                    "description": "Heavy rain expected.",
                    "url": "https://example.com/1",
                    "publishedAt": "2025-01-02T03:04:05Z"
                },
                {
                    "source": {"id": "bbc-news", "name": "BBC News"},
                    "title": "Economy grows",
                    "description": null,
                    "url": "https://example.com/2",
                    "publishedAt": "2025-01-02T01:00:00Z"
                },
                {
                    "source": {"name": "Third"},
                    "title": "Third story",
                    "description": "",
                    "url": "https://example.com/3",
                    "publishedAt": "2025-01-01T00:00:00Z"
                }
            ]
        })
    }

    #[test]
    fn parse_news_limits_article_count() {
        match parse_news(&sample_body(), 2).unwrap() {
            NewsReport::Articles(articles) => {
                assert_eq!(articles.len(), 2);
                assert_eq!(articles[0].source_name, "The Star");
                assert_eq!(articles[0].description.as_deref(), Some("Heavy rain expected."));
                assert!(articles[1].description.is_none());
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[test]
    fn empty_description_is_treated_as_absent() {
        match parse_news(&sample_body(), 10).unwrap() {
            NewsReport::Articles(articles) => {
                assert_eq!(articles.len(), 3);
                assert!(articles[2].description.is_none());
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[test]
    fn error_status_returns_api_message() {
        let body = json!({"status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid."});
        assert_eq!(
            parse_news(&body, 5).unwrap(),
            NewsReport::ApiError("Your API key is invalid.".to_string())
        );
    }

    #[test]
    fn error_status_without_message_is_unknown() {
        let body = json!({"status": "error"});
        assert_eq!(
            parse_news(&body, 5).unwrap(),
            NewsReport::ApiError("Unknown error".to_string())
        );
    }

    #[test]
    fn missing_status_is_an_error() {
        assert!(parse_news(&json!({"articles": []}), 5).is_err());
    }

    #[test]
    fn format_articles_numbers_from_one() {
        let articles = match parse_news(&sample_body(), 2).unwrap() {
            NewsReport::Articles(a) => a,
            other => panic!("unexpected report: {other:?}"),
        };
        let out = format_articles("Malaysia", &articles);

        assert!(out.starts_with(&"=".repeat(60)));
        assert!(out.contains("LATEST NEWS ABOUT MALAYSIA"));
        assert!(out.contains("\n1. Monsoon season begins\n"));
        assert!(out.contains("   Source: The Star\n"));
        assert!(out.contains("   Description: Heavy rain expected.\n"));
        assert!(out.contains("\n2. Economy grows\n"));
        assert_eq!(out.matches("Description:").count(), 1);
    }

    #[test]
    fn null_title_is_left_out() {
        let body = json!({
            "status": "ok",
            "articles": [{
                "source": {"name": "Wire"},
                "title": null,
                "description": null,
                "url": "https://example.com/x",
                "publishedAt": "2025-01-01T00:00:00Z"
            }]
        });
        let articles = match parse_news(&body, 5).unwrap() {
            NewsReport::Articles(a) => a,
            other => panic!("unexpected report: {other:?}"),
        };
        assert!(articles[0].title.is_none());

        let out = format_articles("x", &articles);
        assert!(out.contains("\n1.\n   Source: Wire\n"));
        assert!(!out.contains("untitled"));
    }

    #[tokio::test]
    async fn fetch_news_reads_error_body_on_4xx() {
        let base = test_server::spawn(vec![test_server::Route::json(
            "/v2/everything",
            401,
            r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#,
        )])
        .await;
        let config = NewsConfig {
            base_url: base,
            ..NewsConfig::default()
        };

        let report = fetch_news(&test_server::client(), &config, "bad", "Malaysia", 5)
            .await
            .unwrap();
        assert_eq!(
            report,
            NewsReport::ApiError("Your API key is invalid.".to_string())
        );
    }

    #[test]
    fn format_api_error_prefix() {
        assert_eq!(format_api_error("boom"), "Error fetching news: boom");
    }
}
