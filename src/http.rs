//! 共有 HTTP クライアント
//!
//! すべての API 呼び出しは 1 リクエスト 1 レスポンスの同期的な流れで行う。
//! リトライやキャッシュは行わない。

use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::HttpConfig;

/// User-Agent ヘッダー値
const USER_AGENT: &str = concat!("apilab/", env!("CARGO_PKG_VERSION"));

/// タイムアウトと User-Agent を設定した `reqwest::Client` を構築する。
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("failed to build HTTP client")
}

/// GET リクエストを送り、レスポンスボディを JSON として返す。
///
/// `api` はエラーメッセージに含める API 名。
/// HTTP ステータスが 2xx 以外の場合はボディを読まずにエラーとする。
pub async fn get_json(client: &Client, api: &str, url: &str) -> Result<Value> {
    let response = send(client, api, url).await?;

    let status = response.status();
    if !status.is_success() {
        warn!(api, status = status.as_u16(), "Non-success HTTP status");
        bail!("network failure: {api} returned HTTP {status}");
    }

    read_json(response, api).await
}

/// ステータスに関係なくボディを JSON として読み、ステータスと一緒に返す。
///
/// エラー内容をボディに載せる API（News API の `{"status": "error"}` 等）向け。
pub async fn get_json_with_status(
    client: &Client,
    api: &str,
    url: &str,
) -> Result<(StatusCode, Value)> {
    let response = send(client, api, url).await?;
    let status = response.status();
    let body = read_json(response, api).await?;
    Ok((status, body))
}

async fn send(client: &Client, api: &str, url: &str) -> Result<Response> {
    debug!(api, url = %redact_api_key(url), "Sending GET request");

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("network failure: {api} request failed"))?;

    debug!(api, status = response.status().as_u16(), "Received response");
    Ok(response)
}

async fn read_json(response: Response, api: &str) -> Result<Value> {
    let status = response.status();
    response
        .json::<Value>()
        .await
        .with_context(|| format!("{api} returned a body that is not valid JSON (HTTP {status})"))
}

/// ログ出力用に URL 中の `apiKey=` パラメータを伏せ字にする。
pub fn redact_api_key(url: &str) -> String {
    match url.find("apiKey=") {
        Some(idx) => {
            let start = idx + "apiKey=".len();
            let end = url[start..]
                .find('&')
                .map(|i| start + i)
                .unwrap_or(url.len());
            format!("{}***{}", &url[..start], &url[end..])
        }
        None => url.to_string(),
    }
}


/// テスト用の簡易 HTTP サーバー。
///
/// 127.0.0.1 の空きポートで待ち受け、リクエストパスの前方一致で
/// 最初に見つかったルートの固定レスポンスを返す（接続ごとに `Connection: close`）。
#[cfg(test)]
pub(crate) mod test_server {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[derive(Clone)]
    pub struct Route {
        pub prefix: &'static str,
        pub status: u16,
        pub content_type: &'static str,
        pub body: Vec<u8>,
    }

    impl Route {
        pub fn json(prefix: &'static str, status: u16, body: &str) -> Self {
            Self {
                prefix,
                status,
                content_type: "application/json",
                body: body.as_bytes().to_vec(),
            }
        }

        pub fn bytes(prefix: &'static str, status: u16, content_type: &'static str, body: &[u8]) -> Self {
            Self {
                prefix,
                status,
                content_type,
                body: body.to_vec(),
            }
        }
    }

    /// プロキシ設定の影響を受けないクライアント
    pub fn client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    /// サーバーを起動し、`http://127.0.0.1:<port>` を返す。
    pub async fn spawn(routes: Vec<Route>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let routes = routes.clone();
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => request.extend_from_slice(&buf[..n]),
                        }
                    }

                    let head = String::from_utf8_lossy(&request);
                    let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                    let route = routes.iter().find(|r| path.starts_with(r.prefix));

                    let (status, content_type, body) = match route {
                        Some(r) => (r.status, r.content_type, r.body.clone()),
                        None => (404, "text/plain", b"not found".to_vec()),
                    };
                    let header = format!(
                        "HTTP/1.1 {status} Test\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        body.len()
                    );
                    let _ = socket.write_all(header.as_bytes()).await;
                    let _ = socket.write_all(&body).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        format!("http://{addr}")
    }
}
