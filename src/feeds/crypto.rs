//! CoinGecko: 暗号資産の現在価格を取得する

use anyhow::{Context, Result};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, info};

use super::{capitalize, format_usd};
use crate::config::CryptoConfig;
use crate::http;

/// 1 銘柄の価格
#[derive(Debug, Clone, PartialEq)]
pub struct CoinPrice {
    /// CoinGecko の銘柄 ID（`bitcoin` 等、小文字）
    pub id: String,
    pub vs_currency: String,
    pub price: f64,
}

/// `GET /simple/price?ids=<id>&vs_currencies=<vs>` を呼び出す。
///
/// ID がレスポンスに含まれない場合は `Ok(None)`（銘柄が見つからない）。
pub async fn fetch_price(
    client: &Client,
    config: &CryptoConfig,
    coin: &str,
) -> Result<Option<CoinPrice>> {
    let id = normalize_coin_id(coin);
    let url = Url::parse_with_params(
        &format!("{}/simple/price", config.base_url.trim_end_matches('/')),
        &[("ids", id.as_str()), ("vs_currencies", config.vs_currency.as_str())],
    )
    .context("invalid CoinGecko base URL")?;

    let body = http::get_json(client, "CoinGecko", url.as_str()).await?;
    let price = parse_price(&body, &id, &config.vs_currency)?;

    match price {
        Some(ref p) => info!(coin = %p.id, price = p.price, "Price fetched"),
        None => debug!(coin = %id, "Coin not present in response"),
    }
    Ok(price)
}

/// 入力された銘柄名を CoinGecko の ID 形式（前後空白除去・小文字）に揃える。
pub fn normalize_coin_id(coin: &str) -> String {
    coin.trim().to_lowercase()
}

/// `{"bitcoin": {"usd": 67432.1}}` 形式のレスポンスから価格を取り出す。
pub fn parse_price(body: &Value, id: &str, vs_currency: &str) -> Result<Option<CoinPrice>> {
    let entry = match body.get(id) {
        Some(entry) => entry,
        None => return Ok(None),
    };

    let price = entry
        .get(vs_currency)
        .and_then(Value::as_f64)
        .with_context(|| format!("missing field: '{id}.{vs_currency}'"))?;

    Ok(Some(CoinPrice {
        id: id.to_string(),
        vs_currency: vs_currency.to_string(),
        price,
    }))
}

/// `Bitcoin Price: $67,432.10 USD` 形式で整形する。
pub fn format_price(price: &CoinPrice) -> String {
    format!(
        "{} Price: ${} {}",
        capitalize(&price.id),
        format_usd(price.price),
        price.vs_currency.to_uppercase()
    )
}

/// 銘柄が見つからなかったときのメッセージ。
pub fn format_not_found(coin: &str) -> String {
    format!("Cryptocurrency '{coin}' not found. Please check the name and try again.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::test_server;
    use serde_json::json;

    #[test]
    fn parse_price_reads_nested_value() {
        let body = json!({"bitcoin": {"usd": 67432.1}});
        let price = parse_price(&body, "bitcoin", "usd").unwrap().unwrap();
        assert_eq!(price.id, "bitcoin");
        assert_eq!(price.price, 67432.1);
    }

    #[test]
    fn parse_price_accepts_integer_values() {
        let body = json!({"ethereum": {"usd": 3000}});
        let price = parse_price(&body, "ethereum", "usd").unwrap().unwrap();
        assert_eq!(price.price, 3000.0);
    }

    #[test]
    fn unknown_coin_is_not_an_error() {
        let body = json!({});
        assert!(parse_price(&body, "notacoin", "usd").unwrap().is_none());
    }

    #[test]
    fn missing_currency_is_an_error() {
        let body = json!({"bitcoin": {"eur": 1.0}});
        let err = parse_price(&body, "bitcoin", "usd").unwrap_err();
        assert!(err.to_string().contains("bitcoin.usd"));
    }

    #[test]
    fn format_price_matches_script_output() {
        let price = CoinPrice {
            id: "bitcoin".to_string(),
            vs_currency: "usd".to_string(),
            price: 67432.1,
        };
        assert_eq!(format_price(&price), "Bitcoin Price: $67,432.10 USD");
    }

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize_coin_id("  DogeCoin \n"), "dogecoin");
    }

    #[test]
    fn not_found_message_quotes_the_name() {
        assert_eq!(
            format_not_found("foo"),
            "Cryptocurrency 'foo' not found. Please check the name and try again."
        );
    }

    #[tokio::test]
    async fn fetch_price_reports_rate_limit_as_failure() {
        let base = test_server::spawn(vec![test_server::Route::json(
            "/simple/price",
            429,
            r#"{"status":{"error_code":429,"error_message":"You've exceeded the Rate Limit."}}"#,
        )])
        .await;
        let config = CryptoConfig {
            base_url: base,
            ..CryptoConfig::default()
        };

        let err = fetch_price(&test_server::client(), &config, "bitcoin")
            .await
            .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("CoinGecko"));
        assert!(msg.contains("429"));
    }

    #[tokio::test]
    async fn fetch_price_parses_success_body() {
        let base = test_server::spawn(vec![test_server::Route::json(
            "/simple/price",
            200,
            r#"{"bitcoin":{"usd":67432.1}}"#,
        )])
        .await;
        let config = CryptoConfig {
            base_url: base,
            ..CryptoConfig::default()
        };

        let price = fetch_price(&test_server::client(), &config, "Bitcoin")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(format_price(&price), "Bitcoin Price: $67,432.10 USD");
    }

    #[tokio::test]
    async fn fetch_price_unknown_coin_is_none() {
        let base =
            test_server::spawn(vec![test_server::Route::json("/simple/price", 200, "{}")]).await;
        let config = CryptoConfig {
            base_url: base,
            ..CryptoConfig::default()
        };

        let price = fetch_price(&test_server::client(), &config, "notacoin")
            .await
            .unwrap();
        assert!(price.is_none());
    }
}
