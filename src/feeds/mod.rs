//! 公開 API を 1 回叩いて結果を表示する小さなフィード群
//!
//! 各モジュールは `fetch_*`（HTTP）、`parse_*`（JSON → 型）、`format_*`（表示文字列）
//! の 3 段構成になっている。パーサとフォーマッタは純粋関数なのでネットワークなしでテストできる。

pub mod crypto;
pub mod news;
pub mod quotes;

use anyhow::{Context, Result};
use serde_json::Value;

/// JSON オブジェクトから文字列フィールドを取り出す。欠落時は missing field エラー。
pub(crate) fn str_field<'a>(value: &'a Value, field: &str) -> Result<&'a str> {
    value
        .get(field)
        .and_then(Value::as_str)
        .with_context(|| format!("missing field: '{field}'"))
}

/// 数値を千の位区切り・小数点以下 2 桁で整形する（例: `67,432.10`）。
pub fn format_usd(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// 先頭 1 文字だけを大文字にする（`bitcoin` → `Bitcoin`）。
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
