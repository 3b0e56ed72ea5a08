//! グラフ生成: 生成 AI が返した JSON データ点の解釈

use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

/// 描画に必要な最小点数
const MIN_POINTS: usize = 2;

/// ```json ... ``` のようなコードフェンスの中身を取り出す
static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)\s*```").expect("valid fence regex")
});

/// 生成 AI が返すグラフ定義
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphSpec {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub x_label: String,
    #[serde(default)]
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
}

/// 応答テキストから JSON を抜き出して `GraphSpec` に変換する。
///
/// コードフェンスがあればその中身を、なければ最初の `{` から最後の `}` までを使う。
/// 有限でない値を含む点は捨て、残りが 2 点未満ならエラー。
pub fn parse_graph(text: &str) -> Result<GraphSpec> {
    let json = extract_json(text).context("graph response did not contain a JSON object")?;

    let mut spec: GraphSpec =
        serde_json::from_str(json).context("graph response is not valid graph JSON")?;

    spec.points.retain(|(x, y)| x.is_finite() && y.is_finite());
    spec.points
        .sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    if spec.points.len() < MIN_POINTS {
        anyhow::bail!(
            "graph response contained {} usable point(s); at least {MIN_POINTS} are needed",
            spec.points.len()
        );
    }

    Ok(spec)
}

fn extract_json(text: &str) -> Option<&str> {
    if let Some(caps) = FENCED_BLOCK.captures(text) {
        if let Some(m) = caps.get(1) {
            return Some(m.as_str());
        }
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}
