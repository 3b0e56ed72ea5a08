//! チューターの付加機能: 画像生成と音声合成
//!
//! どちらも生成物をファイルとして出力ディレクトリに書き出し、パスを返す。

pub mod image;
pub mod speech;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

/// `<dir>/<kind>-YYYYmmdd-HHMMSS.<ext>` 形式の出力パスを作る。
/// 同名ファイルが既にあれば `-2`, `-3`, ... を付ける。
pub fn output_path(dir: &Path, kind: &str, ext: &str) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    let base = format!("{kind}-{stamp}");

    let mut candidate = dir.join(format!("{base}.{ext}"));
    let mut n = 2;
    while candidate.exists() {
        candidate = dir.join(format!("{base}-{n}.{ext}"));
        n += 1;
    }
    candidate
}

/// 出力ディレクトリを作成し、バイト列を書き出す。
pub fn write_output(dir: &Path, kind: &str, ext: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    let path = output_path(dir, kind, ext);
    std::fs::write(&path, bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
