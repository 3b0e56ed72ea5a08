//! ログ初期化モジュール
//!
//! `tracing` + `tracing-subscriber` を使用して、デバッグログを外部ファイルに出力する。
//! ターミナルにはログを出さない（チャット表示を汚さないため）。
//! ログファイルは `var/logs/` ディレクトリにローカル時刻基準の日次ローテーションで保存される。

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{fmt, EnvFilter};

/// ログファイル名のプレフィックス
const LOG_PREFIX: &str = "apilab.log";

/// ログ行のタイムスタンプをローカル時刻 (RFC 3339) で出力するタイマー
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

/// ローカル日付で日次ローテーションするファイルアペンダー。
///
/// 書き込み時に現在の日付を確認し、日付が変わっていれば新しいファイルを開く。
/// `tracing_appender::non_blocking` と組み合わせて使用する。
struct DailyAppender {
    dir: PathBuf,
    prefix: String,
    current_date: NaiveDate,
    file: File,
}

impl DailyAppender {
    fn new(dir: PathBuf, prefix: &str) -> std::io::Result<Self> {
        let today = Local::now().date_naive();
        let file = Self::open_log_file(&dir, prefix, today)?;
        Ok(Self {
            dir,
            prefix: prefix.to_string(),
            current_date: today,
            file,
        })
    }

    /// 指定した日付のログファイルを開く（なければ作成）。
    fn open_log_file(dir: &Path, prefix: &str, date: NaiveDate) -> std::io::Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(log_file_name(prefix, date)))
    }
}

impl Write for DailyAppender {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let today = Local::now().date_naive();
        if today != self.current_date {
            self.file = Self::open_log_file(&self.dir, &self.prefix, today)?;
            self.current_date = today;
        }
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

/// `apilab.log.YYYY-MM-DD` 形式のファイル名を返す。
fn log_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}.{}", prefix, date.format("%Y-%m-%d"))
}

/// ログの出力先ディレクトリを決定する。
/// `CARGO_MANIFEST_DIR`（開発時）またはカレントディレクトリからの相対パス `var/logs/` を使用する。
fn log_dir() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        return PathBuf::from(manifest_dir).join("var").join("logs");
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("var")
        .join("logs")
}

/// ログシステムを初期化する。
///
/// - ログレベルは `APILAB_LOG` 環境変数で制御（デフォルト: `debug`）
/// - ログファイルは `var/logs/apilab.log.YYYY-MM-DD` に日次ローテーション
/// - フォーマット: タイムスタンプ + レベル + ターゲット + メッセージ
///
/// ログファイルを開けない場合は `None` を返し、ログ出力なしで続行する。
/// 返したガードは `main()` で保持し続ける必要がある（ドロップするとログ出力が停止する）。
pub fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = log_dir();

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!(
            "apilab: warning: failed to create log directory {}: {e}",
            log_dir.display()
        );
        return None;
    }

    let file_appender = match DailyAppender::new(log_dir.clone(), LOG_PREFIX) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!(
                "apilab: warning: failed to create log file in {}: {e}",
                log_dir.display()
            );
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_env("APILAB_LOG").unwrap_or_else(|_| EnvFilter::new("debug"));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(non_blocking)
        .with_timer(LocalTimer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_file(true)
        .init();

    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_name_uses_date_suffix() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(log_file_name(LOG_PREFIX, date), "apilab.log.2025-03-07");
    }

    #[test]
    fn appender_creates_file_for_today() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut appender = DailyAppender::new(tmp.path().to_path_buf(), "test.log").unwrap();
        appender.write_all(b"hello\n").unwrap();
        appender.flush().unwrap();

        let expected = tmp
            .path()
            .join(log_file_name("test.log", Local::now().date_naive()));
        let content = std::fs::read_to_string(expected).unwrap();
        assert_eq!(content, "hello\n");
    }
}
