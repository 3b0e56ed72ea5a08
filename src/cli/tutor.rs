use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use termimad::MadSkin;

use super::color::{dim, red, white};
use crate::ai::{ChatMessage, Role};

/// ユーザーのアバター
pub const USER_AVATAR: &str = "👤";
/// チューターのアバター
pub const TUTOR_AVATAR: &str = "🔬";

/// チューターが発話するときに使う共通関数。
/// 先頭に 🔬 を付与し、白色テキストで表示する。
pub fn tutor_talk(message: &str) {
    println!("{TUTOR_AVATAR} {}", white(message));
}

/// エラー・警告を赤色で表示する。
pub fn tutor_warn(message: &str) {
    println!("{TUTOR_AVATAR} {}", red(message));
}

/// 生成物の保存先などの補足を表示する。
pub fn tutor_notice(message: &str) {
    println!("\n👉 {message}\n");
}

/// AI 処理中に表示するスピナーを生成・開始する。
pub fn tutor_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("🔬 {spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// ストリーミング開始時のプレフィックスを表示する（改行なし）。
pub fn tutor_print_prefix() {
    print!("{TUTOR_AVATAR} ");
}

/// ストリーミング中のテキスト片を表示する（改行なし）。
pub fn tutor_print_chunk(chunk: &str) {
    print!("{}", white(chunk));
}

/// ストリーミング終了時の改行を出力する。
pub fn tutor_print_end() {
    println!();
}

/// トランスクリプトの 1 メッセージを再描画用の文字列にする。
///
/// アシスタントの応答は Markdown としてレンダリングする。
pub fn render_message(skin: &MadSkin, message: &ChatMessage) -> String {
    match message.role {
        Role::User => format!("{USER_AVATAR} {}", message.content),
        Role::Assistant => format!(
            "{TUTOR_AVATAR}\n{}",
            skin.term_text(&message.content)
        ),
    }
}

/// トランスクリプトが空のときの表示
pub fn empty_history_notice() -> String {
    dim("(no messages yet)")
}
