use std::io::{self, Write};
use std::time::Duration;

/// 1 文字ずつ出力し、毎回フラッシュして `delay` だけ待つ。最後に改行する。
///
/// `delay` が 0 の場合は待機しない（テスト用）。
pub fn typewriter<W: Write + ?Sized>(out: &mut W, text: &str, delay: Duration) -> io::Result<()> {
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        out.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
        out.flush()?;
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
    writeln!(out)
}
