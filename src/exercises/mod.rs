//! 文字列操作の練習問題とスパイ・コードネームジェネレーター

pub mod check_string;
pub mod codename;
