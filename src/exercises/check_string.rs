/// `check-string` に引数がないときに使うサンプル入力
pub const SAMPLE_INPUTS: &[&str] = &["The", "Thumbs up", "Theatre can be boring"];

/// 文字列が `The` で始まっていれば `Found it!`、そうでなければ `Nope.` を返す。
///
/// 大文字小文字は区別する（`the end` は `Nope.`）。
pub fn check_string(s: &str) -> &'static str {
    if s.starts_with("The") {
        "Found it!"
    } else {
        "Nope."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_inputs_give_expected_answers() {
        let answers: Vec<&str> = SAMPLE_INPUTS.iter().map(|s| check_string(s)).collect();
        assert_eq!(answers, vec!["Found it!", "Nope.", "Found it!"]);
    }

    #[test]
    fn prefix_is_case_sensitive() {
        assert_eq!(check_string("the end"), "Nope.");
        assert_eq!(check_string("THE END"), "Nope.");
    }

    #[test]
    fn empty_and_short_strings() {
        assert_eq!(check_string(""), "Nope.");
        assert_eq!(check_string("Th"), "Nope.");
    }

    #[test]
    fn leading_whitespace_does_not_match() {
        assert_eq!(check_string(" The"), "Nope.");
    }
}
