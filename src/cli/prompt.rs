use std::borrow::Cow;

use reedline::{Color, Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

use super::color::{cyan, green, paint_difficulty};
use crate::ai::{Difficulty, Topic, TutorSettings};

/// チューター REPL のプロンプト。
///
/// ```text
/// 🔬 tutor [Advanced · Calculus]
/// ❯
/// ```
///
/// Standard / General の場合はタグを省略する。
pub struct TutorPrompt {
    settings: TutorSettings,
}

impl TutorPrompt {
    pub fn new(settings: TutorSettings) -> Self {
        Self { settings }
    }

    /// `/difficulty` や `/topic` による変更を反映する。
    pub fn update_settings(&mut self, settings: TutorSettings) {
        self.settings = settings;
    }

    /// 左プロンプトのタグ部分（色なし）
    fn tag(&self) -> Option<String> {
        let mut parts = Vec::new();
        if self.settings.difficulty != Difficulty::Standard {
            parts.push(self.settings.difficulty.as_str());
        }
        if self.settings.topic != Topic::General {
            parts.push(self.settings.topic.as_str());
        }
        (!parts.is_empty()).then(|| parts.join(" · "))
    }
}

impl Prompt for TutorPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        let label = cyan("🔬 tutor");
        match self.tag() {
            Some(tag) => Cow::Owned(format!(
                "{label} {}\n",
                paint_difficulty(self.settings.difficulty, &format!("[{tag}]"))
            )),
            None => Cow::Owned(format!("{label}\n")),
        }
    }

    fn get_prompt_color(&self) -> Color {
        Color::White
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Owned(green("\u{276f} "))
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(" :: ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "(failed) ",
        };
        Cow::Owned(format!("{prefix}(search: '{}') ", history_search.term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_have_no_tag() {
        let prompt = TutorPrompt::new(TutorSettings::default());
        assert!(prompt.tag().is_none());
        let left = prompt.render_prompt_left();
        assert!(!left.contains("[Standard"));
        assert!(!left.contains(" · "));
        assert!(left.ends_with('\n'));
    }

    #[test]
    fn tag_lists_non_default_settings() {
        let mut prompt = TutorPrompt::new(TutorSettings::default());
        prompt.update_settings(TutorSettings {
            difficulty: Difficulty::Advanced,
            topic: Topic::Calculus,
        });
        assert_eq!(prompt.tag().as_deref(), Some("Advanced · Calculus"));

        prompt.update_settings(TutorSettings {
            difficulty: Difficulty::Standard,
            topic: Topic::Geometry,
        });
        assert_eq!(prompt.tag().as_deref(), Some("Geometry"));
    }
}
