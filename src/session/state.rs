use crate::ai::{Transcript, TutorSettings};

/// REPL セッション中に変化する状態（トランスクリプトと設定）。
/// プロセス終了とともに破棄される。
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub transcript: Transcript,
    pub settings: TutorSettings,
}

impl SessionState {
    pub fn new(settings: TutorSettings) -> Self {
        Self {
            transcript: Transcript::new(),
            settings,
        }
    }
}
