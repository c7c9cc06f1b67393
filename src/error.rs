use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("a submission is already in flight")]
    Busy,

    #[error("no generated quiz to save; run `quizforge generate` first")]
    NothingToSave,

    #[error("no form field named `{0}`")]
    UnknownField(String),

    #[error("server reported errors for unknown form fields: {}", .0.join(", "))]
    UnmatchedErrorFields(Vec<String>),

    #[error("no stored session; run `quizforge generate` first")]
    NoSession,

    #[error("{} changed since the quiz was generated; run `quizforge generate` again", .path.display())]
    SourceChanged { path: PathBuf },

    #[error("cannot read {}: {source}", .path.display())]
    SourceFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no usable state directory on this platform")]
    NoStateDir,

    #[error("cannot encode quiz payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("session state i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("unreadable session state: {0} (run `quizforge clear` to reset)")]
    Session(#[from] serde_yaml::Error),
}
