/// ドメイン層のエラー定義
///
/// 利用者の入力に起因する制約違反を表現する。
/// 外部クレートのエラーは含まない。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// ファイルが見つからない
    #[error("video file not found at {path}")]
    FileNotFound { path: String },

    /// ディレクトリが指定された（ファイルが期待される場所）
    #[error("'{path}' is a directory, not a file")]
    NotAFile { path: String },

    /// コマンド引数が足りない
    #[error("missing argument: {name}")]
    MissingArgument { name: String, usage: String },

    /// 動画IDとして使えない文字列
    #[error("invalid video id: '{id}'")]
    InvalidVideoId { id: String },
}

impl DomainError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn not_a_file(path: impl Into<String>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    pub fn missing_argument(name: impl Into<String>, usage: impl Into<String>) -> Self {
        Self::MissingArgument {
            name: name.into(),
            usage: usage.into(),
        }
    }

    pub fn invalid_video_id(id: impl Into<String>) -> Self {
        Self::InvalidVideoId { id: id.into() }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::UserError
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::FileNotFound { .. } => {
                Some("Check 'video_path' in your config file and ensure the file exists.")
            }
            Self::NotAFile { .. } => Some("'video_path' must point to a file, not a directory."),
            Self::MissingArgument { usage, .. } => Some(usage.as_str()),
            Self::InvalidVideoId { .. } => {
                Some("Video ids contain only letters, digits, '-' and '_'.")
            }
        }
    }
}
