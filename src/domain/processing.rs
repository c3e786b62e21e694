/// ドメイン層: 動画の処理状況の判定
///
/// Rutubeの動画詳細（status / action_reason / is_deleted）から
/// 処理が終わったか、失敗したか、まだ処理中かを決める。
use crate::api::types::VideoDetails;
use serde::Serialize;
use std::fmt;

/// 処理状況
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingState {
    /// 公開可能、またはモデレーション待ち
    Ready,
    /// エラー、または処理途中以外の理由で削除された
    Failed,
    /// まだ処理中
    Processing,
}

impl ProcessingState {
    pub fn of(video: &VideoDetails) -> Self {
        let status = video.status.as_deref();
        let reason = video.action_reason_name();

        if status == Some("ready") || reason == Some("moderation") {
            return Self::Ready;
        }

        let deleted = video.is_deleted.unwrap_or(false);
        if status == Some("error") || (deleted && reason != Some("downloading_video")) {
            return Self::Failed;
        }

        Self::Processing
    }
}

impl fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ready => "ready",
            Self::Failed => "failed",
            Self::Processing => "processing",
        };
        f.write_str(label)
    }
}
