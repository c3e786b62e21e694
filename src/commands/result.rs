/// コマンド実行結果を表す型
///
/// 各コマンドはこの型を返し、プレゼンテーション層で
/// 人間向けと機械向けの出力フォーマットを決定する。
use crate::api::types::{AccountInfo, VideoSummary};
use crate::domain::processing::ProcessingState;
use serde::Serialize;
use serde_json::Value;

/// コマンド実行結果の統一型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Info(InfoResult),
    Status(StatusResult),
    List(ListResult),
    Help,
}

/// info コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct InfoResult {
    /// マスキング済みのログイン
    pub login: String,
    /// 存在確認した動画ファイル
    pub video_path: String,
    /// 設定に書かれたアップロード用の値（未使用）
    pub upload_settings: UploadSettings,
    pub outcome: InfoOutcome,
}

/// 設定ファイルのアップロード関連の値
#[derive(Debug, Clone, Serialize)]
pub struct UploadSettings {
    pub title: String,
    pub description: String,
    pub category_id: u32,
    pub is_hidden: bool,
}

/// 認証とアカウント情報取得の結末
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InfoOutcome {
    /// 認証成功、アカウント情報を取得できた
    Fetched { account: AccountInfo },
    /// トークンが返らなかった（エラーではない）
    NotAuthorized,
    /// クライアント作成か取得の途中で失敗した
    Failed { message: String, trace: Vec<String> },
}

impl InfoOutcome {
    /// 捕捉したエラーから Failed を作る
    ///
    /// message は文脈を含む1行、trace は原因チェーンの各要素。
    pub fn failed(error: &anyhow::Error) -> Self {
        Self::Failed {
            message: format!("{:#}", error),
            trace: error.chain().map(|cause| cause.to_string()).collect(),
        }
    }
}

/// status コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct StatusResult {
    pub video_id: String,
    pub title: Option<String>,
    pub status: Option<String>,
    pub action_reason: Option<String>,
    pub is_hidden: Option<bool>,
    pub is_deleted: Option<bool>,
    pub state: ProcessingState,
    /// APIが返したJSONそのもの（--machine 用）
    #[serde(skip)]
    pub raw: Value,
}

/// list コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ListResult {
    pub user_id: String,
    pub videos: Vec<VideoSummary>,
    pub total_count: usize,
}

impl CommandResult {
    /// 正常終了したコマンドの名前
    pub fn name(&self) -> &'static str {
        match self {
            CommandResult::Info(_) => "info",
            CommandResult::Status(_) => "status",
            CommandResult::List(_) => "list",
            CommandResult::Help => "help",
        }
    }
}
