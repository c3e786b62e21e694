/// ステータスコマンド
///
/// 指定した動画の処理状況（公開可能・失敗・処理中）を確認します。
use crate::api::auth::Credentials;
use crate::api::client::ApiClient;
use crate::api::error::InfraError;
use crate::api::rutube::RutubeClient;
use crate::commands::result::{CommandResult, StatusResult};
use crate::config::UploaderConfig;
use crate::domain::processing::ProcessingState;
use crate::domain::validator;
use anyhow::{Context, Result};
use std::io::Write;

/// ステータスコマンドを実行
///
/// # 引数
/// * `config` - 検証済みのアップローダー設定
/// * `api` - HTTPクライアント
/// * `video_id` - 確認する動画のID
/// * `progress` - 進捗行の出力先
pub async fn execute(
    config: &UploaderConfig,
    api: ApiClient,
    video_id: &str,
    progress: &mut dyn Write,
) -> Result<CommandResult> {
    let video_id = validator::validate_video_id(video_id)?;

    let credentials = Credentials::new(config.login.clone(), config.password.clone());
    let client = RutubeClient::connect(api, &credentials)
        .await
        .context("Failed to initialize Rutube client")?;

    if !client.is_authorized() {
        return Err(InfraError::not_authorized("check video status").into());
    }

    writeln!(progress, "Checking status for {}...", video_id)?;

    let fetched = client
        .video(video_id)
        .await
        .with_context(|| format!("Failed to fetch video {}", video_id))?;

    let details = fetched.details;
    let state = ProcessingState::of(&details);

    Ok(CommandResult::Status(StatusResult {
        video_id: details.id.clone(),
        action_reason: details.action_reason_name().map(str::to_string),
        title: details.title,
        status: details.status,
        is_hidden: details.is_hidden,
        is_deleted: details.is_deleted,
        state,
        raw: fetched.raw,
    }))
}
