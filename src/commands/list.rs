use crate::api::auth::Credentials;
use crate::api::client::ApiClient;
use crate::api::error::InfraError;
use crate::api::rutube::RutubeClient;
use crate::api::types;
use crate::commands::result::{CommandResult, ListResult};
use crate::config::{APP_CONFIG, UploaderConfig};
use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

/// リストコマンドを実行する
///
/// プロフィールから利用者IDを取り出し、その利用者の動画をすべて取得します。
///
/// # エラー
/// 認証できない場合は `InfraError::NotAuthorized`、
/// プロフィールにIDが無い場合は `InfraError::InvalidResponse`。
pub async fn execute(
    config: &UploaderConfig,
    api: ApiClient,
    progress: &mut dyn Write,
) -> Result<CommandResult> {
    let credentials = Credentials::new(config.login.clone(), config.password.clone());
    let client = RutubeClient::connect(api, &credentials)
        .await
        .context("Failed to initialize Rutube client")?;

    if !client.is_authorized() {
        return Err(InfraError::not_authorized("list videos").into());
    }

    let account = client
        .account()
        .info()
        .await
        .context("Failed to fetch account info")?;

    let user_id = types::account_id(&account).ok_or_else(|| {
        InfraError::invalid_response("/api/profile/user/", "profile has no 'id' field")
    })?;

    writeln!(progress, "User ID: {}", user_id)?;

    let videos = client
        .person_videos(&user_id, APP_CONFIG.api.page_size, APP_CONFIG.api.max_pages)
        .await
        .context("Failed to fetch video list")?;

    info!(count = videos.len(), "listed channel videos");

    let total_count = videos.len();
    Ok(CommandResult::List(ListResult {
        user_id,
        videos,
        total_count,
    }))
}
