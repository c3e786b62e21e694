/// info コマンド
///
/// 動画ファイルの存在を確認し、Rutubeに認証してアカウント情報を取得します。
/// アップロードは行いません。
use crate::api::auth::Credentials;
use crate::api::session::{HostConnector, HostSession};
use crate::commands::result::{CommandResult, InfoOutcome, InfoResult, UploadSettings};
use crate::config::UploaderConfig;
use crate::domain::validator;
use anyhow::{Context, Result};
use std::io::Write;
use tracing::{info, warn};

/// info コマンドを実行する
///
/// # 引数
/// * `config` - 検証済みのアップローダー設定
/// * `connector` - セッションを作るもの（作成時に認証が走る）
/// * `progress` - 進捗行の出力先
///
/// # エラー
/// 動画ファイルが無い場合だけ Err を返す。
/// 認証・取得中のエラーはすべて `InfoOutcome::Failed` として結果に含める。
pub async fn execute<C: HostConnector>(
    config: &UploaderConfig,
    connector: &C,
    progress: &mut dyn Write,
) -> Result<CommandResult> {
    writeln!(progress, "--- Rutube API Uploader ---")?;

    validator::ensure_file_exists(&config.video_path)?;

    let credentials = Credentials::new(config.login.clone(), config.password.clone());

    let outcome = match authorize_and_fetch(connector, &credentials, progress).await {
        Ok(outcome) => outcome,
        Err(error) => {
            warn!(error = %format!("{:#}", error), "info command failed");
            InfoOutcome::failed(&error)
        }
    };

    Ok(CommandResult::Info(InfoResult {
        login: credentials.masked_login(),
        video_path: config.video_path.display().to_string(),
        upload_settings: UploadSettings {
            title: config.title.clone(),
            description: config.description.clone(),
            category_id: config.category_id,
            is_hidden: config.is_hidden,
        },
        outcome,
    }))
}

/// クライアント作成からアカウント情報取得まで
///
/// ここで起きたエラーは呼び出し側でまとめて捕捉する。
async fn authorize_and_fetch<C: HostConnector>(
    connector: &C,
    credentials: &Credentials,
    progress: &mut dyn Write,
) -> Result<InfoOutcome> {
    writeln!(progress, "1. Initializing client and authorizing...")?;

    let session = connector
        .connect(credentials)
        .await
        .context("Failed to initialize Rutube client")?;

    if !session.is_authorized() {
        writeln!(progress, "❌ Authorization failed (no token returned).")?;
        info!(login = %credentials.masked_login(), "not authorized, skipping account info");
        return Ok(InfoOutcome::NotAuthorized);
    }
    writeln!(progress, "✅ Authorized successfully!")?;

    writeln!(progress, "2. Fetching account info...")?;
    let account = session
        .account_info()
        .await
        .context("Failed to fetch account info")?;

    Ok(InfoOutcome::Fetched { account })
}
