/// 動画ホスティングサービスとのセッション抽象
///
/// `info` コマンドはこのトレイト越しにクライアントを扱う。
/// 本番では `RutubeConnector` / `RutubeClient`、テストではテストダブルを差し込む。
use crate::api::auth::Credentials;
use crate::api::error::InfraError;
use crate::api::types::AccountInfo;
use async_trait::async_trait;

/// 作成済みのセッション
#[async_trait]
pub trait HostSession: Send + Sync {
    /// 作成時の認証でトークンを得られたか
    fn is_authorized(&self) -> bool;

    /// アカウント情報を取得する
    async fn account_info(&self) -> Result<AccountInfo, InfraError>;
}

/// 認証情報からセッションを作るもの
///
/// `connect` は副作用として認証を行う。
#[async_trait]
pub trait HostConnector: Send + Sync {
    type Session: HostSession;

    async fn connect(&self, credentials: &Credentials) -> Result<Self::Session, InfraError>;
}
