/// 設定管理モジュール
///
/// 2層の設定構造を提供します:
/// 1. AppConfig - コンパイル時に確定する静的設定（APP_CONFIG）
/// 2. UploaderConfig - 実行時にTOMLから読み込まれる利用者ごとの設定
///
/// # 使用例
///
/// ```ignore
/// use crate::config::{APP_CONFIG, UploaderConfig};
///
/// let endpoint = APP_CONFIG.api.endpoint;
///
/// // load時に自動検証
/// let config = UploaderConfig::load(None)?;
/// ```
pub mod app;
pub mod error;
pub mod permissions;
pub mod user;

pub use app::APP_CONFIG;
pub use user::UploaderConfig;
