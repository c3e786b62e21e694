/// アプリケーション設定モジュール
///
/// コンパイル時に確定する静的設定。実行時には変更できない。
/// 利用者ごとに変わる値（認証情報・動画パス）は `user` モジュールが扱う。

/// アプリケーション全体の設定
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

/// Rutube API 関連の設定
#[derive(Debug, Clone, Copy)]
pub struct ApiConfig {
    /// API のベースURL
    pub endpoint: &'static str,

    /// HTTPリクエストのタイムアウト(秒)
    pub timeout_seconds: u64,

    /// 動画一覧の1ページあたりの件数
    pub page_size: u32,

    /// 動画一覧で辿る最大ページ数
    pub max_pages: u32,
}

/// ロギング関連の設定
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig {
    /// RUST_LOG が未設定のときに使うフィルタ (trace, debug, info, warn, error)
    pub level: &'static str,
}

/// グローバルなアプリケーション設定
pub const APP_CONFIG: AppConfig = AppConfig {
    api: ApiConfig {
        endpoint: "https://rutube.ru",
        timeout_seconds: 30,
        page_size: 20,
        max_pages: 50,
    },
    logging: LoggingConfig { level: "warn" },
};
