//! 終了コードの分類
//!
//! 各レイヤーのエラー型（DomainError / InfraError / ConfigError）は
//! 自分の深刻度をこの型で返す。main.rs はエラーチェーンを辿って
//! 最初に見つかった深刻度から終了コードを決める。
//!
//! このモジュールは他のモジュールに依存しない。

use serde::Serialize;
use std::fmt;

/// エラーの深刻度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    /// 動画ファイルが無い、引数が足りないなど、利用者が直せるもの（exit 1）
    UserError,

    /// 設定ファイルの内容・形式の問題（exit 2）
    ConfigError,

    /// ネットワーク・API・ファイルシステムの障害（exit 3）
    SystemError,
}

impl ErrorSeverity {
    /// 対応する終了コード
    pub fn exit_code(self) -> i32 {
        match self {
            Self::UserError => 1,
            Self::ConfigError => 2,
            Self::SystemError => 3,
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::UserError => "user error",
            Self::ConfigError => "configuration error",
            Self::SystemError => "system error",
        };
        f.write_str(label)
    }
}
