/// インフラ層のエラー定義
///
/// Rutube APIとの通信で発生するエラーを構造化して定義。
/// 原因の文字列はメッセージに含めて保持する。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfraError {
    /// ネットワークエラー
    #[error("network error: {message}")]
    Network { message: String },

    /// APIが失敗ステータスを返した
    #[error("API error: {endpoint} - {message}")]
    Api {
        endpoint: String,
        message: String,
        status_code: Option<u16>,
    },

    /// タイムアウトエラー
    #[error("operation timed out: {operation}")]
    Timeout { operation: String },

    /// レスポンスの形式が想定と異なる
    #[error("invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    /// トークン無しで認証が必要な操作を呼んだ
    #[error("client is not authorized: {operation}")]
    NotAuthorized { operation: String },
}

impl InfraError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn api(endpoint: impl Into<String>, message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self::Api {
            endpoint: endpoint.into(),
            message: message.into(),
            status_code,
        }
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    pub fn invalid_response(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn not_authorized(operation: impl Into<String>) -> Self {
        Self::NotAuthorized {
            operation: operation.into(),
        }
    }

    /// APIエラーのHTTPステータスコード
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::SystemError
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Network { .. } | Self::Timeout { .. } => {
                Some("Check your internet connection and try again.")
            }
            Self::NotAuthorized { .. } => {
                Some("Rutube rejected the login. Check 'login' and 'password' in your config file.")
            }
            Self::Api { .. } if self.status_code() == Some(404) => {
                Some("The requested resource does not exist on Rutube.")
            }
            _ => None,
        }
    }
}
