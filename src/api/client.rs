/// HTTPクライアント
///
/// Rutube APIとの通信を担当する薄いHTTPクライアント。
/// タイムアウト、送信エラーの分類、Token認証ヘッダーの付与を行います。
/// リトライは行いません。
use crate::api::error::InfraError;
use crate::config::APP_CONFIG;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

/// APIクライアントの結果型
type ApiResult<T> = Result<T, InfraError>;

/// APIクライアント
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// 新しいAPIクライアントを作成
    ///
    /// # Arguments
    /// * `base_url` - APIのベースURL（例: "https://rutube.ru"）
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let timeout = Duration::from_secs(APP_CONFIG.api.timeout_seconds);

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| InfraError::network(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// デフォルトのプロダクション環境クライアントを作成
    pub fn production() -> ApiResult<Self> {
        Self::new(APP_CONFIG.api.endpoint)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETリクエストを送信
    ///
    /// # Arguments
    /// * `endpoint` - エンドポイントパス（例: "/api/profile/user/"）
    /// * `auth_header` - Authorization ヘッダーの値（オプション）
    pub async fn get(&self, endpoint: &str, auth_header: Option<&str>) -> ApiResult<Response> {
        let url = self.build_url(endpoint);
        self.get_url(&url, auth_header).await
    }

    /// 完全なURLに対してGETリクエストを送信
    ///
    /// ページングの `next` のように、APIがURLを丸ごと返す場合に使う。
    pub async fn get_url(&self, url: &str, auth_header: Option<&str>) -> ApiResult<Response> {
        debug!(%url, "GET");
        let request = Self::with_auth(self.client.get(url), auth_header);

        Self::send_with_error_handling(request, url, "GET").await
    }

    /// フォームエンコードのPOSTリクエストを送信
    ///
    /// # Arguments
    /// * `endpoint` - エンドポイントパス（例: "/api/accounts/token_auth/"）
    /// * `form` - フォームのキーと値
    /// * `auth_header` - Authorization ヘッダーの値（オプション）
    pub async fn post_form(
        &self,
        endpoint: &str,
        form: &[(&str, &str)],
        auth_header: Option<&str>,
    ) -> ApiResult<Response> {
        let url = self.build_url(endpoint);
        debug!(%url, "POST");
        let request = Self::with_auth(self.client.post(&url).form(form), auth_header);

        Self::send_with_error_handling(request, endpoint, "POST").await
    }

    /// URLを構築
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn with_auth(
        request: reqwest::RequestBuilder,
        auth_header: Option<&str>,
    ) -> reqwest::RequestBuilder {
        match auth_header {
            Some(auth) => request.header(reqwest::header::AUTHORIZATION, auth),
            None => request,
        }
    }

    /// リクエストを送信し、送信エラーを分類する
    async fn send_with_error_handling(
        request: reqwest::RequestBuilder,
        target: &str,
        method: &str,
    ) -> ApiResult<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                InfraError::timeout(format!("{} {}", method, target))
            } else if e.is_connect() {
                InfraError::network(format!("Connection failed for {} {}: {}", method, target, e))
            } else {
                InfraError::network(format!("Request failed for {} {}: {}", method, target, e))
            }
        })?;

        debug!(status = response.status().as_u16(), "{} {} completed", method, target);
        Ok(response)
    }

    /// 成功ステータスでなければ InfraError::Api にする
    ///
    /// # Arguments
    /// * `response` - HTTPレスポンス
    /// * `endpoint` - エンドポイント名（エラーメッセージ用）
    pub async fn check_response(response: Response, endpoint: &str) -> ApiResult<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        Err(InfraError::api(
            endpoint,
            truncate_body(&error_body),
            Some(status.as_u16()),
        ))
    }

    /// JSONレスポンスをデシリアライズ
    pub async fn parse_json<T: serde::de::DeserializeOwned>(
        response: Response,
        endpoint: &str,
    ) -> ApiResult<T> {
        response.json().await.map_err(|e| {
            InfraError::invalid_response(endpoint, format!("Failed to parse JSON response: {}", e))
        })
    }
}

/// エラーメッセージに載せるレスポンス本文を短くする
fn truncate_body(body: &str) -> String {
    const MAX_CHARS: usize = 500;
    if body.chars().count() <= MAX_CHARS {
        body.to_string()
    } else {
        let head: String = body.chars().take(MAX_CHARS).collect();
        format!("{}...", head)
    }
}
