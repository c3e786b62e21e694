/// 認証マネージャー
///
/// Rutubeのトークン認証を管理します。
/// ログインとパスワードを POST /api/accounts/token_auth/ に送り、
/// 返ってきたトークンを "Token <token>" 形式のヘッダーで使います。
use crate::api::client::ApiClient;
use crate::api::error::InfraError;
use crate::api::types::TokenResponse;
use std::fmt;
use tracing::{info, warn};

const TOKEN_AUTH_ENDPOINT: &str = "/api/accounts/token_auth/";

/// ログイン情報
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }

    /// ログインをマスキングして表示
    pub fn masked_login(&self) -> String {
        let chars: Vec<char> = self.login.chars().collect();
        if chars.len() <= 6 {
            "*".repeat(chars.len())
        } else {
            let head: String = chars[..3].iter().collect();
            let tail: String = chars[chars.len() - 3..].iter().collect();
            format!("{}***{}", head, tail)
        }
    }
}

// パスワードをログに出さない
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.masked_login())
            .field("password", &"***")
            .finish()
    }
}

/// 認証マネージャー
pub struct AuthManager {
    credentials: Credentials,
}

impl AuthManager {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// トークンを取得する
    ///
    /// # Returns
    /// * `Ok(Some(token))` - 認証成功
    /// * `Ok(None)` - Rutubeがトークンを返さなかった（認証情報の誤りなど）
    /// * `Err(_)` - 通信失敗、または200なのにJSONとして読めない
    pub async fn obtain_token(&self, client: &ApiClient) -> Result<Option<String>, InfraError> {
        let form = [
            ("username", self.credentials.login.as_str()),
            ("password", self.credentials.password.as_str()),
        ];

        let response = client.post_form(TOKEN_AUTH_ENDPOINT, &form, None).await?;
        let status = response.status();

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                login = %self.credentials.masked_login(),
                "token request rejected"
            );
            return Ok(None);
        }

        let body: TokenResponse = ApiClient::parse_json(response, TOKEN_AUTH_ENDPOINT).await?;
        let token = body.into_token();

        if token.is_some() {
            info!(login = %self.credentials.masked_login(), "authorized");
        } else {
            warn!(login = %self.credentials.masked_login(), "token response had no token");
        }

        Ok(token)
    }
}

/// Authorization ヘッダーの値を生成
///
/// # Returns
/// "Token <token>" 形式の文字列
pub fn auth_header(token: &str) -> String {
    format!("Token {}", token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_auth_header_format() {
        assert_eq!(auth_header("abc123"), "Token abc123");
    }

    #[test]
    fn test_login_masking() {
        let credentials = Credentials::new("someone@example.com", "secret");
        let masked = credentials.masked_login();
        assert!(masked.starts_with("som"));
        assert!(masked.contains("***"));
        assert!(masked.ends_with("com"));
        assert!(!masked.contains("example"));
    }

    #[test]
    fn test_short_login_masking() {
        let credentials = Credentials::new("short", "secret");
        assert_eq!(credentials.masked_login(), "*****");
    }

    #[test]
    fn test_debug_hides_password() {
        let credentials = Credentials::new("someone@example.com", "hunter2");
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("someone@example.com"));
    }

    async fn token_server(response: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_AUTH_ENDPOINT))
            .and(body_string_contains("username=someone"))
            .and(body_string_contains("password=secret"))
            .respond_with(response)
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    async fn obtain_from(server: &MockServer) -> Result<Option<String>, InfraError> {
        let client = ApiClient::new(server.uri()).unwrap();
        AuthManager::new(Credentials::new("someone", "secret"))
            .obtain_token(&client)
            .await
    }

    #[tokio::test]
    async fn test_obtain_token_success() {
        let server = token_server(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "abc123"})),
        )
        .await;

        let token = obtain_from(&server).await.unwrap();
        assert_eq!(token.as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_rejected_credentials_are_not_an_error() {
        let server = token_server(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"detail": "Invalid credentials"})),
        )
        .await;

        let token = obtain_from(&server).await.unwrap();
        assert!(token.is_none());
    }

    #[tokio::test]
    async fn test_success_without_token_is_not_authorized() {
        let missing = token_server(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"non_field_errors": []})),
        )
        .await;
        assert!(obtain_from(&missing).await.unwrap().is_none());

        let blank = token_server(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "   "})),
        )
        .await;
        assert!(obtain_from(&blank).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_success_with_non_json_body_is_error() {
        let server = token_server(ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;

        let result = obtain_from(&server).await;
        assert!(matches!(result, Err(InfraError::InvalidResponse { .. })));
    }

    #[tokio::test]
    async fn test_obtain_token_unreachable_host_is_error() {
        let client = ApiClient::new("http://127.0.0.1:1").unwrap();
        let manager = AuthManager::new(Credentials::new("user@example.com", "secret"));

        let result = manager.obtain_token(&client).await;
        assert!(result.is_err());
    }
}
