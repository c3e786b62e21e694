/// Rutube APIクライアント
///
/// 作成時にトークン認証を行い、以降の GET にトークンを付けて送ります。
/// 認証できなかったクライアントは、認証が必要な呼び出しをすべて
/// `InfraError::NotAuthorized` で拒否します。
use crate::api::auth::{self, AuthManager, Credentials};
use crate::api::client::ApiClient;
use crate::api::error::InfraError;
use crate::api::session::{HostConnector, HostSession};
use crate::api::types::{AccountInfo, VideoDetails, VideoListPage, VideoSummary};
use crate::config::APP_CONFIG;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

const PROFILE_ENDPOINT: &str = "/api/profile/user/";
const PROFILE_FALLBACK_ENDPOINT: &str = "/api/accounts/profile/";

/// 取得した動画詳細（型付きの要約と生のJSON）
#[derive(Debug, Clone)]
pub struct FetchedVideo {
    pub details: VideoDetails,
    pub raw: Value,
}

/// Rutubeクライアント
pub struct RutubeClient {
    api: ApiClient,
    token: Option<String>,
}

impl RutubeClient {
    /// クライアントを作成し、同時に認証を行う
    ///
    /// # Errors
    /// 通信失敗、またはトークンレスポンスが読めない場合。
    /// 認証情報が拒否されただけならエラーではなく、未認証のクライアントを返す。
    pub async fn connect(api: ApiClient, credentials: &Credentials) -> Result<Self, InfraError> {
        let token = AuthManager::new(credentials.clone())
            .obtain_token(&api)
            .await?;

        Ok(Self { api, token })
    }

    pub fn is_authorized(&self) -> bool {
        self.token.is_some()
    }

    /// アカウント関連のAPI
    pub fn account(&self) -> Account<'_> {
        Account { client: self }
    }

    /// 動画の詳細を取得
    pub async fn video(&self, video_id: &str) -> Result<FetchedVideo, InfraError> {
        let header = self.require_auth("fetch video details")?;
        let endpoint = format!("/api/video/{}/", video_id);

        let response = self.api.get(&endpoint, Some(&header)).await?;
        let response = ApiClient::check_response(response, &endpoint).await?;
        let raw: Value = ApiClient::parse_json(response, &endpoint).await?;

        let details = serde_json::from_value(raw.clone())
            .map_err(|e| InfraError::invalid_response(&endpoint, e.to_string()))?;

        Ok(FetchedVideo { details, raw })
    }

    /// 利用者が投稿した動画をすべて取得
    ///
    /// `next` を辿ってページングする。`max_pages` ページで打ち切る。
    pub async fn person_videos(
        &self,
        user_id: &str,
        page_size: u32,
        max_pages: u32,
    ) -> Result<Vec<VideoSummary>, InfraError> {
        let header = self.require_auth("list videos")?;
        let first_endpoint = format!("/api/video/person/{}/?limit={}", user_id, page_size);

        let mut videos = Vec::new();
        let mut next_url = Some(format!("{}{}", self.api.base_url(), first_endpoint));
        let mut pages = 0;

        while let Some(url) = next_url.take() {
            if pages >= max_pages {
                warn!(max_pages, "stopping video listing at page limit");
                break;
            }

            let response = self.api.get_url(&url, Some(&header)).await?;
            let response = ApiClient::check_response(response, &first_endpoint).await?;
            let page: VideoListPage = ApiClient::parse_json(response, &first_endpoint).await?;

            pages += 1;
            debug!(page = pages, count = page.results.len(), "fetched video page");

            videos.extend(page.results);
            next_url = match page.next.filter(|n| !n.is_empty()) {
                Some(next) if self.is_same_origin(&next) => Some(next),
                Some(next) => {
                    return Err(InfraError::invalid_response(
                        &first_endpoint,
                        format!("next page points outside {}: {}", self.api.base_url(), next),
                    ));
                }
                None => None,
            };
        }

        Ok(videos)
    }

    // トークンを他のホストに送らない
    fn is_same_origin(&self, url: &str) -> bool {
        url.strip_prefix(self.api.base_url())
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// 認証済みなら Authorization ヘッダーの値を返す
    fn require_auth(&self, operation: &str) -> Result<String, InfraError> {
        self.token
            .as_deref()
            .map(auth::auth_header)
            .ok_or_else(|| InfraError::not_authorized(operation))
    }
}

/// アカウントAPI
pub struct Account<'a> {
    client: &'a RutubeClient,
}

impl Account<'_> {
    /// アカウント情報を取得
    ///
    /// /api/profile/user/ が失敗ステータスを返したら
    /// /api/accounts/profile/ を試す。
    pub async fn info(&self) -> Result<AccountInfo, InfraError> {
        let header = self.client.require_auth("fetch account info")?;
        let api = &self.client.api;

        let mut endpoint = PROFILE_ENDPOINT;
        let mut response = api.get(endpoint, Some(&header)).await?;

        if !response.status().is_success() {
            debug!(
                status = response.status().as_u16(),
                "profile endpoint failed, trying fallback"
            );
            endpoint = PROFILE_FALLBACK_ENDPOINT;
            response = api.get(endpoint, Some(&header)).await?;
        }

        let response = ApiClient::check_response(response, endpoint).await?;
        ApiClient::parse_json(response, endpoint).await
    }
}

#[async_trait]
impl HostSession for RutubeClient {
    fn is_authorized(&self) -> bool {
        RutubeClient::is_authorized(self)
    }

    async fn account_info(&self) -> Result<AccountInfo, InfraError> {
        self.account().info().await
    }
}

/// 本番用のコネクタ
///
/// HTTPクライアントは `connect` の中で作る。
/// 作成の失敗も認証の失敗と同じく `connect` のエラーとして返る。
pub struct RutubeConnector {
    base_url: String,
}

impl RutubeConnector {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn production() -> Self {
        Self::new(APP_CONFIG.api.endpoint)
    }
}

#[async_trait]
impl HostConnector for RutubeConnector {
    type Session = RutubeClient;

    async fn connect(&self, credentials: &Credentials) -> Result<RutubeClient, InfraError> {
        let api = ApiClient::new(self.base_url.as_str())?;
        RutubeClient::connect(api, credentials).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn authorized_client(server: &MockServer) -> RutubeClient {
        RutubeClient {
            api: ApiClient::new(server.uri()).unwrap(),
            token: Some("abc".to_string()),
        }
    }

    async fn mount_get(server: &MockServer, endpoint: &str, response: ResponseTemplate, calls: u64) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .and(header("Authorization", "Token abc"))
            .respond_with(response)
            .expect(calls)
            .mount(server)
            .await;
    }

    fn unauthorized_client() -> RutubeClient {
        RutubeClient {
            api: ApiClient::new("http://127.0.0.1:1").unwrap(),
            token: None,
        }
    }

    #[tokio::test]
    async fn test_unauthorized_client_refuses_account_info() {
        let client = unauthorized_client();
        assert!(!client.is_authorized());

        let result = client.account().info().await;
        assert!(matches!(result, Err(InfraError::NotAuthorized { .. })));
    }

    #[tokio::test]
    async fn test_unauthorized_client_refuses_video_queries() {
        let client = unauthorized_client();

        assert!(matches!(
            client.video("abc").await,
            Err(InfraError::NotAuthorized { .. })
        ));
        assert!(matches!(
            client.person_videos("1", 20, 1).await,
            Err(InfraError::NotAuthorized { .. })
        ));
    }

    #[test]
    fn test_require_auth_builds_token_header() {
        let client = RutubeClient {
            api: ApiClient::new("http://127.0.0.1:1").unwrap(),
            token: Some("abc".to_string()),
        };
        assert!(client.is_authorized());
        assert_eq!(client.require_auth("test").unwrap(), "Token abc");
    }

    #[tokio::test]
    async fn test_account_info_uses_profile_endpoint() {
        let server = MockServer::start().await;
        mount_get(
            &server,
            PROFILE_ENDPOINT,
            ResponseTemplate::new(200).set_body_json(json!({"id": 5, "name": "N"})),
            1,
        )
        .await;
        mount_get(&server, PROFILE_FALLBACK_ENDPOINT, ResponseTemplate::new(200), 0).await;

        let info = authorized_client(&server).account().info().await.unwrap();
        assert_eq!(info.get("name"), Some(&json!("N")));
    }

    #[tokio::test]
    async fn test_account_info_falls_back_on_failure_status() {
        let server = MockServer::start().await;
        mount_get(&server, PROFILE_ENDPOINT, ResponseTemplate::new(404), 1).await;
        mount_get(
            &server,
            PROFILE_FALLBACK_ENDPOINT,
            ResponseTemplate::new(200).set_body_json(json!({"id": 5, "name": "N"})),
            1,
        )
        .await;

        let info = authorized_client(&server).account().info().await.unwrap();
        assert_eq!(info.get("id"), Some(&json!(5)));
        assert_eq!(info.get("name"), Some(&json!("N")));
    }

    #[tokio::test]
    async fn test_account_info_reports_fallback_failure() {
        let server = MockServer::start().await;
        mount_get(&server, PROFILE_ENDPOINT, ResponseTemplate::new(404), 1).await;
        mount_get(
            &server,
            PROFILE_FALLBACK_ENDPOINT,
            ResponseTemplate::new(500).set_body_string("boom"),
            1,
        )
        .await;

        let error = authorized_client(&server).account().info().await.unwrap_err();
        assert_eq!(error.status_code(), Some(500));
        assert!(error.to_string().contains(PROFILE_FALLBACK_ENDPOINT));
    }

    #[tokio::test]
    async fn test_person_videos_follows_next_until_null() {
        let server = MockServer::start().await;
        let second_page = format!("{}/api/video/person/5/page/2/", server.uri());

        Mock::given(method("GET"))
            .and(path("/api/video/person/5/"))
            .and(query_param("limit", "20"))
            .and(header("Authorization", "Token abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"id": 1, "title": "First", "status": "ready", "is_hidden": false}],
                "next": second_page,
            })))
            .expect(1)
            .mount(&server)
            .await;
        mount_get(
            &server,
            "/api/video/person/5/page/2/",
            ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"id": "b", "title": "Second"}],
                "next": null,
            })),
            1,
        )
        .await;

        let videos = authorized_client(&server)
            .person_videos("5", 20, 50)
            .await
            .unwrap();
        let ids: Vec<&str> = videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["1", "b"]);
    }

    #[tokio::test]
    async fn test_person_videos_stops_at_page_limit() {
        let server = MockServer::start().await;
        let same_page = format!("{}/api/video/person/5/?limit=20", server.uri());

        // 常に自分自身を next として返す
        mount_get(
            &server,
            "/api/video/person/5/",
            ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"id": 1}],
                "next": same_page,
            })),
            3,
        )
        .await;

        let videos = authorized_client(&server)
            .person_videos("5", 20, 3)
            .await
            .unwrap();
        assert_eq!(videos.len(), 3);
    }

    #[tokio::test]
    async fn test_person_videos_refuses_next_on_other_host() {
        let server = MockServer::start().await;
        mount_get(
            &server,
            "/api/video/person/5/",
            ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"id": 1}],
                "next": "http://127.0.0.1:1/api/video/person/5/?page=2",
            })),
            1,
        )
        .await;

        let result = authorized_client(&server).person_videos("5", 20, 50).await;
        assert!(matches!(result, Err(InfraError::InvalidResponse { .. })));
    }

    #[test]
    fn test_same_origin_check() {
        let client = RutubeClient {
            api: ApiClient::new("https://rutube.ru").unwrap(),
            token: None,
        };
        assert!(client.is_same_origin("https://rutube.ru/api/video/person/1/?page=2"));
        assert!(!client.is_same_origin("https://rutube.ru.example.com/api/"));
        assert!(!client.is_same_origin("https://example.com/api/video/person/1/"));
    }

    #[tokio::test]
    async fn test_connector_with_rejected_login_gives_unauthorized_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/accounts/token_auth/"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let session = RutubeConnector::new(server.uri())
            .connect(&Credentials::new("someone", "wrong"))
            .await
            .unwrap();
        assert!(!session.is_authorized());
    }

    #[tokio::test]
    async fn test_connector_propagates_network_error() {
        let connector = RutubeConnector::new("http://127.0.0.1:1");
        let result = connector
            .connect(&Credentials::new("user@example.com", "secret"))
            .await;
        assert!(result.is_err());
    }
}
