/// API通信用の型定義
///
/// Rutube APIのレスポンスをデシリアライズするための構造体を定義します。
/// 未知のフィールドは無視し、欠けうるフィールドはすべて Option にしています。
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// アカウント情報（フィールド名 → 値）
///
/// プロフィールAPIのレスポンスをそのまま保持する。
pub type AccountInfo = serde_json::Map<String, Value>;

/// トークン認証レスポンス
///
/// POST /api/accounts/token_auth/ のレスポンス型
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// 認証トークン（失敗時は含まれない）
    #[serde(default)]
    pub token: Option<String>,
}

impl TokenResponse {
    /// 空でないトークンを取り出す
    pub fn into_token(self) -> Option<String> {
        self.token.filter(|t| !t.trim().is_empty())
    }
}

/// 動画のモデレーション・処理理由
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionReason {
    #[serde(default)]
    pub name: Option<String>,
}

/// 動画詳細
///
/// GET /api/video/{id}/ のレスポンス型
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoDetails {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub is_hidden: Option<bool>,

    #[serde(default)]
    pub is_deleted: Option<bool>,

    #[serde(default)]
    pub action_reason: Option<ActionReason>,
}

impl VideoDetails {
    /// action_reason.name を取り出す
    pub fn action_reason_name(&self) -> Option<&str> {
        self.action_reason.as_ref()?.name.as_deref()
    }
}

/// 動画一覧の1件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub is_hidden: Option<bool>,
}

/// 動画一覧の1ページ
///
/// GET /api/video/person/{user_id}/ のレスポンス型
#[derive(Debug, Clone, Deserialize)]
pub struct VideoListPage {
    #[serde(default)]
    pub results: Vec<VideoSummary>,

    /// 次ページの完全URL（最終ページでは null）
    #[serde(default)]
    pub next: Option<String>,
}

/// アカウント情報から利用者IDを取り出す
///
/// id は数値で返ってくることも文字列で返ってくることもある。
pub fn account_id(info: &AccountInfo) -> Option<String> {
    match info.get("id")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, found {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_with_token() {
        let response: TokenResponse = serde_json::from_str(r#"{"token": "abc123"}"#).unwrap();
        assert_eq!(response.into_token().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_token_response_without_token() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"non_field_errors": ["bad credentials"]}"#).unwrap();
        assert!(response.into_token().is_none());

        let blank: TokenResponse = serde_json::from_str(r#"{"token": ""}"#).unwrap();
        assert!(blank.into_token().is_none());
    }

    #[test]
    fn test_video_details_deserialization() {
        let json = r#"{
            "id": "f3a1b2",
            "title": "Clip",
            "status": "ready",
            "is_hidden": false,
            "is_deleted": false,
            "action_reason": {"id": 1, "name": "moderation"},
            "duration": 42
        }"#;

        let details: VideoDetails = serde_json::from_str(json).expect("Failed to parse");
        assert_eq!(details.id, "f3a1b2");
        assert_eq!(details.status.as_deref(), Some("ready"));
        assert_eq!(details.action_reason_name(), Some("moderation"));
    }

    #[test]
    fn test_video_list_page_with_numeric_ids() {
        let json = r#"{
            "results": [{"id": 7, "title": "One", "status": "ready", "is_hidden": true}],
            "next": null
        }"#;

        let page: VideoListPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, "7");
        assert!(page.next.is_none());
    }

    #[test]
    fn test_account_id() {
        let numeric: AccountInfo = serde_json::from_str(r#"{"id": 123, "name": "Test"}"#).unwrap();
        assert_eq!(account_id(&numeric).as_deref(), Some("123"));

        let missing: AccountInfo = serde_json::from_str(r#"{"name": "Test"}"#).unwrap();
        assert!(account_id(&missing).is_none());
    }
}
