/// アップローダー設定モジュール
///
/// 実行時にユーザーディレクトリ（または --config で指定したパス）から
/// 読み込まれる設定を管理します。
/// Windows: C:\Users\<User>\AppData\Roaming\rutube-uploader\config.toml
/// macOS:   /Users/<User>/Library/Application Support/rutube-uploader/config.toml
/// Linux:   /home/<user>/.config/rutube-uploader/config.toml
///
/// ファイルが無い場合はテンプレートを書き出し、所有者専用のパーミッションにします。
use crate::config::error::ConfigError;
use crate::config::permissions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CONFIG_DIR_NAME: &str = "rutube-uploader";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_VIDEO_PATH: &str = "test_video.mp4";
const DEFAULT_TITLE: &str = "Test Video API";
const DEFAULT_DESCRIPTION: &str = "Uploaded via API client";
const DEFAULT_CATEGORY_ID: u32 = 13;

/// アップローダー設定
///
/// `login` と `password` 以外は現状どのロジックからも参照されない。
/// アップロード機能のための値として保持だけしている。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploaderConfig {
    /// Rutubeのログイン（メールアドレスまたは電話番号）
    #[serde(default)]
    pub login: String,

    /// Rutubeのパスワード
    #[serde(default)]
    pub password: String,

    /// 存在確認の対象となる動画ファイル
    #[serde(default = "default_video_path")]
    pub video_path: PathBuf,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_description")]
    pub description: String,

    #[serde(default = "default_category_id")]
    pub category_id: u32,

    #[serde(default)]
    pub is_hidden: bool,
}

// serde用
fn default_video_path() -> PathBuf {
    PathBuf::from(DEFAULT_VIDEO_PATH)
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

fn default_category_id() -> u32 {
    DEFAULT_CATEGORY_ID
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            login: String::new(),
            password: String::new(),
            video_path: default_video_path(),
            title: default_title(),
            description: default_description(),
            category_id: DEFAULT_CATEGORY_ID,
            is_hidden: false,
        }
    }
}

impl UploaderConfig {
    /// デフォルトの設定ファイルパスを取得
    ///
    /// # Errors
    /// 設定ディレクトリが取得できない場合に ConfigError::DirectoryNotFound を返します。
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .ok_or_else(|| ConfigError::directory_not_found("Failed to get user config directory"))
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// 設定を読み込む
    ///
    /// `explicit_path` が None の場合はデフォルトパスを使います。
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit_path {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::default_path()?),
        }
    }

    /// 指定パスから設定を読み込む
    ///
    /// 設定ファイルが存在しない場合はテンプレートを作成してから読み込みます。
    /// テンプレートは認証情報が空なので、その場合は検証エラーになります。
    ///
    /// # Errors
    /// 読み込み、パース、または検証に失敗した場合に ConfigError を返します。
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            info!(path = %config_path.display(), "config file not found, writing template");
            Self::create_template(config_path)?;
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to read config file: {}", config_path.display()),
                e,
            )
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_error(
                format!("Failed to parse config file ({})", config_path.display()),
                e,
            )
        })?;

        config.validate().map_err(|e| match e {
            ConfigError::ValidationError { message } => ConfigError::validation_error(format!(
                "{} (in {})",
                message,
                config_path.display()
            )),
            other => other,
        })?;

        debug!(path = %config_path.display(), "config loaded");
        Ok(config)
    }

    /// テンプレート設定ファイルを作成
    fn create_template(config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::file_system(
                    format!("Failed to create config directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        fs::write(config_path, Self::template_content()?).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to create config file: {}", config_path.display()),
                e,
            )
        })?;

        permissions::restrict_to_owner(config_path)
    }

    /// テンプレートの内容を生成
    ///
    /// Default 実装から生成するので、Rust側の既定値とずれない。
    fn template_content() -> Result<String, ConfigError> {
        let body = toml::to_string_pretty(&Self::default())
            .map_err(|e| ConfigError::serialize_error("Failed to serialize default config", e))?;

        Ok(format!(
            "# Rutube uploader configuration\n\
             # Fill in your Rutube credentials below.\n\
             # video_path is resolved against the current working directory.\n\n{}",
            body
        ))
    }

    /// 設定を検証
    ///
    /// Fail Fast: 問題があれば最初の1件で即座にエラーを返します。
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::require_non_empty(&self.login, "login")?;
        Self::require_non_empty(&self.password, "password")?;

        if self.video_path.as_os_str().is_empty() {
            return Err(ConfigError::validation_error("'video_path' cannot be empty"));
        }

        Ok(())
    }

    fn require_non_empty(value: &str, field_name: &str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::validation_error(format!(
                "'{}' cannot be empty",
                field_name
            )));
        }
        Ok(())
    }
}
