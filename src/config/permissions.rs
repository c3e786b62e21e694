/// 設定ファイルのパーミッション管理
///
/// 設定ファイルにはRutubeのパスワードが平文で入るため、
/// 作成直後に所有者だけが読み書きできるようにする。
///
/// Unix系: 0600 (rw-------)
/// その他: 何もしない
use crate::config::error::ConfigError;
use std::path::Path;

/// 認証情報を含むファイルを所有者専用にする
///
/// # Errors
/// ファイルが存在しない、またはパーミッション設定に失敗した場合
pub fn restrict_to_owner(file_path: &Path) -> Result<(), ConfigError> {
    if !file_path.is_file() {
        return Err(ConfigError::file_system(
            format!("Config file not found: {}", file_path.display()),
            std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
        ));
    }

    #[cfg(unix)]
    {
        set_unix_mode(file_path)
    }

    #[cfg(not(unix))]
    {
        Ok(())
    }
}

#[cfg(unix)]
fn set_unix_mode(file_path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    let permissions = std::fs::Permissions::from_mode(0o600);
    std::fs::set_permissions(file_path, permissions).map_err(|e| {
        ConfigError::file_system(
            format!(
                "Failed to set permissions (0600) for config file: {}",
                file_path.display()
            ),
            e,
        )
    })
}
