/// ドメインサービス: 入力の検証
///
/// 動画ファイルの存在確認と、動画IDの形式チェックを行う。
/// ファイルは stat するだけで開かない。
use crate::domain::error::DomainError;
use std::path::Path;

/// 動画ファイルが存在することを確認する
///
/// # エラー
/// - パスが存在しない → `FileNotFound`
/// - ディレクトリが指定された → `NotAFile`
pub fn ensure_file_exists(path: &Path) -> Result<(), DomainError> {
    let display = path.display().to_string();

    let metadata = std::fs::metadata(path).map_err(|_| DomainError::file_not_found(&display))?;

    if metadata.is_dir() {
        return Err(DomainError::not_a_file(display));
    }

    Ok(())
}

/// 動画IDを検証する
///
/// URLパスにそのまま埋め込むので、英数字と '-' '_' のみ許可する。
pub fn validate_video_id(id: &str) -> Result<&str, DomainError> {
    let id = id.trim();
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(id)
    } else {
        Err(DomainError::invalid_video_id(id))
    }
}
