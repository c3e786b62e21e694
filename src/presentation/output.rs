/// プレゼンテーション層: コマンド結果の出力
///
/// コマンド実行結果をユーザー向け（人間可読）または
/// 機械向け（JSON）形式で出力する責務を担います。
/// CLI使用方法の表示もこのモジュールが担当します。
use crate::commands::result::{CommandResult, InfoOutcome, InfoResult, ListResult, StatusResult};
use crate::domain::formatter;
use anyhow::Result;
use std::io::Write;

/// ヘルプテキスト（単一の情報源）
pub const HELP_TEXT: &str = "rutube-uploader
Check Rutube credentials and account info from the command line

Usage:
  rutube-uploader [--machine] [--config <path>] [command] [args...]

Global Flags:
  --machine          - Output machine-readable JSON to stdout (for scripting)
                       Progress lines go to stderr in this mode
  --config <path>    - Use this config file instead of the default location

Available commands:
  info               - Check that the video file exists, authorize and print
                       account info (default when no command is given)
  status <video_id>  - Show the processing status of an uploaded video
  list               - List the videos on your channel
  help               - Display this help message

Configuration:
  login, password    - Rutube credentials
  video_path         - File that must exist before authorizing
  title, description, category_id, is_hidden
                     - Upload settings (stored, not used yet)

Logging:
  RUST_LOG=debug     - Verbose logs to stderr";

/// コマンド使用方法を表示する
pub fn print_usage() {
    eprintln!("{}", HELP_TEXT);
}

/// コマンド結果を適切な形式で出力する
///
/// # Arguments
/// * `result` - コマンド実行結果
/// * `machine_output` - 機械可読出力フラグ
/// * `out` - 出力先（通常は stdout）
pub fn output_result(
    result: &CommandResult,
    machine_output: bool,
    out: &mut dyn Write,
) -> Result<()> {
    if machine_output {
        let json = machine_readable(result);
        writeln!(out, "{}", serde_json::to_string(&json)?)?;
    } else {
        write_human_readable(result, out)?;
    }

    out.flush()?;
    Ok(())
}

/// 人間向けの出力
fn write_human_readable(result: &CommandResult, out: &mut dyn Write) -> Result<()> {
    match result {
        CommandResult::Info(r) => write_info(r, out)?,
        CommandResult::Status(r) => write_status(r, out)?,
        CommandResult::List(r) => write_list(r, out)?,
        CommandResult::Help => writeln!(out, "{}", HELP_TEXT)?,
    }
    Ok(())
}

fn write_info(r: &InfoResult, out: &mut dyn Write) -> Result<()> {
    match &r.outcome {
        InfoOutcome::Fetched { account } => {
            writeln!(out, "Account info:")?;
            let lines = formatter::account_info_lines(account);
            if lines.is_empty() {
                writeln!(out, "  (empty)")?;
            }
            for line in lines {
                writeln!(out, "  {}", line)?;
            }
        }
        // 認証失敗の行は進捗として出力済み
        InfoOutcome::NotAuthorized => {}
        InfoOutcome::Failed { message, trace } => {
            writeln!(out, "❌ Error: {}", message)?;
            writeln!(out, "Trace:")?;
            for (idx, cause) in trace.iter().enumerate() {
                writeln!(out, "  #{} {}", idx, cause)?;
            }
        }
    }
    Ok(())
}

fn write_status(r: &StatusResult, out: &mut dyn Write) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Video ID:       {}", r.video_id)?;
    writeln!(out, "Title:          {}", r.title.as_deref().unwrap_or("(untitled)"))?;
    writeln!(out, "Status:         {}", r.status.as_deref().unwrap_or("unknown"))?;
    if let Some(reason) = &r.action_reason {
        writeln!(out, "Action Reason:  {}", reason)?;
    }
    if let Some(hidden) = r.is_hidden {
        writeln!(out, "Hidden:         {}", hidden)?;
    }
    if let Some(deleted) = r.is_deleted {
        writeln!(out, "Deleted:        {}", deleted)?;
    }
    writeln!(out, "Processing:     {}", r.state)?;
    Ok(())
}

fn write_list(r: &ListResult, out: &mut dyn Write) -> Result<()> {
    if r.total_count == 0 {
        writeln!(out, "No videos found on this channel.")?;
        return Ok(());
    }

    writeln!(out, "Found {} video(s) on Rutube channel:", r.total_count)?;
    for video in &r.videos {
        writeln!(out, "{}", formatter::video_line(video))?;
    }
    Ok(())
}

/// 機械可読JSONを生成
fn machine_readable(result: &CommandResult) -> serde_json::Value {
    match result {
        CommandResult::Info(r) => {
            serde_json::json!({
                "success": true,
                "command": "info",
                "login": r.login,
                "video_path": r.video_path,
                "upload_settings": r.upload_settings,
                "result": r.outcome
            })
        }
        CommandResult::Status(r) => {
            serde_json::json!({
                "success": true,
                "command": "status",
                "state": r.state,
                "data": r.raw
            })
        }
        CommandResult::List(r) => {
            serde_json::json!({
                "success": true,
                "command": "list",
                "user_id": r.user_id,
                "videos": r.videos,
                "total_count": r.total_count
            })
        }
        CommandResult::Help => {
            serde_json::json!({
                "success": true,
                "command": "help"
            })
        }
    }
}
