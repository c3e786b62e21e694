use crate::api::client::ApiClient;
use crate::api::rutube::RutubeConnector;
use crate::commands::{self, CommandResult};
use crate::config::UploaderConfig;
use crate::domain::error::DomainError;
use anyhow::{Context, Result, bail};
use std::io::Write;
use std::path::PathBuf;

const STATUS_USAGE: &str = "Usage: rutube-uploader status <video_id>";
const CONFIG_USAGE: &str = "Usage: rutube-uploader --config <path> [command]";

/// 実行するコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Info,
    Status { video_id: String },
    List,
    Help,
}

/// 解析済みのCLI引数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub machine_output: bool,
    pub config_path: Option<PathBuf>,
    pub command: CliCommand,
}

/// CLI引数を解析する
///
/// `args[0]` はプログラム名。グローバルフラグはコマンドより前に置く。
/// コマンドが無ければ `info` を実行する。
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut machine_output = false;
    let mut config_path = None;
    let mut rest = args.iter().skip(1);

    let command_name = loop {
        match rest.next().map(String::as_str) {
            Some("--machine") => machine_output = true,
            Some("--config") => {
                let path = rest
                    .next()
                    .ok_or_else(|| DomainError::missing_argument("--config <path>", CONFIG_USAGE))?;
                config_path = Some(PathBuf::from(path));
            }
            Some(flag) if flag.starts_with("--") && flag != "--help" => {
                bail!("Unknown flag: '{}'. Use 'help' to see available options.", flag)
            }
            other => break other,
        }
    };

    let command = match command_name {
        None | Some("info") => CliCommand::Info,
        Some("status") => {
            let video_id = rest
                .next()
                .filter(|id| !id.trim().is_empty())
                .ok_or_else(|| DomainError::missing_argument("video_id", STATUS_USAGE))?;
            CliCommand::Status {
                video_id: video_id.clone(),
            }
        }
        Some("list") => CliCommand::List,
        Some("help") | Some("--help") => CliCommand::Help,
        Some(other) => bail!(
            "Unknown command: '{}'. Use 'help' to see available commands.",
            other
        ),
    };

    if let Some(extra) = rest.next() {
        bail!("Unexpected argument: '{}'", extra);
    }

    Ok(CliArgs {
        machine_output,
        config_path,
        command,
    })
}

/// 解析済みの引数に従ってコマンドを実行する
///
/// # Arguments
/// * `args` - 解析済みのCLI引数
/// * `progress` - 進捗行の出力先
pub async fn dispatch(args: &CliArgs, progress: &mut dyn Write) -> Result<CommandResult> {
    if args.command == CliCommand::Help {
        return Ok(commands::help::execute());
    }

    let config = UploaderConfig::load(args.config_path.as_deref())
        .context("Failed to load uploader configuration")?;

    match &args.command {
        CliCommand::Info => {
            let connector = RutubeConnector::production();
            commands::info::execute(&config, &connector, progress)
                .await
                .context("Info command failed")
        }
        CliCommand::Status { video_id } => {
            let api = ApiClient::production().context("Failed to create API client")?;
            commands::status::execute(&config, api, video_id, progress)
                .await
                .context("Status command failed")
        }
        CliCommand::List => {
            let api = ApiClient::production().context("Failed to create API client")?;
            commands::list::execute(&config, api, progress)
                .await
                .context("List command failed")
        }
        CliCommand::Help => Ok(commands::help::execute()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("rutube-uploader")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_no_arguments_runs_info() {
        let parsed = parse_args(&args(&[])).unwrap();
        assert_eq!(parsed.command, CliCommand::Info);
        assert!(!parsed.machine_output);
        assert!(parsed.config_path.is_none());
    }

    #[test]
    fn test_global_flags() {
        let parsed = parse_args(&args(&["--machine", "--config", "/tmp/c.toml", "list"])).unwrap();
        assert!(parsed.machine_output);
        assert_eq!(parsed.config_path, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(parsed.command, CliCommand::List);
    }

    #[test]
    fn test_status_requires_video_id() {
        let error = parse_args(&args(&["status"])).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<DomainError>(),
            Some(DomainError::MissingArgument { .. })
        ));

        let parsed = parse_args(&args(&["status", "abc123"])).unwrap();
        assert_eq!(
            parsed.command,
            CliCommand::Status {
                video_id: "abc123".to_string()
            }
        );
    }

    #[test]
    fn test_config_flag_requires_value() {
        let error = parse_args(&args(&["--config"])).unwrap_err();
        assert!(error.downcast_ref::<DomainError>().is_some());
    }

    #[test]
    fn test_unknown_command_and_flag() {
        assert!(parse_args(&args(&["upload"])).is_err());
        assert!(parse_args(&args(&["--verbose"])).is_err());
        assert!(parse_args(&args(&["list", "extra"])).is_err());
    }

    #[test]
    fn test_help_variants() {
        assert_eq!(parse_args(&args(&["help"])).unwrap().command, CliCommand::Help);
        assert_eq!(parse_args(&args(&["--help"])).unwrap().command, CliCommand::Help);
    }

    #[tokio::test]
    async fn test_help_does_not_need_config() {
        let parsed = CliArgs {
            machine_output: false,
            config_path: Some(PathBuf::from("/nonexistent/dir/config.toml")),
            command: CliCommand::Help,
        };
        let mut sink = Vec::new();
        let result = dispatch(&parsed, &mut sink).await.unwrap();
        assert!(matches!(result, CommandResult::Help));
    }

    #[tokio::test]
    async fn test_info_with_template_config_is_config_error() {
        use crate::config::error::ConfigError;

        let dir = tempfile::TempDir::new().unwrap();
        let parsed = CliArgs {
            machine_output: false,
            config_path: Some(dir.path().join("config.toml")),
            command: CliCommand::Info,
        };
        let mut sink = Vec::new();

        let error = dispatch(&parsed, &mut sink).await.unwrap_err();
        assert!(
            error
                .chain()
                .any(|cause| cause.downcast_ref::<ConfigError>().is_some())
        );
    }
}
