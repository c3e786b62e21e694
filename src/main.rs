mod api;
mod cli;
mod commands;
mod config;
mod domain;
mod error_severity;
mod presentation;

use api::error::InfraError;
use config::APP_CONFIG;
use config::error::ConfigError;
use domain::error::DomainError;
use error_severity::ErrorSeverity;
use std::env;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    // 解析に失敗しても --machine なら JSON でエラーを返す
    let machine_requested = args.iter().skip(1).any(|a| a == "--machine");

    let parsed = match cli::parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            if !machine_requested {
                presentation::output::print_usage();
                eprintln!();
            }
            handle_error(e, machine_requested)
        }
    };

    if let Err(e) = run(&parsed).await {
        handle_error(e, parsed.machine_output);
    }
}

/// アプリケーションのメイン処理
///
/// 人間向けモードでは進捗も結果も stdout に、
/// --machine では進捗を stderr、JSON を stdout に出す。
async fn run(args: &cli::CliArgs) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = if args.machine_output {
        let mut progress = io::stderr();
        cli::dispatch(args, &mut progress).await?
    } else {
        cli::dispatch(args, &mut out).await?
    };

    tracing::debug!(command = result.name(), "command finished");
    presentation::output::output_result(&result, args.machine_output, &mut out)
}

/// RUST_LOG があればそれを、無ければ APP_CONFIG の既定レベルを使う
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(APP_CONFIG.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// エラーハンドリングとユーザーへの表示
///
/// anyhow::Error から元のエラー型を downcast して、
/// エラーの種類に応じた exit code とメッセージを決定する。
fn handle_error(error: anyhow::Error, machine_output: bool) -> ! {
    let severity = determine_severity(&error);
    let exit_code = severity.map(ErrorSeverity::exit_code).unwrap_or(1);
    let hint = get_error_hint(&error);

    if machine_output {
        let json = serde_json::json!({
            "success": false,
            "error": format!("{:#}", error),
            "severity": severity,
            "exit_code": exit_code,
            "hint": hint,
        });
        println!("{}", json);
        let _ = io::stdout().flush();
        std::process::exit(exit_code);
    }

    eprintln!("Error: {}", error);

    let chain: Vec<_> = error.chain().skip(1).collect();
    if !chain.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            eprintln!("  {}: {}", i + 1, cause);
        }
    }

    if let Some(hint) = hint {
        eprintln!("\nHint: {}", hint);
    }

    std::process::exit(exit_code);
}

/// エラーチェーンから深刻度を決定
fn determine_severity(error: &anyhow::Error) -> Option<ErrorSeverity> {
    error.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<DomainError>() {
            Some(e.severity())
        } else if let Some(e) = cause.downcast_ref::<ConfigError>() {
            Some(e.severity())
        } else {
            cause.downcast_ref::<InfraError>().map(InfraError::severity)
        }
    })
}

/// エラーに対するユーザー向けヒントを取得
fn get_error_hint(error: &anyhow::Error) -> Option<String> {
    error.chain().find_map(|cause| {
        let hint = if let Some(e) = cause.downcast_ref::<DomainError>() {
            e.hint()
        } else if let Some(e) = cause.downcast_ref::<ConfigError>() {
            e.hint()
        } else if let Some(e) = cause.downcast_ref::<InfraError>() {
            e.hint()
        } else {
            None
        };
        hint.map(str::to_string)
    })
}
