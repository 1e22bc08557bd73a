use anyhow::Result;
use clap::Parser;
use dir_extract::cli::{execute_extract, Cli};
use std::io::Write;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let start_time = Instant::now();

    let result: Result<_> = execute_extract(&cli).await;
    let succeeded = report_outcome(
        result,
        start_time.elapsed(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    );

    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// 処理時間は成功時のみ標準出力へ、エラーは標準エラーへ
fn report_outcome<T>(
    result: Result<T>,
    elapsed: Duration,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> bool {
    match result {
        Ok(_) => {
            let _ = writeln!(stdout, "Time to process {:.2} secs", elapsed.as_secs_f64());
            true
        }
        Err(error) => {
            let _ = writeln!(stderr, "❌ エラー: {error:#}");
            false
        }
    }
}

/// `RUST_LOG`でログレベルを指定（既定は`warn`）。ログは標準エラーへ
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
