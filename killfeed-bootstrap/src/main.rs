use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use killfeed_infrastructure::CONFIG_PATH_ENV;

#[derive(Parser, Debug)]
#[command(name = "killfeed")]
#[command(about = "Killmail relay for watched corporations and alliances", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(args: &Args) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    match &args.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "killfeed.log");
            let (file_writer, guard) = tracing_appender::non_blocking(appender);
            let writer = std::io::stdout.and(file_writer);
            if args.json_logs {
                builder.json().with_writer(writer).init();
            } else {
                builder.with_writer(writer).init();
            }
            Some(guard)
        }
        None => {
            if args.json_logs {
                builder.json().init();
            } else {
                builder.init();
            }
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = init_tracing(&args);

    if let Some(config) = &args.config {
        std::env::set_var(CONFIG_PATH_ENV, config);
    }

    killfeed_bootstrap::run_standalone().await
}
