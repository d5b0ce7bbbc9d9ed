use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use game_patcher::{PatcherBuilder, RunOutcome, Settings, UpdateMode};

#[derive(Parser, Debug)]
#[command(name = "patcher", version, about = "Brings a game installation in line with its update server")]
struct Args {
  /// Base url of the update server
  #[arg(long)]
  url: String,
  /// Game installation folder
  #[arg(long)]
  root: PathBuf,
  /// Check every file instead of only the quick update set
  #[arg(long)]
  full: bool,
  #[arg(long, default_value_t = 3)]
  concurrency: usize,
  #[arg(long, default_value_t = 3)]
  retries: u32,
  /// Seconds between attempts
  #[arg(long, default_value_t = 5)]
  retry_delay: u64,
  /// Per request timeout in seconds
  #[arg(long, default_value_t = 300)]
  timeout: u64,
  #[arg(long, default_value_t = 1)]
  updater_version: i64,
  /// Re-hash every installed file after a successful sync
  #[arg(long)]
  verify: bool,
  /// Accept plain http update servers
  #[arg(long)]
  allow_http: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();
  let args = Args::parse();

  let settings = Settings {
    update_url: args.url,
    updater_version: args.updater_version,
    max_retry_attempts: args.retries,
    retry_delay: Duration::from_secs(args.retry_delay),
    request_timeout: Duration::from_secs(args.timeout),
    max_concurrent_downloads: args.concurrency,
    verify_after_sync: args.verify,
    validate_certificates: !args.allow_http,
    ..Settings::default()
  };
  let patcher = match PatcherBuilder::new().set_settings(settings).set_local_root(args.root).build() {
    Ok(patcher) => patcher,
    Err(e) => {
      error!("Could not set up the patcher: {}", e);
      return ExitCode::from(1);
    }
  };

  let mut progress = patcher.subscribe();
  tokio::spawn(async move {
    while progress.changed().await.is_ok() {
      let snapshot = progress.borrow_and_update().clone();
      info!("[{}/{} files, {:.1}%] {}", snapshot.current_file, snapshot.total_files, snapshot.bytes_percent(), snapshot.status);
    }
  });

  let canceller = patcher.clone();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      warn!("Interrupted, stopping the update");
      canceller.cancel();
    }
  });

  let mode = if args.full { UpdateMode::Full } else { UpdateMode::Quick };
  let outcome = match patcher.run(mode).await {
    Ok(outcome) => outcome,
    Err(e) => {
      error!("{}", e);
      return ExitCode::from(1);
    }
  };
  println!("{}", patcher.status());
  match outcome {
    RunOutcome::Completed { .. } | RunOutcome::NothingToDo | RunOutcome::SelfUpdated => ExitCode::SUCCESS,
    RunOutcome::Cancelled => ExitCode::from(2),
    RunOutcome::Failed(_) => ExitCode::from(1),
  }
}
