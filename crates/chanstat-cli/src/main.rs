use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;

use commands::run::RunArgs;

#[derive(Parser)]
#[command(name = "chanstat")]
#[command(version)]
#[command(
    about = "Collects public YouTube channel statistics and reports them to a Maestro task",
    long_about = "Chanstat opens each channel page from the task's comma-separated \"canais\" \
                  parameter in a fresh headless Chrome, scrapes the channel name, subscriber \
                  count and video count, and reports results, errors and the run log artifact \
                  back to the orchestration platform."
)]
struct Cli {
    /// Maestro server URL (injected by the runner)
    #[arg(long, env = "CHANSTAT_SERVER")]
    server: Option<String>,

    /// Task id under which this run is tracked
    #[arg(long, env = "CHANSTAT_TASK_ID", default_value = "local")]
    task_id: String,

    /// Maestro access token
    #[arg(long, env = "CHANSTAT_TOKEN", default_value = "")]
    token: String,

    /// Comma-separated channel handles; overrides the task's "canais" parameter
    #[arg(long)]
    canais: Option<String>,

    /// Run Chrome with a visible window
    #[arg(long)]
    headed: bool,

    /// Path to the Chrome binary (platform defaults are searched otherwise)
    #[arg(long)]
    chrome_path: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    commands::run::execute(RunArgs {
        server: cli.server,
        task_id: cli.task_id,
        token: cli.token,
        canais: cli.canais,
        headed: cli.headed,
        chrome_path: cli.chrome_path,
    })
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("chanstat=debug,chanstat_core=debug,chanstat_browser=debug,chanstat_maestro=debug")
    } else {
        EnvFilter::new("chanstat=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
