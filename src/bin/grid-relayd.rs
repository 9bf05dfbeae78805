use clap::Parser;
use grid_relay::config::Config;
use grid_relay::daemon;
use grid_relay::error::Result;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "grid-relayd")]
#[command(about = "Grid event relay daemon")]
struct Cli {
    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<String>,

    #[arg(long, env = "GRID_RELAY_TOKEN")]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,grid_relay=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let settings = config.daemon.clone().unwrap_or_default();
    let host = cli
        .host
        .or(settings.host)
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = cli.port.or(settings.port).unwrap_or(7878);
    let token = cli.token.or(settings.token).unwrap_or_default();
    if token.is_empty() {
        tracing::warn!("no token configured; requests without credentials are accepted");
    }

    daemon::run(&host, port, config, &token).await
}
