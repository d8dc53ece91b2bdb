use anyhow::Result;
use clap::Parser;
use mentorhub_core::tracing::{LogFormat, init_tracing};
use mentorhub_daemon::{Settings, serve};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;

/// MentorHub site backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Override the listen address
    #[arg(short = 'b', long = "bind")]
    bind: Option<std::net::SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        settings.server.bind_addr = bind;
    }

    let format = if settings.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_tracing(&settings.log_level, format)?;

    info!(
        site = %settings.site.base_url,
        catalog = %settings.catalog.upstream_url,
        "starting mentorhub"
    );

    let listener = TcpListener::bind(settings.server.bind_addr).await?;
    println!("Server running at: http://{}/", listener.local_addr()?);

    serve(&settings, listener, async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal");
        }
    })
    .await?;

    Ok(())
}
