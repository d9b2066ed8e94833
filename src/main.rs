//! Server binary: open (or create) the token index, provision it, serve
//! the HTTP API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tokensearch::{api, TantivyStore, TokenService};

#[derive(Parser, Debug)]
#[command(name = "tokensearch-server", about = "Token autocomplete and correction service")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Directory holding the on-disk index.
    #[arg(long, default_value = "data/token-index")]
    index_dir: PathBuf,

    /// Keep the index in memory instead of on disk.
    #[arg(long)]
    in_memory: bool,

    /// Seed the sample catalog when the store is empty.
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let store = if args.in_memory {
        TantivyStore::open_in_memory()?
    } else {
        TantivyStore::open(&args.index_dir)?
    };
    let service = Arc::new(TokenService::new(Arc::new(store)));
    service.provision(args.seed);

    let app = api::router(service);
    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
