use std::{
    net::{IpAddr, SocketAddr},
    str::FromStr,
};

use clap::Parser;
use server::{db, routes, shutdown_signal, AppState, Cli};
use shared::*;
use tokio::net::TcpListener;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    load_dotenv()?;
    configure_tracing();

    let args = Cli::parse();
    debug!(?args);

    // Run the migrations synchronously before creating the pool or launching the server
    let ran = db::run_migrations(&args.db_url)?;
    info!("Ran {ran} db migrations");

    let pool = db::open_pool(&args.db_url)?;

    let socket = SocketAddr::new(IpAddr::from_str(&args.bind_addr)?, args.port);

    let listener = TcpListener::bind(socket).await?;
    info!("Listening on {}", listener.local_addr()?);

    let state = AppState { pool: pool.clone() };

    axum::serve(listener, routes::router(state, &args.assets_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db::close_store(pool, &args.db_url)?;
    info!("Database closed");

    Ok(())
}
