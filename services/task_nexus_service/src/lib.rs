pub mod args;
pub mod config;
pub mod data;
pub mod data_impl;
pub mod extractors;
pub mod init_tracing;
pub mod providers;
pub mod response;
pub mod routes;
pub mod security;
pub mod services;
pub mod state;
mod utils;

use clap::Parser;
use tokio::net::TcpListener;

use crate::args::{Cli, CliSubcommands, ServeArgs};

#[tokio::main(flavor = "multi_thread")]
pub async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    match cli.subcommand {
        CliSubcommands::Serve(cmd) => serve(cmd.args).await,
    }
}

async fn serve(args: ServeArgs) -> eyre::Result<()> {
    init_tracing::init_tracing(&args)?;

    let state = state::ServiceState::from_args(&args).await?;

    let router =
        routes::root::build_router(&args.routes).with_state(state.clone());

    let socket = TcpListener::bind(&args.listen).await?;

    tracing::info!(listen = %args.listen, "task-nexus service listening");

    axum::serve(socket, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The pool is process-wide state; close it exactly once, on the way out.
    state.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install the shutdown handler: {e}");
    }
}
