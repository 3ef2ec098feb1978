mod config;
mod error;
mod server;

use std::net::SocketAddr;
use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use analysis_core::Analyzer;
use config::Config;
use server::AnalysisServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting analysis MCP server");

    let config = Config::from_env()?;
    let analyzer = Arc::new(Analyzer::new());
    info!(recognizers = ?analyzer.recognizer_names(), "analyzer ready");

    serve(AnalysisServer::new(analyzer), config.tcp_listen_addr).await
}

/// Serve on stdio, or accept TCP clients forever when an address is given.
async fn serve(server: AnalysisServer, listen_addr: Option<SocketAddr>) -> anyhow::Result<()> {
    let Some(addr) = listen_addr else {
        info!("serving on stdio");
        let service = server
            .serve(stdio())
            .await
            .inspect_err(|e| error!(error = %e, "stdio session failed to start"))?;
        service.waiting().await?;
        info!("stdio session closed");
        return Ok(());
    };

    let listener = TcpListener::bind(addr).await?;
    info!(listen_addr = %addr, "serving on TCP");
    loop {
        let (stream, peer) = listener.accept().await?;
        let session = server.clone();
        tokio::spawn(async move {
            info!(peer = %peer, "client connected");
            match session.serve(stream).await {
                Ok(service) => {
                    if let Err(e) = service.waiting().await {
                        error!(peer = %peer, error = %e, "client session ended with error");
                    }
                }
                Err(e) => error!(peer = %peer, error = %e, "client session failed to start"),
            }
            info!(peer = %peer, "client disconnected");
        });
    }
}
