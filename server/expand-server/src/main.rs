use std::{env, net::SocketAddr, path::PathBuf};

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use error_common::{log_error, ExpandServiceError, Result};
use expand_server::{create_app, grpc, ExpandServer, ServerConfig};

/// Expand service HTTP and gRPC server
#[derive(Parser, Debug)]
#[command(name = "expand-server")]
#[command(about = "Expands subject sets into relation trees over HTTP and gRPC")]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "EXPAND_CONFIG")]
    config: Option<PathBuf>,

    /// Server bind address
    #[arg(long)]
    host: Option<String>,

    /// HTTP port
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable gRPC server
    #[arg(long)]
    enable_grpc: bool,

    /// gRPC server port
    #[arg(long)]
    grpc_port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut ServerConfig) {
        if let Some(ref host) = self.host {
            config.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.http_port = port;
        }
        if let Some(port) = self.grpc_port {
            config.grpc_port = port;
        }
        if self.enable_grpc {
            config.enable_grpc = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        log_error("expand-server", &e).await;
        return Err(e);
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let mut config = ServerConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    info!("Starting {} v{}", config.name, env!("CARGO_PKG_VERSION"));

    let server = ExpandServer::new(config.clone()).await?;
    let adapter = server.adapter().clone();
    let app = create_app(server);

    let http_addr = parse_addr(&config.http_addr())?;
    let listener = tokio::net::TcpListener::bind(http_addr)
        .await
        .map_err(|e| ExpandServiceError::NetworkError(format!("Failed to bind to {http_addr}: {e}")))?;

    info!("HTTP server running on http://{}", http_addr);
    info!("Expand endpoint: http://{}/expand", http_addr);

    let http = async {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ExpandServiceError::ServerError(format!("HTTP server error: {e}")))
    };

    if config.enable_grpc {
        let grpc_addr = parse_addr(&config.grpc_addr())?;
        info!("gRPC server available on grpc://{}", grpc_addr);

        let grpc = grpc::start_grpc_server(
            grpc_addr,
            adapter,
            config.request_timeout(),
            shutdown_signal(),
        );
        tokio::try_join!(http, grpc)?;
    } else {
        http.await?;
    }

    info!("Server stopped");
    Ok(())
}

fn parse_addr(addr: &str) -> Result<SocketAddr> {
    addr.parse()
        .map_err(|e| ExpandServiceError::ConfigError(format!("Invalid bind address {addr}: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let is_development =
        env::var("EXPAND_ENV").unwrap_or_else(|_| "development".to_string()) == "development";

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("expand_server={level},expand_engine={level},tower_http=info,tonic=info").into()
    });

    if is_development {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(env::var("NO_COLOR").is_err()),
            )
            .init();
    } else {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .init();
    }
}
