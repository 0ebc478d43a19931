pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod render;
pub mod server;
pub mod upstream;

use std::net::SocketAddr;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Upstream client error: {0}")]
    Upstream(#[from] upstream::UpstreamError),
    #[error("Failed to bind {0}")]
    Bind(String),
    #[error("Failed to load TLS config: {0}")]
    Tls(std::io::Error),
    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

#[derive(Debug, Default)]
pub struct RunOptions {
    pub config_path: Option<String>,
    pub debug_logs: bool,
}

pub async fn run(opts: RunOptions) -> Result<(), ServerError> {
    let mut config = config::Config::load(opts.config_path.as_deref())?;
    config.debug_logs = opts.debug_logs;

    if let Some(ref path) = opts.config_path {
        info!("Using config file: {}", path);
    }
    info!(
        provider = config.provider.display_name(),
        render = ?config.render,
        "Starting cine-proxy"
    );
    if opts.debug_logs {
        info!("Debug logging enabled");
    }

    let source = upstream::build_source(&config)?;
    if source.is_none() {
        warn!(
            "{} is not set; /api/movies will answer 500 until it is configured",
            config.provider.credential_var()
        );
    }

    let addr = listen_addr(&config.listen)?;

    let tls = match (&config.listen.tlscert, &config.listen.tlskey) {
        (Some(cert), Some(key)) => Some((cert.clone(), key.clone())),
        _ => None,
    };

    let state = server::AppState::new(config, source);
    let app = server::build_router(state);

    if let Some((cert_path, key_path)) = tls {
        info!("Loading TLS certificate from {}", cert_path);
        info!("Loading TLS key from {}", key_path);

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert_path, &key_path)
            .await
            .map_err(ServerError::Tls)?;

        info!("Serving HTTPS on {}", addr);

        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await
            .map_err(ServerError::Serve)?;
    } else {
        info!("Serving HTTP on {}", addr);

        let listener = bind(addr).await?;

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(ServerError::Serve)?;
    }

    info!("Server stopped");
    Ok(())
}

fn listen_addr(listen: &config::ListenConfig) -> Result<SocketAddr, ServerError> {
    let address = listen.address.as_deref().unwrap_or("0.0.0.0");
    format!("{}:{}", address, listen.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("{}:{}: {}", address, listen.port, e)))
}

async fn bind(addr: SocketAddr) -> Result<tokio::net::TcpListener, ServerError> {
    tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("{}: {}", addr, e)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::ListenConfig;

    #[test]
    fn test_listen_addr() {
        let listen = ListenConfig {
            address: Some("127.0.0.1".to_string()),
            port: 8080,
            ..ListenConfig::default()
        };
        assert_eq!(listen_addr(&listen).unwrap().to_string(), "127.0.0.1:8080");

        let listen = ListenConfig::default();
        assert_eq!(listen_addr(&listen).unwrap().to_string(), "0.0.0.0:3000");

        let listen = ListenConfig {
            address: Some("not an address".to_string()),
            ..ListenConfig::default()
        };
        assert!(matches!(listen_addr(&listen), Err(ServerError::Bind(_))));
    }

    #[tokio::test]
    async fn test_bind_reports_port_in_use() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();

        let err = bind(addr).await.unwrap_err();
        assert!(matches!(err, ServerError::Bind(_)));
        assert!(err.to_string().starts_with(&format!("Failed to bind {}", addr)));
    }
}
