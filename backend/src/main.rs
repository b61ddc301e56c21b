//! Registry entry-point: loads settings, wires adapters and serves the API.

mod server;

use std::net::{SocketAddr, ToSocketAddrs};

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use org_registry::inbound::http::health::HealthState;
use org_registry::settings::AppSettings;
use server::{ServerConfig, build_http_state, create_server};

fn resolve_bind_addr(host: &str, port: u16) -> std::io::Result<SocketAddr> {
    (host, port).to_socket_addrs()?.next().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::AddrNotAvailable,
            format!("{host}:{port} did not resolve to an address"),
        )
    })
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(std::io::Error::other)?;
    let http_state = build_http_state(&settings).await?;

    let bind_addr = resolve_bind_addr(settings.server.host(), settings.server.port())?;
    let config = ServerConfig::new(bind_addr).with_settings(&settings.server);
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, http_state, config)?;
    info!(%bind_addr, "Server running");
    server.await
}
