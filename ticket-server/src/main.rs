use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ticket_server::config::{ServerConfig, StoreBackend};
use ticket_server::store::{MemoryStore, RestClient, StoreSet, TicketStore};
use ticket_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ticket_server=info,tower_http=info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    let result = match config.backend {
        StoreBackend::Rest(rest) => {
            info!(url = %rest.base_url, "using REST ticket store");
            match RestClient::new(rest) {
                Ok(client) => serve(config.bind_addr, client.stores()).await,
                Err(e) => Err(e.to_string()),
            }
        }
        StoreBackend::Files(dir) => {
            info!(dir = %dir.display(), "using file ticket store");
            match MemoryStore::load_all(&dir) {
                Ok(stores) => {
                    info!(
                        bus = stores.bus.len(),
                        train = stores.train.len(),
                        plane = stores.plane.len(),
                        "loaded tickets"
                    );
                    serve(config.bind_addr, stores).await
                }
                Err(e) => Err(e.to_string()),
            }
        }
    };

    if let Err(e) = result {
        error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}

async fn serve<S: TicketStore + 'static>(
    addr: std::net::SocketAddr,
    stores: StoreSet<S>,
) -> Result<(), String> {
    let app = create_router(AppState::new(stores));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("failed to bind {addr}: {e}"))?;

    info!("Ticket verification server listening on http://{addr}");
    info!("  GET  /health                         - Health check");
    info!("  GET  /api/tickets/{{reference}}/verify - Verify a ticket");
    info!("  GET  /api/statistics                 - Ticket counts");

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("server error: {e}"))
}
