use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::auth::ServerState;
use crate::routes;
use service::entry::{repository::SeaOrmEntryRepository, service::EntryService};
use service::identity::{repository::SeaOrmIdentityProvider, service::IdentityService};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // DB connection: pool settings from config.toml when available,
    // otherwise the plain DATABASE_URL connection.
    let db = match configs::load_default() {
        Ok(mut cfg) => {
            cfg.database.normalize_from_env();
            match cfg.database.validate() {
                Ok(()) => models::db::connect_with_config(&cfg.database).await?,
                Err(_) => models::db::connect().await?,
            }
        }
        Err(_) => models::db::connect().await?,
    };

    migration::Migrator::up(&db, None).await?;
    info!("migrations applied");

    let state = ServerState {
        entries: Arc::new(EntryService::new(Arc::new(SeaOrmEntryRepository { db: db.clone() }))),
        identity: Arc::new(IdentityService::new(Arc::new(SeaOrmIdentityProvider { db }))),
    };

    let app: Router = routes::build_router(state, build_cors());

    let addr = load_bind_addr()?;
    info!(%addr, "starting entry catalog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
