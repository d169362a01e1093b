use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::{
    mail::{LocalMailService, MailService},
    store::CitiesDataStore,
};

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the seeded store, the configured mailer and the router.
pub fn build_app(cfg: &AppConfig) -> Router {
    let store = CitiesDataStore::seeded();
    let mail: Arc<dyn MailService> =
        Arc::new(LocalMailService::new(cfg.mail.mail_to.clone(), cfg.mail.mail_from.clone()));
    let state = AppState::new(store, mail);
    routes::build_router(state, build_cors())
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg);

    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, local_addr = %listener.local_addr()?, "starting server crate");
    axum::serve(listener, app).await?;
    Ok(())
}
