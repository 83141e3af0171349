use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tripbudget::config::AppConfig;
use tripbudget::error::AppError;
use tripbudget::routes::create_router;
use tripbudget::services::{ledger::Ledger, storage::JsonFileStore};
use tripbudget::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;

    let store = JsonFileStore::new(config.data_dir.clone());
    store.ensure_structure().await?;
    info!("storing records in {}", store.root().display());

    let ledger = Ledger::new(Arc::new(store));
    let state = AppState::new(config.clone(), ledger);

    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tripbudget=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
