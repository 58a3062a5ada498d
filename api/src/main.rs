use anyhow::Result;
use dotenv::dotenv;

use api::config::ApiConfig;
use api::observability::Observability;
use api::routes;
use api::state::AppState;
use api::store::build_store;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = ApiConfig::from_env()?;
    let obs = Observability::init(config.log_format)?;

    tracing::info!(
        "API config loaded: public_url={}, store={:?}, capacity={}",
        config.public_base_url,
        config.store.policy,
        config.store.capacity
    );

    let store = build_store(&config.store);
    let addr = config.bind_addr();
    let callback_urls = [
        config.public_url(routes::DATA_VALIDATION_PATH),
        config.public_url(routes::PROFILE_VERIFICATION_PATH),
    ];
    let state = AppState::new(config, store, obs.registry);

    let app = routes::app(state);

    tracing::info!("API server listening on {}", addr);
    tracing::info!(
        "Wallet callback URLs: {} {}",
        callback_urls[0],
        callback_urls[1]
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
