use anyhow::{Context, Result};
use listing_check::api::{AppState, create_router};
use listing_check::classifier::{ForestClassifier, ListingClassifier};
use listing_check::config::AppConfig;
use listing_check::pipeline::ListingChecker;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "listing_check=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // A missing model is not fatal: requests answer 500 until it is provided
    let classifier: Option<Arc<dyn ListingClassifier>> = match ForestClassifier::load(&config.model.path) {
        Ok(model) => {
            info!("✅ Model loaded successfully.");
            Some(Arc::new(model))
        }
        Err(e) => {
            error!("❌ Failed to load model: {}", e);
            None
        }
    };

    let checker = ListingChecker::from_config(&config).context("Failed to initialize listing checker")?;

    let app = create_router(AppState {
        checker: Arc::new(checker),
        classifier,
    });

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;

    info!("🚀 Listing check server listening on http://{}", config.server.bind_addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
