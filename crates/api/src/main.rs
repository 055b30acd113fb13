use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zerozero_api::config::ServerConfig;
use zerozero_api::router::build_app_router;
use zerozero_api::state::AppState;
use zerozero_lookup::geocode::GeocodeClient;
use zerozero_lookup::water_quality::WaterQualityClient;
use zerozero_zai::chat::ChatBridge;
use zerozero_zai::client::{CompletionClient, CompletionConfig};
use zerozero_zai::tips::TipGenerator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zerozero_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = zerozero_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    zerozero_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    zerozero_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let completion_config = CompletionConfig::from_env();
    if completion_config.api_key.is_none() {
        tracing::warn!("No ZAI_API_KEY set; tips and chat will use local fallbacks (demo mode)");
    }
    let completion = Arc::new(CompletionClient::new(completion_config));

    let config = ServerConfig::from_env();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        tip_generator: Arc::new(TipGenerator::new(completion.clone())),
        chat_bridge: Arc::new(ChatBridge::new(completion)),
        geocode: Arc::new(GeocodeClient::from_env()),
        water: Arc::new(WaterQualityClient::from_env()),
    };

    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(config.host.parse().expect("Invalid HOST"), config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
