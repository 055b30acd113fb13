use std::sync::Arc;

use zerozero_lookup::geocode::GeocodeClient;
use zerozero_lookup::water_quality::WaterQualityClient;
use zerozero_zai::chat::ChatBridge;
use zerozero_zai::tips::TipGenerator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Every external collaborator is constructed explicitly at startup and
/// injected here, so integration tests can swap in unconfigured clients
/// and exercise the fallback paths offline.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: zerozero_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Personalized tip generator (remote path + fallback rules).
    pub tip_generator: Arc<TipGenerator>,
    /// Chat assistant bridge.
    pub chat_bridge: Arc<ChatBridge>,
    /// Postcode geocoding client.
    pub geocode: Arc<GeocodeClient>,
    /// Water-quality portal client.
    pub water: Arc<WaterQualityClient>,
}
