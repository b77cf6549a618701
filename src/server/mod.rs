//! HTTP vrstva: `POST /predict`, health, front-end.
//!
//! Model a scaler sa načítajú raz pri štarte do [`AppState`], ktorý sa potom
//! zdieľa cez `Arc` a nikdy sa nemení.

pub mod handlers;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::pipeline::ArtifactStore;
use crate::predictor::Predictor;

pub use handlers::{health_handler, predict_handler, root_handler, ApiError};

/// Zdieľaný, nemenný stav servera
pub struct AppState {
    pub config: ServerConfig,
    /// `None`, ak sa artefakty nepodarilo načítať; `/predict` potom vracia 503
    pub predictor: Option<Predictor>,
    /// Dôvod, prečo chýba prediktor
    pub load_error: Option<String>,
}

impl AppState {
    /// Načíta artefakty z `config.artifact_dir`. Chýbajúce artefakty nie sú
    /// fatálne, server štartuje a hlási nedostupnosť.
    pub fn load(config: ServerConfig) -> Self {
        let store = ArtifactStore::new(&config.artifact_dir);
        match Predictor::load(&store) {
            Ok(predictor) => Self::with_predictor(config, predictor),
            Err(e) => {
                warn!(error = %e, "model or scaler not available, /predict will return 503");
                Self {
                    config,
                    predictor: None,
                    load_error: Some(e.to_string()),
                }
            }
        }
    }

    pub fn with_predictor(config: ServerConfig, predictor: Predictor) -> Self {
        Self {
            config,
            predictor: Some(predictor),
            load_error: None,
        }
    }
}

/// Zostaví router so všetkými routami
pub fn build_router(state: Arc<AppState>) -> Router {
    if !state.config.static_dir.exists() {
        warn!(
            static_dir = %state.config.static_dir.display(),
            "UI build not found, / will answer with a JSON status"
        );
    }
    let assets = ServeDir::new(&state.config.static_dir);

    let router = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/predict", post(predict_handler))
        .nest_service("/static", assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("routes: GET /, GET /health, POST /predict, GET /static/*");
    router
}
