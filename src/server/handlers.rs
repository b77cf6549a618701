use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, warn};

use super::AppState;
use crate::error::PipelineError;
use crate::predictor::Prediction;
use crate::schema::Record;

/// Chybová odpoveď, telo `{"detail": ...}` číta front-end
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: &self.detail,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        let status = match &e {
            PipelineError::Schema(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PipelineError::ResourceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %e, "prediction failed");
        }
        Self::new(status, e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection.body_text(), "rejected predict request");
        Self::new(rejection.status(), rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
struct StatusBody {
    status: &'static str,
    message: &'static str,
}

/// `GET /`: front-end, ak je zostavený, inak JSON status
pub async fn root_handler(State(state): State<Arc<AppState>>) -> Response {
    let index = state.config.static_dir.join("index.html");
    match tokio::fs::read_to_string(&index).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            debug!(path = %index.display(), error = %e, "index.html not served");
            Json(StatusBody {
                status: "ok",
                message: "Credit-card-default API. POST /predict with Income, Age, Loan, Loan_to_Income.",
            })
            .into_response()
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthBody<'a> {
    status: &'static str,
    model_loaded: bool,
    model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// `GET /health`
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Response {
    let body = HealthBody {
        status: "ok",
        model_loaded: state.predictor.is_some(),
        model: state.predictor.as_ref().map(|p| p.model_name()),
        error: state.load_error.as_deref(),
    };
    Json(body).into_response()
}

/// `POST /predict`: validácia záznamu, inferencia, `{probability_of_default, predicted_label}`
pub async fn predict_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<Json<Prediction>, ApiError> {
    let Json(record) = payload?;

    let Some(predictor) = state.predictor.as_ref() else {
        warn!(
            reason = state.load_error.as_deref().unwrap_or("unknown"),
            "predict called without loaded model"
        );
        return Err(ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "model or scaler not found on server, check the models/ folder",
        ));
    };

    Ok(Json(predictor.predict(&record)?))
}
