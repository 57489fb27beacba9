//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::domain::ReferenceCode;
use crate::store::TicketStore;
use crate::verify::StatisticsSnapshot;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<S: TicketStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/tickets/:reference/verify", get(verify_ticket::<S>))
        .route("/api/statistics", get(statistics::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Verify a ticket by booking reference.
///
/// Every verdict, including "not found" and store failures, is a 200: the
/// request succeeded even when the ticket did not.
async fn verify_ticket<S: TicketStore>(
    State(state): State<AppState<S>>,
    Path(reference): Path<String>,
) -> Result<Json<VerificationResponse>, AppError> {
    let code = ReferenceCode::parse(&reference).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let result = state.verifier.verify_ticket(&code).await;
    info!(
        reference = %code,
        valid = result.is_valid,
        verdict = result.message,
        "ticket verified"
    );

    Ok(Json(VerificationResponse::from_result(result)))
}

/// Ticket counts per transport mode.
async fn statistics<S: TicketStore>(
    State(state): State<AppState<S>>,
) -> Json<StatisticsSnapshot> {
    Json(state.verifier.get_statistics().await)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        warn!(%status, %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TransportMode, fixtures};
    use crate::store::{MemoryStore, StoreSet};
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> Router {
        let stores = StoreSet::new(
            MemoryStore::new(TransportMode::Bus, vec![fixtures::bus("BUS1")]),
            MemoryStore::empty(TransportMode::Train),
            MemoryStore::new(TransportMode::Plane, vec![fixtures::plane("FLY1")]),
        );
        create_router(AppState::new(stores))
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn verify_located_ticket() {
        let (status, json) = get_json("/api/tickets/FLY1/verify").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["referenceCode"], "FLY1");
        assert_eq!(json["resolvedType"], "plane");
    }

    #[tokio::test]
    async fn unknown_ticket_is_a_verdict_not_an_error() {
        let (status, json) = get_json("/api/tickets/NOPE/verify").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["isValid"], false);
        assert_eq!(json["message"], "Ticket not found");
        assert!(json["resolvedType"].is_null());
    }

    #[tokio::test]
    async fn blank_reference_is_rejected() {
        let (status, json) = get_json("/api/tickets/%20%20/verify").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("must not be empty"));
    }

    #[tokio::test]
    async fn statistics_cover_every_mode() {
        let (status, json) = get_json("/api/statistics").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["bus"]["total"], 1);
        assert_eq!(json["train"]["total"], 0);
        assert_eq!(json["plane"]["total"], 1);
        assert_eq!(json["total"]["total"], 2);
    }
}
