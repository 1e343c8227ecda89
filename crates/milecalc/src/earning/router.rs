use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::catalog::ReferenceCatalog;
use super::comparison::ComparisonRequest;
use super::domain::ProgramId;
use super::engine::{CalculationRequest, MileageEngine, MileageError};
use super::export::write_comparison_csv;

/// Router builder exposing the calculation, comparison and tier listing endpoints.
pub fn earning_router<C>(engine: Arc<MileageEngine<C>>) -> Router
where
    C: ReferenceCatalog + 'static,
{
    Router::new()
        .route("/api/v1/miles/calculate", post(calculate_handler::<C>))
        .route("/api/v1/miles/compare", post(compare_handler::<C>))
        .route("/api/v1/miles/compare/export", post(export_handler::<C>))
        .route("/api/v1/programs/:program_id/tiers", get(tiers_handler::<C>))
        .with_state(engine)
}

pub(crate) async fn calculate_handler<C>(
    State(engine): State<Arc<MileageEngine<C>>>,
    axum::Json(request): axum::Json<CalculationRequest>,
) -> Response
where
    C: ReferenceCatalog + 'static,
{
    match engine.calculate(&request) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn compare_handler<C>(
    State(engine): State<Arc<MileageEngine<C>>>,
    axum::Json(request): axum::Json<ComparisonRequest>,
) -> Response
where
    C: ReferenceCatalog + 'static,
{
    match engine.compare(&request) {
        Ok(comparison) => (StatusCode::OK, axum::Json(comparison)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn export_handler<C>(
    State(engine): State<Arc<MileageEngine<C>>>,
    axum::Json(request): axum::Json<ComparisonRequest>,
) -> Response
where
    C: ReferenceCatalog + 'static,
{
    let comparison = match engine.compare(&request) {
        Ok(comparison) => comparison,
        Err(err) => return error_response(err),
    };

    let mut body = Vec::new();
    if let Err(err) = write_comparison_csv(&mut body, &comparison) {
        let payload = json!({ "error": err.to_string() });
        return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response();
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        body,
    )
        .into_response()
}

pub(crate) async fn tiers_handler<C>(
    State(engine): State<Arc<MileageEngine<C>>>,
    Path(program_id): Path<String>,
) -> Response
where
    C: ReferenceCatalog + 'static,
{
    match engine.program_tiers(&ProgramId::new(program_id)) {
        Ok(tiers) => (StatusCode::OK, axum::Json(tiers)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) fn status_for(err: &MileageError) -> StatusCode {
    match err {
        MileageError::UnknownAirport(_)
        | MileageError::UnknownCarrier(_)
        | MileageError::UnknownProgram(_)
        | MileageError::UnknownBookingClass(_)
        | MileageError::UnknownTier { .. }
        | MileageError::InvalidTicketPrice(_) => StatusCode::UNPROCESSABLE_ENTITY,
        MileageError::InvalidCoordinate { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        MileageError::CatalogUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn error_response(err: MileageError) -> Response {
    let payload = json!({
        "error": err.to_string(),
        "kind": err.kind(),
    });
    (status_for(&err), axum::Json(payload)).into_response()
}
