use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use super::domain::{
    CostKeywordsUpdate, DivisionCalculationRequest, DivisionFilter, DivisionId,
    DivisionIndicator, DivisionKpi, DivisionScheme, Employee, HistoryFilter, HistoryId,
    NewDivision, NewHistoryEntry,
};
use super::repository::{ConfigurationStore, HistoryStore, StoreError};
use super::service::{PayrollService, PayrollServiceError};
use crate::workflows::bonus::{self, CalculationRequest};

type SharedService<C, H> = State<Arc<PayrollService<C, H>>>;

/// Router exposing the calculator, division configuration and calculation history.
pub fn payroll_router<C, H>(service: Arc<PayrollService<C, H>>) -> Router
where
    C: ConfigurationStore + 'static,
    H: HistoryStore + 'static,
{
    Router::new()
        .route("/api/v1/calculate", post(calculate_handler))
        .route(
            "/api/v1/divisions",
            get(list_divisions_handler::<C, H>).post(create_division_handler::<C, H>),
        )
        .route(
            "/api/v1/divisions/:division_id/calculate",
            post(division_calculate_handler::<C, H>),
        )
        .route(
            "/api/v1/divisions/:division_id/cost-keywords",
            put(cost_keywords_handler::<C, H>),
        )
        .route(
            "/api/v1/employees",
            get(list_employees_handler::<C, H>).post(create_employee_handler::<C, H>),
        )
        .route(
            "/api/v1/kpis",
            get(list_kpis_handler::<C, H>).post(create_kpi_handler::<C, H>),
        )
        .route(
            "/api/v1/schemes",
            get(list_schemes_handler::<C, H>).post(create_scheme_handler::<C, H>),
        )
        .route(
            "/api/v1/indicators",
            get(list_indicators_handler::<C, H>).post(create_indicator_handler::<C, H>),
        )
        .route(
            "/api/v1/history",
            get(list_history_handler::<C, H>).post(record_history_handler::<C, H>),
        )
        .route(
            "/api/v1/history/:history_id",
            delete(delete_history_handler::<C, H>),
        )
        .with_state(service)
}

pub(crate) async fn calculate_handler(Json(request): Json<CalculationRequest>) -> Response {
    let result = bonus::calculate(&request);
    (StatusCode::OK, Json(result)).into_response()
}

pub(crate) async fn division_calculate_handler<C, H>(
    State(service): SharedService<C, H>,
    Path(division_id): Path<u64>,
    Json(request): Json<DivisionCalculationRequest>,
) -> Response
where
    C: ConfigurationStore + 'static,
    H: HistoryStore + 'static,
{
    respond(
        StatusCode::OK,
        service.calculate_for_division(DivisionId(division_id), &request.realisasi_inputs),
    )
}

pub(crate) async fn list_divisions_handler<C, H>(State(service): SharedService<C, H>) -> Response
where
    C: ConfigurationStore + 'static,
    H: HistoryStore + 'static,
{
    respond(StatusCode::OK, service.divisions())
}

pub(crate) async fn create_division_handler<C, H>(
    State(service): SharedService<C, H>,
    Json(division): Json<NewDivision>,
) -> Response
where
    C: ConfigurationStore + 'static,
    H: HistoryStore + 'static,
{
    respond(StatusCode::CREATED, service.create_division(division))
}

pub(crate) async fn cost_keywords_handler<C, H>(
    State(service): SharedService<C, H>,
    Path(division_id): Path<u64>,
    Json(update): Json<CostKeywordsUpdate>,
) -> Response
where
    C: ConfigurationStore + 'static,
    H: HistoryStore + 'static,
{
    respond(
        StatusCode::OK,
        service.set_cost_keywords(DivisionId(division_id), update.keywords),
    )
}

pub(crate) async fn list_employees_handler<C, H>(
    State(service): SharedService<C, H>,
    Query(filter): Query<DivisionFilter>,
) -> Response
where
    C: ConfigurationStore + 'static,
    H: HistoryStore + 'static,
{
    respond(StatusCode::OK, service.employees(filter.division_id))
}

pub(crate) async fn create_employee_handler<C, H>(
    State(service): SharedService<C, H>,
    Json(employee): Json<Employee>,
) -> Response
where
    C: ConfigurationStore + 'static,
    H: HistoryStore + 'static,
{
    respond(StatusCode::CREATED, service.create_employee(employee))
}

pub(crate) async fn list_kpis_handler<C, H>(
    State(service): SharedService<C, H>,
    Query(filter): Query<DivisionFilter>,
) -> Response
where
    C: ConfigurationStore + 'static,
    H: HistoryStore + 'static,
{
    respond(StatusCode::OK, service.kpis(filter.division_id))
}

pub(crate) async fn create_kpi_handler<C, H>(
    State(service): SharedService<C, H>,
    Json(kpi): Json<DivisionKpi>,
) -> Response
where
    C: ConfigurationStore + 'static,
    H: HistoryStore + 'static,
{
    respond(StatusCode::CREATED, service.create_kpi(kpi))
}

pub(crate) async fn list_schemes_handler<C, H>(
    State(service): SharedService<C, H>,
    Query(filter): Query<DivisionFilter>,
) -> Response
where
    C: ConfigurationStore + 'static,
    H: HistoryStore + 'static,
{
    respond(StatusCode::OK, service.schemes(filter.division_id))
}

pub(crate) async fn create_scheme_handler<C, H>(
    State(service): SharedService<C, H>,
    Json(scheme): Json<DivisionScheme>,
) -> Response
where
    C: ConfigurationStore + 'static,
    H: HistoryStore + 'static,
{
    respond(StatusCode::CREATED, service.create_scheme(scheme))
}

pub(crate) async fn list_indicators_handler<C, H>(
    State(service): SharedService<C, H>,
    Query(filter): Query<DivisionFilter>,
) -> Response
where
    C: ConfigurationStore + 'static,
    H: HistoryStore + 'static,
{
    respond(StatusCode::OK, service.indicators(filter.division_id))
}

pub(crate) async fn create_indicator_handler<C, H>(
    State(service): SharedService<C, H>,
    Json(indicator): Json<DivisionIndicator>,
) -> Response
where
    C: ConfigurationStore + 'static,
    H: HistoryStore + 'static,
{
    respond(StatusCode::CREATED, service.create_indicator(indicator))
}

pub(crate) async fn list_history_handler<C, H>(
    State(service): SharedService<C, H>,
    Query(filter): Query<HistoryFilter>,
) -> Response
where
    C: ConfigurationStore + 'static,
    H: HistoryStore + 'static,
{
    respond(StatusCode::OK, service.history(filter))
}

pub(crate) async fn record_history_handler<C, H>(
    State(service): SharedService<C, H>,
    Json(entry): Json<NewHistoryEntry>,
) -> Response
where
    C: ConfigurationStore + 'static,
    H: HistoryStore + 'static,
{
    respond(StatusCode::CREATED, service.record_history(entry))
}

pub(crate) async fn delete_history_handler<C, H>(
    State(service): SharedService<C, H>,
    Path(history_id): Path<u64>,
) -> Response
where
    C: ConfigurationStore + 'static,
    H: HistoryStore + 'static,
{
    match service.delete_history(HistoryId(history_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

fn respond<T: Serialize>(status: StatusCode, outcome: Result<T, PayrollServiceError>) -> Response {
    match outcome {
        Ok(body) => (status, Json(body)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) fn error_status(err: &PayrollServiceError) -> StatusCode {
    match err {
        PayrollServiceError::MissingDivision | PayrollServiceError::InvalidDivisionName => {
            StatusCode::BAD_REQUEST
        }
        PayrollServiceError::UnknownDivision(_)
        | PayrollServiceError::UnknownEmployee(_)
        | PayrollServiceError::UnknownHistory(_)
        | PayrollServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        PayrollServiceError::DuplicateDivision
        | PayrollServiceError::DuplicateHistory
        | PayrollServiceError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        PayrollServiceError::Store(StoreError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(err: PayrollServiceError) -> Response {
    let status = error_status(&err);
    if status.is_server_error() {
        error!(error = %err, "payroll request failed");
    }
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
