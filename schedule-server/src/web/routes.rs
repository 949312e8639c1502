//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::connections::connections_for;
use crate::domain::{EntryId, Line, LineId, Route, RouteId, TimetableEntry};

use super::dto::*;
use super::error::AppError;
use super::extract::{ApiPath, ApiQuery};
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/lines", get(list_lines).post(create_line))
        .route(
            "/lines/:id",
            get(get_line).put(update_line).delete(delete_line),
        )
        .route("/routes", get(list_routes).post(create_route))
        .route(
            "/routes/:id",
            get(get_route).put(update_route).delete(delete_route),
        )
        .route("/timetable", get(list_entries).post(create_entry))
        .route(
            "/timetable/:id",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .route("/connections", get(list_connections))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a JSON body by hand so malformed input is a 400 with a message.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(body = %String::from_utf8_lossy(body), "unparseable request body");
        AppError::bad_request(format!("Invalid JSON: {e}"))
    })
}

// Lines

async fn list_lines(State(state): State<AppState>) -> Json<Vec<Line>> {
    Json(state.store.list_lines().await)
}

async fn create_line(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Line>), AppError> {
    let req: LineRequest = parse_body(&body)?;
    let line = state.store.create_line(req.validate()?).await?;
    Ok((StatusCode::CREATED, Json(line)))
}

async fn get_line(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Json<LineDetailResult>, AppError> {
    let detail = state.store.get_line(LineId(id)).await?;
    Ok(Json(LineDetailResult::from_detail(detail)))
}

async fn update_line(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
    body: Bytes,
) -> Result<Json<Line>, AppError> {
    let req: LineRequest = parse_body(&body)?;
    let line = state.store.update_line(LineId(id), req.validate()?).await?;
    Ok(Json(line))
}

async fn delete_line(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<StatusCode, AppError> {
    state.store.delete_line(LineId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Routes

async fn list_routes(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RouteListQuery>,
) -> Json<Vec<Route>> {
    Json(state.store.list_routes(query.line_id.map(LineId)).await)
}

async fn create_route(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Route>), AppError> {
    let req: RouteRequest = parse_body(&body)?;
    let route = state.store.create_route(req.validate()?).await?;
    Ok((StatusCode::CREATED, Json(route)))
}

async fn get_route(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Json<RouteDetailResult>, AppError> {
    let detail = state.store.get_route(RouteId(id)).await?;
    Ok(Json(RouteDetailResult::from_detail(detail)))
}

async fn update_route(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
    body: Bytes,
) -> Result<Json<Route>, AppError> {
    let req: RouteRequest = parse_body(&body)?;
    let route = state.store.update_route(RouteId(id), req.validate()?).await?;
    Ok(Json(route))
}

async fn delete_route(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<StatusCode, AppError> {
    state.store.delete_route(RouteId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Timetable entries

async fn list_entries(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<EntryListQuery>,
) -> Result<Json<Vec<TimetableEntry>>, AppError> {
    let day_type = query.day_type()?;
    let entries = state
        .store
        .list_entries(query.route_id.map(RouteId), day_type)
        .await;
    Ok(Json(entries))
}

async fn create_entry(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<TimetableEntry>), AppError> {
    let req: EntryRequest = parse_body(&body)?;
    let entry = state.store.create_entry(req.validate()?).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn get_entry(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Json<TimetableEntry>, AppError> {
    Ok(Json(state.store.get_entry(EntryId(id)).await?))
}

async fn update_entry(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
    body: Bytes,
) -> Result<Json<TimetableEntry>, AppError> {
    let req: EntryRequest = parse_body(&body)?;
    let entry = state.store.update_entry(EntryId(id), req.validate()?).await?;
    Ok(Json(entry))
}

async fn delete_entry(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<StatusCode, AppError> {
    state.store.delete_entry(EntryId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Connections

/// Connections between the two segments of a direction on a day-type.
async fn list_connections(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ConnectionsQuery>,
) -> Result<Json<Vec<ConnectionResult>>, AppError> {
    let (direction, day_type) = query.validate()?;

    let connections = connections_for(&state.store, &state.segments, direction, day_type).await?;

    Ok(Json(
        connections
            .iter()
            .map(ConnectionResult::from_connection)
            .collect(),
    ))
}
