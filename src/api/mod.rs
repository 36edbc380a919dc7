use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::routing::{post, put};
use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/user/signup", post(sign_up))
        .route("/user/login", post(login))
        .route("/user/me", get(get_me))
        .route("/event", get(load_events).post(add_event))
        .route("/event/", get(load_events).post(add_event))
        .route("/event/single", get(load_timeless_events))
        .route("/event/timed", get(load_timed_events))
        .route("/event/{event_id}", put(edit_event).delete(delete_event))
        .route("/todo", post(add_todo))
        .with_state(state)
}

// Schedule-scoped handlers take extractor results as-is and unwrap them only
// after the caller's schedule has been resolved.

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn sign_up(
    State(state): State<AppState>,
    req: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<User>, AppError> {
    let Json(req) = req?;
    let user = state.user_service().sign_up(req).await?;
    Ok(Json(user))
}

async fn login(
    State(state): State<AppState>,
    req: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(req) = req?;
    let response = state.user_service().login(req).await?;
    Ok(Json(response))
}

async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<User>, AppError> {
    let user = state.user_service().me(user_id).await?;
    Ok(Json(user))
}

async fn load_events(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Event>>, AppError> {
    let events = state.event_service().for_user(user_id).await?.load_events().await?;
    Ok(Json(events))
}

async fn add_event(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    req: Result<Json<NewEventRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let events = state.event_service().for_user(user_id).await?;
    let Json(req) = req?;
    let event = events.add_event(req).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

async fn load_timeless_events(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<TimelessPage>, AppError> {
    let events = state.event_service().for_user(user_id).await?;
    let Query(query) = query?;
    let page = events.load_timeless_events(query).await?;
    Ok(Json(page))
}

async fn load_timed_events(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<TimedPage>, AppError> {
    let events = state.event_service().for_user(user_id).await?;
    let Query(query) = query?;
    let page = events.load_timed_events(query).await?;
    Ok(Json(page))
}

async fn edit_event(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    event_id: Result<Path<i64>, PathRejection>,
    req: Result<Json<UpdateEventRequest>, JsonRejection>,
) -> Result<Json<Event>, AppError> {
    let events = state.event_service().for_user(user_id).await?;
    let Path(event_id) = event_id?;
    let Json(req) = req?;
    let event = events.edit_event(event_id, req).await?;
    Ok(Json(event))
}

async fn delete_event(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    event_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Event>, AppError> {
    let events = state.event_service().for_user(user_id).await?;
    let Path(event_id) = event_id?;
    let event = events.delete_event(event_id).await?;
    Ok(Json(event))
}

async fn add_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    req: Result<Json<NewTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let todos = state.todo_service().for_user(user_id).await?;
    let Json(req) = req?;
    let todo = todos.add_todo(req).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}
