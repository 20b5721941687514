use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    AppState,
    common::Json,
    error::AppError,
    routes::auth::model::{User, UserRole},
    utils::{message_to_api_response, success_to_api_response},
};

use super::model::{CreateEventRequest, Event, UpdateEventRequest};

fn can_modify_event(user: &User, event: &Event) -> bool {
    event.author_id == user.id || user.role == UserRole::SuperAdmin
}

#[axum::debug_handler]
pub async fn create_event(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(req): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.title.is_empty() || req.description.is_empty() {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }

    let event = Event::create(&state.pool, req, &user.id).await?;

    tracing::info!("User {} created event {}", user.id, event.id);
    Ok((StatusCode::CREATED, success_to_api_response(event)))
}

#[axum::debug_handler]
pub async fn get_events(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let events = Event::list(&state.pool).await?;
    Ok((StatusCode::OK, success_to_api_response(events)))
}

#[axum::debug_handler]
pub async fn update_event(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(event_id): Path<String>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = Event::find_by_id(&state.pool, &event_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    if !can_modify_event(&user, &event) {
        return Err(AppError::Forbidden(
            "Unauthorized to update this event".to_string(),
        ));
    }

    let updated = Event::update(&state.pool, &event_id, &req).await?;
    Ok((StatusCode::OK, success_to_api_response(updated)))
}

#[axum::debug_handler]
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = Event::find_by_id(&state.pool, &event_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    if !can_modify_event(&user, &event) {
        return Err(AppError::Forbidden(
            "Unauthorized to delete this event".to_string(),
        ));
    }

    Event::delete(&state.pool, &event_id).await?;
    Ok((
        StatusCode::OK,
        message_to_api_response("Event deleted successfully"),
    ))
}
