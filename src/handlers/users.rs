//! User CRUD handlers. Each performs exactly one store call.

use crate::error::{AppError, ErrorBody};
use crate::model::{User, UserFields, UserFilter};
use crate::response::{deleted, echo_created, ok_many, MessageBody};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

fn parse_id(id_str: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id_str).map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}

#[utoipa::path(
    post,
    path = "/usuarios",
    tag = "usuarios",
    request_body = UserFields,
    responses(
        (status = 201, description = "Created; the request body is echoed back", body = UserFields),
        (status = 400, description = "Body is not a JSON object or has mistyped fields", body = ErrorBody),
        (status = 409, description = "Email already in use", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let fields = UserFields::from_body(&body)?;
    let user = state.users.create(&fields).await?;
    tracing::info!(id = %user.id, "user created");
    Ok(echo_created(body))
}

#[utoipa::path(
    get,
    path = "/usuarios",
    tag = "usuarios",
    params(
        ("name" = Option<String>, Query, description = "Exact name match"),
        ("email" = Option<String>, Query, description = "Exact email match"),
        ("age" = Option<i32>, Query, description = "Exact age match")
    ),
    responses(
        (status = 200, description = "Matching users; all users when no filter is given", body = [User]),
        (status = 400, description = "Non-numeric age", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = UserFilter::from_query(&params)?;
    let users = state.users.find_many(&filter).await?;
    Ok(ok_many(users))
}

#[utoipa::path(
    put,
    path = "/usuarios/{id}",
    tag = "usuarios",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UserFields,
    responses(
        (status = 201, description = "Updated; the request body is echoed back", body = UserFields),
        (status = 400, description = "Invalid id or body", body = ErrorBody),
        (status = 404, description = "No user with this id", body = ErrorBody),
        (status = 409, description = "Email already in use", body = ErrorBody)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let fields = UserFields::from_body(&body)?;
    state.users.update(id, &fields).await?;
    tracing::info!(%id, "user updated");
    Ok(echo_created(body))
}

#[utoipa::path(
    delete,
    path = "/usuarios/{id}",
    tag = "usuarios",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted", body = MessageBody),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "No user with this id", body = ErrorBody)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.users.delete(id).await?;
    tracing::info!(%id, "user deleted");
    Ok(deleted())
}
