//! User CRUD routes under `/usuarios`.

use crate::handlers::users::{create_user, delete_user, list_users, update_user};
use crate::state::AppState;
use axum::{routing::get, routing::put, Router};

pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/usuarios", get(list_users).post(create_user))
        .route("/usuarios/:id", put(update_user).delete(delete_user))
        .with_state(state)
}
