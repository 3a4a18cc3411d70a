//! OpenAPI document for the user routes, served at `/openapi.json`.

use crate::error::{ErrorBody, ErrorDetail};
use crate::model::{User, UserFields};
use crate::response::MessageBody;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "usuarios-api",
        description = "Create, list, update and delete user records."
    ),
    paths(
        crate::handlers::users::create_user,
        crate::handlers::users::list_users,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
    ),
    components(schemas(User, UserFields, MessageBody, ErrorBody, ErrorDetail)),
    tags((name = "usuarios", description = "User records"))
)]
pub struct ApiDoc;
