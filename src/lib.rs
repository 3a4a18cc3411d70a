//! usuarios-api: REST CRUD over user records stored in PostgreSQL.

pub mod config;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod sql;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use model::{User, UserFields, UserFilter};
pub use routes::{app, common_routes, user_routes};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_users_table, PgUserStore, StoreError, UserStore};
