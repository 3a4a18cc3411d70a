//! PostgreSQL adapter for `UserStore`, plus database and table bootstrap.

use crate::model::{User, UserFields, UserFilter};
use crate::sql::{self, bind_all, QueryBuf};
use crate::store::{StoreError, UserStore};
use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
    schema: String,
}

impl PgUserStore {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgUserStore {
            pool,
            schema: schema.into(),
        }
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<User>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(sqlx::query_as::<_, User>(&q.sql), &q.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, fields: &UserFields) -> Result<User, StoreError> {
        let q = sql::insert(&self.schema, fields);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let user = bind_all(sqlx::query_as::<_, User>(&q.sql), &q.params)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_many(&self, filter: &UserFilter) -> Result<Vec<User>, StoreError> {
        let q = sql::select_list(&self.schema, filter);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let users = bind_all(sqlx::query_as::<_, User>(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn update(&self, id: Uuid, fields: &UserFields) -> Result<User, StoreError> {
        let q = sql::update(&self.schema, id, fields);
        self.fetch_optional(&q).await?.ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<User, StoreError> {
        let q = sql::delete(&self.schema, id);
        self.fetch_optional(&q).await?.ok_or(StoreError::NotFound)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Create the target database through the `postgres` maintenance database if it does not exist.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let opts = PgConnectOptions::from_str(database_url)?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(()),
    };
    let mut conn = opts.database("postgres").connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Create the schema and users table if missing.
pub async fn ensure_users_table(pool: &PgPool, schema: &str) -> Result<(), StoreError> {
    for ddl in sql::create_users_table(schema) {
        tracing::debug!(sql = %ddl, "ddl");
        sqlx::query(&ddl).execute(pool).await?;
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
