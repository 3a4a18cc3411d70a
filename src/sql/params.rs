//! Typed values bound to `$n` placeholders.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;
use uuid::Uuid;

/// A value that can be bound to a PostgreSQL query. `None` binds SQL NULL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindValue {
    Text(Option<String>),
    Int(Option<i32>),
    Uuid(Uuid),
}

/// Bind every parameter in order onto a typed query.
pub fn bind_all<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: &[BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for p in params {
        query = match p {
            BindValue::Text(s) => query.bind(s.clone()),
            BindValue::Int(n) => query.bind(*n),
            BindValue::Uuid(u) => query.bind(*u),
        };
    }
    query
}
