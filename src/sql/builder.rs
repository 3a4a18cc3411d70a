//! Builds parameterized INSERT, SELECT, UPDATE, DELETE and DDL for the users table.

use crate::model::{UserFields, UserFilter};
use crate::sql::BindValue;
use uuid::Uuid;

pub const USERS_TABLE: &str = "users";

/// Columns returned by every statement, in `User` field order.
const USER_COLUMNS: [&str; 4] = ["id", "email", "name", "age"];

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
fn qualified_table(schema: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(USERS_TABLE))
}

fn column_list() -> String {
    USER_COLUMNS.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn push_param(&mut self, v: BindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Supplied fields as (column, value) pairs. Absent keys are skipped; an
/// explicit null binds NULL.
fn supplied(fields: &UserFields) -> Vec<(&'static str, BindValue)> {
    let mut out = Vec::new();
    if let Some(email) = &fields.email {
        out.push(("email", BindValue::Text(email.clone())));
    }
    if let Some(name) = &fields.name {
        out.push(("name", BindValue::Text(name.clone())));
    }
    if let Some(age) = fields.age {
        out.push(("age", BindValue::Int(age)));
    }
    out
}

/// CREATE SCHEMA and users table, both idempotent.
pub fn create_users_table(schema: &str) -> [String; 2] {
    [
        format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)),
        format!(
            r#"CREATE TABLE IF NOT EXISTS {} (
                "id" UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                "email" TEXT NOT NULL UNIQUE,
                "name" TEXT,
                "age" INTEGER
            )"#,
            qualified_table(schema)
        ),
    ]
}

/// INSERT all three columns; unsupplied fields bind NULL and the database decides.
pub fn insert(schema: &str, fields: &UserFields) -> QueryBuf {
    let mut q = QueryBuf::default();
    q.push_param(BindValue::Text(fields.email.clone().flatten()));
    q.push_param(BindValue::Text(fields.name.clone().flatten()));
    q.push_param(BindValue::Int(fields.age.flatten()));
    q.sql = format!(
        "INSERT INTO {} (\"email\", \"name\", \"age\") VALUES ($1, $2, $3) RETURNING {}",
        qualified_table(schema),
        column_list()
    );
    q
}

/// SELECT with exact-match filters on present keys only, ORDER BY id.
pub fn select_list(schema: &str, filter: &UserFilter) -> QueryBuf {
    let mut q = QueryBuf::default();
    let mut conditions = Vec::new();
    if let Some(name) = &filter.name {
        let n = q.push_param(BindValue::Text(Some(name.clone())));
        conditions.push(format!("{} = ${}", quoted("name"), n));
    }
    if let Some(email) = &filter.email {
        let n = q.push_param(BindValue::Text(Some(email.clone())));
        conditions.push(format!("{} = ${}", quoted("email"), n));
    }
    if let Some(age) = filter.age {
        let n = q.push_param(BindValue::Int(Some(age)));
        conditions.push(format!("{} = ${}", quoted("age"), n));
    }
    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}",
        column_list(),
        qualified_table(schema),
        where_clause,
        quoted("id")
    );
    q
}

/// UPDATE the supplied columns by id. With nothing supplied this degrades to a
/// SELECT by id so a missing row is still reported.
pub fn update(schema: &str, id: Uuid, fields: &UserFields) -> QueryBuf {
    let mut q = QueryBuf::default();
    let table = qualified_table(schema);
    let sets: Vec<String> = supplied(fields)
        .into_iter()
        .map(|(col, v)| {
            let n = q.push_param(v);
            format!("{} = ${}", quoted(col), n)
        })
        .collect();
    let id_param = q.push_param(BindValue::Uuid(id));
    q.sql = if sets.is_empty() {
        format!("SELECT {} FROM {} WHERE {} = ${}", column_list(), table, quoted("id"), id_param)
    } else {
        format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
            table,
            sets.join(", "),
            quoted("id"),
            id_param,
            column_list()
        )
    };
    q
}

/// DELETE by id, returning the removed row.
pub fn delete(schema: &str, id: Uuid) -> QueryBuf {
    let mut q = QueryBuf::default();
    let n = q.push_param(BindValue::Uuid(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${} RETURNING {}",
        qualified_table(schema),
        quoted("id"),
        n,
        column_list()
    );
    q
}
