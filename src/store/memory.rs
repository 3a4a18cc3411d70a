//! In-process `UserStore` for router tests. Mirrors the table's unique email constraint.

use crate::model::{User, UserFields, UserFilter};
use crate::store::{StoreError, UserStore};
use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

fn matches(filter: &UserFilter, user: &User) -> bool {
    filter.name.as_ref().map_or(true, |n| user.name.as_ref() == Some(n))
        && filter.email.as_ref().map_or(true, |e| &user.email == e)
        && filter.age.map_or(true, |a| user.age == Some(a))
}

fn not_null_violation() -> StoreError {
    StoreError::Database(sqlx::Error::Protocol("email is NOT NULL".into()))
}

fn email_taken(users: &[User], email: &str, except: Option<Uuid>) -> bool {
    users.iter().any(|u| u.email == email && Some(u.id) != except)
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, fields: &UserFields) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        let email = fields.email.clone().flatten().ok_or_else(not_null_violation)?;
        if email_taken(&users, &email, None) {
            return Err(StoreError::UniqueViolation("users_email_key".into()));
        }
        let user = User {
            id: Uuid::new_v4(),
            email,
            name: fields.name.clone().flatten(),
            age: fields.age.flatten(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_many(&self, filter: &UserFilter) -> Result<Vec<User>, StoreError> {
        let users = self.users.lock().unwrap();
        let mut out: Vec<User> = users.iter().filter(|u| matches(filter, u)).cloned().collect();
        out.sort_by_key(|u| u.id);
        Ok(out)
    }

    async fn update(&self, id: Uuid, fields: &UserFields) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if !users.iter().any(|u| u.id == id) {
            return Err(StoreError::NotFound);
        }
        let email = match &fields.email {
            Some(Some(email)) if email_taken(&users, email, Some(id)) => {
                return Err(StoreError::UniqueViolation("users_email_key".into()));
            }
            Some(Some(email)) => Some(email.clone()),
            Some(None) => return Err(not_null_violation()),
            None => None,
        };
        let user = users.iter_mut().find(|u| u.id == id).ok_or(StoreError::NotFound)?;
        if let Some(email) = email {
            user.email = email;
        }
        if let Some(name) = &fields.name {
            user.name = name.clone();
        }
        if let Some(age) = fields.age {
            user.age = age;
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        let pos = users.iter().position(|u| u.id == id).ok_or(StoreError::NotFound)?;
        Ok(users.remove(pos))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_matches_everything() {
        let user = User {
            id: Uuid::new_v4(),
            email: "x@y.z".into(),
            name: None,
            age: None,
        };
        assert!(matches(&UserFilter::default(), &user));
        let by_name = UserFilter {
            name: Some("x".into()),
            ..Default::default()
        };
        assert!(!matches(&by_name, &user));
    }
}
