//! Reader model and session state

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Registered reader, keyed by student id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub name: String,
    pub student_id: String,
}

impl User {
    pub fn new(name: impl Into<String>, student_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            student_id: student_id.into(),
        }
    }
}

/// Register user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Student id must not be empty"))]
    pub student_id: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Student id must not be empty"))]
    pub student_id: String,
}

/// Authentication context for operations acting on behalf of a reader.
///
/// A session is either logged out (`current` is `None`) or holds exactly one
/// reader. It is a plain value owned by the caller: the catalog reads it on
/// every authenticated operation and only `login`/`logout` change it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    current: Option<User>,
}

impl Session {
    pub fn logged_out() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub(crate) fn set(&mut self, user: User) {
        self.current = Some(user);
    }

    pub(crate) fn clear(&mut self) {
        self.current = None;
    }
}
