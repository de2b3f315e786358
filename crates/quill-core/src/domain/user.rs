use serde::{Deserialize, Serialize};

/// User entity - a read-only identity snapshot.
///
/// Users are owned by a separate identity subsystem; this crate only ever
/// resolves them by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
}

impl User {
    pub fn new(id: i32, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}
