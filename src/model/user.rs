use super::{Document, generate_id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account. No password is stored: every login checks the shared
/// password from the auth settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,

    #[serde(default)]
    pub favourite_genre: String,

    #[serde(default)]
    pub created: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, favourite_genre: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            username: username.into(),
            favourite_genre: favourite_genre.into(),
            created: Utc::now(),
        }
    }
}

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }
}
