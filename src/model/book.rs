use super::{Document, generate_id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub published: i32,

    /// Id of the referenced [`super::Author`].
    pub author: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,

    #[serde(default)]
    pub created: DateTime<Utc>,
}

impl Book {
    pub fn new(title: impl Into<String>, published: i32, author_id: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            published,
            author: author_id.into(),
            genres: Vec::new(),
            created: Utc::now(),
        }
    }

    pub fn with_genres(mut self, genres: Vec<String>) -> Self {
        self.genres = genres;
        self
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

impl Document for Book {
    const COLLECTION: &'static str = "books";

    fn id(&self) -> &str {
        &self.id
    }
}
