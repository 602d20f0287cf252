use super::{Document, generate_id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub born: Option<i32>,

    #[serde(default)]
    pub created: DateTime<Utc>,

    #[serde(default)]
    pub updated: DateTime<Utc>,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            name: name.into(),
            born: None,
            created: now,
            updated: now,
        }
    }

    pub fn with_born(mut self, born: i32) -> Self {
        self.born = Some(born);
        self
    }

    pub fn touch(&mut self) {
        self.updated = Utc::now();
    }
}

impl Document for Author {
    const COLLECTION: &'static str = "authors";

    fn id(&self) -> &str {
        &self.id
    }
}
