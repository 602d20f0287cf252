use std::fmt;

use async_graphql::ErrorExtensions;
use thiserror::Error;

/// The record kind a validation or lookup failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Author,
    Book,
    User,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Author => "Author",
            Entity::Book => "Book",
            Entity::User => "User",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{entity} {field} {message}")]
    Validation {
        entity: Entity,
        field: &'static str,
        message: String,
    },

    #[error("{entity} {field} must be unique, '{value}' already exists")]
    Duplicate {
        entity: Entity,
        field: &'static str,
        value: String,
    },

    #[error("{entity} not found: {key}")]
    NotFound { entity: Entity, key: String },

    #[error("not authenticated")]
    Unauthenticated,

    #[error("wrong credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("{0}")]
    Remote(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No configuration found. Run 'library init' first.")]
    NotInitialized,

    #[error("Already initialized at {0}")]
    AlreadyInitialized(String),
}

impl LibraryError {
    pub fn validation(entity: Entity, field: &'static str, message: impl Into<String>) -> Self {
        LibraryError::Validation {
            entity,
            field,
            message: message.into(),
        }
    }

    /// Whether the failure was caused by the caller's arguments.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            LibraryError::Validation { .. }
                | LibraryError::Duplicate { .. }
                | LibraryError::InvalidCredentials
        )
    }

    /// The GraphQL `extensions.code` reported for this error.
    pub fn code(&self) -> &'static str {
        match self {
            LibraryError::Unauthenticated => "UNAUTHENTICATED",
            e if e.is_user_input() => "BAD_USER_INPUT",
            _ => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl ErrorExtensions for LibraryError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.code());
            match self {
                LibraryError::Validation { entity, field, .. }
                | LibraryError::Duplicate { entity, field, .. } => {
                    e.set("entity", entity.to_string());
                    e.set("field", *field);
                }
                LibraryError::NotFound { entity, .. } => {
                    e.set("entity", entity.to_string());
                }
                _ => {}
            }
        })
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;
