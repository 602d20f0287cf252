//! Field constraints enforced by the store before a record is written.

use crate::error::{Entity, LibraryError, Result};

/// Minimum length of an author name.
pub const MIN_AUTHOR_NAME_LENGTH: usize = 4;

/// Minimum length of a book title.
pub const MIN_TITLE_LENGTH: usize = 2;

/// Minimum length of a username.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum length of any stored string.
pub const MAX_FIELD_LENGTH: usize = 200;

/// Maximum length of a single genre tag.
pub const MAX_GENRE_LENGTH: usize = 50;

fn validate_text(entity: Entity, field: &'static str, value: &str, min: usize) -> Result<()> {
    let len = value.trim().chars().count();
    if len == 0 {
        return Err(LibraryError::validation(entity, field, "is required"));
    }
    if len < min {
        return Err(LibraryError::validation(
            entity,
            field,
            format!("must be at least {} characters", min),
        ));
    }
    if len > MAX_FIELD_LENGTH {
        return Err(LibraryError::validation(
            entity,
            field,
            format!("exceeds maximum length of {} characters", MAX_FIELD_LENGTH),
        ));
    }
    Ok(())
}

/// Validates an author name.
pub fn validate_author_name(name: &str) -> Result<()> {
    validate_text(Entity::Author, "name", name, MIN_AUTHOR_NAME_LENGTH)
}

/// Validates a book title.
pub fn validate_title(title: &str) -> Result<()> {
    validate_text(Entity::Book, "title", title, MIN_TITLE_LENGTH)
}

/// Validates the genre tags of a book.
pub fn validate_genres(genres: &[String]) -> Result<()> {
    for genre in genres {
        if genre.trim().is_empty() {
            return Err(LibraryError::validation(
                Entity::Book,
                "genres",
                "cannot contain an empty genre",
            ));
        }
        if genre.trim().chars().count() > MAX_GENRE_LENGTH {
            return Err(LibraryError::validation(
                Entity::Book,
                "genres",
                format!("exceeds maximum length of {} characters", MAX_GENRE_LENGTH),
            ));
        }
    }
    Ok(())
}

/// Validates a username.
pub fn validate_username(username: &str) -> Result<()> {
    validate_text(Entity::User, "username", username, MIN_USERNAME_LENGTH)
}
