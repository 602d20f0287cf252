//! Records held by the document store.
//!
//! - [`Author`]: a writer, identified in mutations by its unique name
//! - [`Book`]: a title referencing exactly one author by id
//! - [`User`]: an account that can log in and mutate the catalog
//!
//! Every record implements [`Document`] so the storage layer can persist
//! it in a named collection.

mod author;
mod book;
mod user;

pub use author::Author;
pub use book::Book;
pub use user::User;

/// A record stored in its own collection.
pub trait Document: Clone + serde::Serialize + serde::de::DeserializeOwned {
    /// Collection (and file stem) the record lives in.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

const ID_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

const ID_LENGTH: usize = 16;

/// Generates a random record identifier.
pub fn generate_id() -> String {
    nanoid::format(nanoid::rngs::default, &ID_ALPHABET, ID_LENGTH)
}
