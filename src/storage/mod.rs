//! Embedded document store for the catalog.
//!
//! Records live in three collections: `authors`, `books` and `users`. A
//! [`DatabaseUri`] selects the backend: `memory://` keeps them in process,
//! a directory stores each collection as a JSON array in `<name>.json`.
//!
//! ## Components
//!
//! - [`CatalogStore`]: queries and mutations over the three collections
//! - [`Collection`]: one collection with atomic file persistence
//! - [`DatabaseUri`]: parsed store location

mod catalog;
mod collection;
mod uri;

pub use catalog::{BookFilter, CatalogStore, NewBook, PopulatedBook};
pub use collection::Collection;
pub use uri::DatabaseUri;
