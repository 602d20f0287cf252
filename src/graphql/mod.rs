//! GraphQL schema and resolvers for the catalog.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server
//! library serve --port 4000
//!
//! # Execute a query against the local store
//! library query '{ allBooks(genre: "refactoring") { title author { name } } }'
//!
//! # Execute a mutation, authenticated with a login token
//! library mutate 'editAuthor(name: "Sandi Metz", setBornTo: 1953) { name born }' --token "$TOKEN"
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `bookCount`, `authorCount`, `allBooks`, `allAuthors`, `allGenres`, `me`
//! - **Mutations**: `addBook`, `editAuthor`, `createUser`, `login`
//!
//! `addBook` and `editAuthor` require a [`crate::auth::CurrentUser`] in the
//! request data and fail with `UNAUTHENTICATED` otherwise.

mod schema;
mod types;

pub use schema::{AppState, CatalogSchema, MutationRoot, QueryRoot, build_schema};
pub use types::*;
