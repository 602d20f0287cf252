//! # Library catalog - books and authors over GraphQL
//!
//! A small catalog of books and their authors, served as a GraphQL API and
//! browsable from a terminal client. Anyone can read the catalog; adding
//! books and editing authors requires a login token.
//!
//! ## Features
//!
//! - **GraphQL API**: Queries for books, authors and genres, mutations for edits and login
//! - **Document store**: JSON collections on disk, or purely in memory
//! - **Token auth**: HS256-signed login tokens checked on every request
//! - **Terminal client**: Browse, filter by genre, add books and set birth years
//!
//! ## Quick Start
//!
//! ```bash
//! # Create .library.yml and the data directory
//! library init
//!
//! # Load some sample books
//! library seed
//!
//! # Serve the API on port 4000
//! library serve
//!
//! # Browse it
//! library client
//! ```
//!
//! ## Modules
//!
//! - [`auth`]: Token issuing and request authentication
//! - [`cli`]: Command-line interface definitions
//! - [`client`]: Terminal client
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema and resolvers
//! - [`model`]: Stored records (Author, Book, User)
//! - [`server`]: HTTP transport
//! - [`storage`]: Document store
//! - [`validation`]: Input validation utilities

/// Login tokens and request authentication.
pub mod auth;

/// Command-line interface definitions using clap.
pub mod cli;

/// Terminal client built with ratatui.
pub mod client;

/// Configuration loading and management.
///
/// Handles `.library.yml` files and project discovery.
pub mod config;

/// Error types and result aliases.
///
/// Defines the `LibraryError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schema and resolvers.
pub mod graphql;

pub mod logging;

/// Stored records.
pub mod model;

pub mod server;

/// Document store with JSON-file and in-memory backends.
pub mod storage;

/// Input validation utilities.
///
/// Enforces the length limits on names, titles, genres and usernames.
pub mod validation;
