use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Schema};

use crate::auth::{CurrentUser, TokenIssuer};
use crate::config::AuthSettings;
use crate::error::LibraryError;
use crate::storage::{BookFilter, CatalogStore, NewBook};

use super::types::*;

pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Shared by every resolver through the schema data.
pub struct AppState {
    pub store: Arc<CatalogStore>,
    pub tokens: TokenIssuer,
    pub auth: AuthSettings,
}

impl AppState {
    pub fn new(store: Arc<CatalogStore>, auth: AuthSettings) -> Self {
        Self {
            store,
            tokens: TokenIssuer::from_settings(&auth),
            auth,
        }
    }
}

pub fn build_schema(state: Arc<AppState>) -> CatalogSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

fn get_state<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<AppState>> {
    ctx.data::<Arc<AppState>>()
}

fn require_user<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a CurrentUser> {
    ctx.data_opt::<CurrentUser>()
        .ok_or_else(|| LibraryError::Unauthenticated.extend())
}

/// Converts a store error, attaching the mutation arguments to user-input failures.
fn input_error(err: LibraryError, args: serde_json::Value) -> async_graphql::Error {
    if !err.is_user_input() {
        return err.extend();
    }
    let invalid_args = async_graphql::Value::from_json(args).unwrap_or(async_graphql::Value::Null);
    err.extend_with(|_, e| e.set("invalidArgs", invalid_args))
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Total number of books
    async fn book_count(&self, ctx: &Context<'_>) -> async_graphql::Result<usize> {
        let state = get_state(ctx)?;
        state.store.book_count().map_err(|e| e.extend())
    }

    /// Total number of authors
    async fn author_count(&self, ctx: &Context<'_>) -> async_graphql::Result<usize> {
        let state = get_state(ctx)?;
        state.store.author_count().map_err(|e| e.extend())
    }

    /// All books, optionally restricted to an author name and/or a genre
    async fn all_books(
        &self,
        ctx: &Context<'_>,
        author: Option<String>,
        genre: Option<String>,
    ) -> async_graphql::Result<Vec<Book>> {
        let state = get_state(ctx)?;
        let filter = BookFilter { author, genre };
        tracing::debug!(?filter, "Resolving allBooks");
        let books = state.store.find_books(&filter).map_err(|e| e.extend())?;
        Ok(books.into_iter().map(Book::from).collect())
    }

    /// All authors
    async fn all_authors(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Author>> {
        let state = get_state(ctx)?;
        let authors = state.store.list_authors().map_err(|e| e.extend())?;
        Ok(authors.into_iter().map(Author::from).collect())
    }

    /// Distinct genres across all books, sorted
    async fn all_genres(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<String>> {
        let state = get_state(ctx)?;
        state.store.genres().map_err(|e| e.extend())
    }

    /// The authenticated user, if any
    async fn me(&self, ctx: &Context<'_>) -> Option<User> {
        ctx.data_opt::<CurrentUser>()
            .map(|CurrentUser(user)| user.clone().into())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Add a book, creating its author if no author has that name yet
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        author: String,
        published: i32,
        genres: Vec<String>,
    ) -> async_graphql::Result<Book> {
        let state = get_state(ctx)?;
        let user = require_user(ctx)?;
        tracing::debug!(username = %user.0.username, %title, %author, "Resolving addBook");

        let args = serde_json::json!({
            "title": title,
            "author": author,
            "published": published,
            "genres": genres,
        });
        let book = state
            .store
            .add_book(NewBook {
                title,
                author,
                published,
                genres,
            })
            .map_err(|e| input_error(e, args))?;
        Ok(book.into())
    }

    /// Overwrite the birth year of an existing author
    async fn edit_author(
        &self,
        ctx: &Context<'_>,
        name: String,
        set_born_to: i32,
    ) -> async_graphql::Result<Author> {
        let state = get_state(ctx)?;
        let user = require_user(ctx)?;
        tracing::debug!(username = %user.0.username, %name, set_born_to, "Resolving editAuthor");

        let author = state
            .store
            .set_author_born(&name, set_born_to)
            .map_err(|e| e.extend())?;
        Ok(author.into())
    }

    /// Register a new account
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        favourite_genre: String,
    ) -> async_graphql::Result<User> {
        let state = get_state(ctx)?;
        let user = state
            .store
            .create_user(&username, &favourite_genre)
            .map_err(|e| {
                input_error(
                    e,
                    serde_json::json!({
                        "username": username,
                        "favouriteGenre": favourite_genre,
                    }),
                )
            })?;
        Ok(user.into())
    }

    /// Exchange a username and the shared password for a signed token
    async fn login(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> async_graphql::Result<Token> {
        let state = get_state(ctx)?;
        let user = state
            .store
            .find_user_by_username(&username)
            .map_err(|e| e.extend())?;

        let user = match user {
            Some(user) if password == state.auth.shared_password => user,
            _ => {
                tracing::info!(%username, "Rejected login");
                return Err(input_error(
                    LibraryError::InvalidCredentials,
                    serde_json::json!({ "username": username }),
                ));
            }
        };

        let value = state.tokens.issue(&user).map_err(|e| e.extend())?;
        tracing::info!(username = %user.username, "Issued login token");
        Ok(Token { value })
    }
}
