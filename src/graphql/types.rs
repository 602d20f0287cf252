use super::schema::AppState;
use crate::model;
use crate::storage::PopulatedBook;
use async_graphql::{ComplexObject, Context, ErrorExtensions, ID, SimpleObject};
use std::sync::Arc;

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Author {
    pub id: ID,
    pub name: String,
    pub born: Option<i32>,
}

#[ComplexObject]
impl Author {
    /// Number of books referencing this author, counted on every resolution
    async fn book_count(&self, ctx: &Context<'_>) -> async_graphql::Result<usize> {
        let state = ctx.data::<Arc<AppState>>()?;
        state
            .store
            .count_books_by(self.id.as_str())
            .map_err(|e| e.extend())
    }
}

impl From<model::Author> for Author {
    fn from(a: model::Author) -> Self {
        Self {
            id: ID(a.id),
            name: a.name,
            born: a.born,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct Book {
    pub id: ID,
    pub title: String,
    pub published: i32,
    pub genres: Vec<String>,
    pub author: Author,
}

impl From<PopulatedBook> for Book {
    fn from(p: PopulatedBook) -> Self {
        Self {
            id: ID(p.book.id),
            title: p.book.title,
            published: p.book.published,
            genres: p.book.genres,
            author: p.author.into(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct User {
    pub id: ID,
    pub username: String,
    pub favourite_genre: String,
}

impl From<model::User> for User {
    fn from(u: model::User) -> Self {
        Self {
            id: ID(u.id),
            username: u.username,
            favourite_genre: u.favourite_genre,
        }
    }
}

/// A signed login token.
#[derive(SimpleObject, Clone)]
pub struct Token {
    pub value: String,
}
