use super::queries;
use crate::error::{LibraryError, Result};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRow {
    pub name: String,
    pub born: Option<i32>,
    #[serde(default)]
    pub book_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookAuthor {
    pub name: String,
    #[serde(default)]
    pub born: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookRow {
    pub title: String,
    pub author: BookAuthor,
    pub published: i32,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Arguments of the add-book form.
#[derive(Debug, Clone, PartialEq)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub published: i32,
    pub genres: Vec<String>,
}

/// Operations the terminal client needs from the catalog server.
pub trait CatalogApi {
    /// Token sent as `Authorization: Bearer` on later calls.
    fn set_token(&mut self, token: Option<String>);

    fn all_authors(&mut self) -> Result<Vec<AuthorRow>>;

    fn all_books(&mut self, genre: Option<&str>) -> Result<Vec<BookRow>>;

    fn add_book(&mut self, book: &BookInput) -> Result<BookRow>;

    fn edit_author(&mut self, name: &str, born: i32) -> Result<AuthorRow>;

    /// Returns the signed token on success.
    fn login(&mut self, username: &str, password: &str) -> Result<String>;
}

#[derive(Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQLError>,
}

#[derive(Deserialize)]
struct GraphQLError {
    message: String,
    #[serde(default)]
    extensions: Option<ErrorExtensions>,
}

#[derive(Deserialize)]
struct ErrorExtensions {
    code: Option<String>,
}

impl From<GraphQLError> for LibraryError {
    fn from(error: GraphQLError) -> Self {
        let code = error.extensions.and_then(|e| e.code);
        match code.as_deref() {
            Some("UNAUTHENTICATED") => LibraryError::Unauthenticated,
            _ => LibraryError::Remote(error.message),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllAuthorsData {
    all_authors: Vec<AuthorRow>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllBooksData {
    all_books: Vec<BookRow>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddBookData {
    add_book: BookRow,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditAuthorData {
    edit_author: AuthorRow,
}

#[derive(Deserialize)]
struct TokenValue {
    value: String,
}

#[derive(Deserialize)]
struct LoginData {
    login: TokenValue,
}

/// [`CatalogApi`] over HTTP against a running `library serve`.
pub struct HttpApi {
    http: reqwest::blocking::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpApi {
    pub fn new(endpoint: &str) -> Result<Self> {
        // reqwest is built without a default TLS provider.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| LibraryError::Http(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            token: None,
        })
    }

    fn execute<T: DeserializeOwned>(&self, query: &str, variables: serde_json::Value) -> Result<T> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| LibraryError::Http(e.to_string()))?;
        let status = response.status();
        let body: GraphQLResponse<T> = response
            .json()
            .map_err(|e| LibraryError::Http(format!("{} ({})", e, status)))?;

        if let Some(error) = body.errors.into_iter().next() {
            return Err(error.into());
        }
        body.data
            .ok_or_else(|| LibraryError::Remote("Response contained no data".to_string()))
    }
}

impl CatalogApi for HttpApi {
    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn all_authors(&mut self) -> Result<Vec<AuthorRow>> {
        let data: AllAuthorsData = self.execute(queries::ALL_AUTHORS, json!({}))?;
        Ok(data.all_authors)
    }

    fn all_books(&mut self, genre: Option<&str>) -> Result<Vec<BookRow>> {
        let data: AllBooksData = self.execute(queries::ALL_BOOKS, json!({ "genre": genre }))?;
        Ok(data.all_books)
    }

    fn add_book(&mut self, book: &BookInput) -> Result<BookRow> {
        let data: AddBookData = self.execute(
            queries::CREATE_BOOK,
            json!({
                "title": book.title,
                "author": book.author,
                "published": book.published,
                "genres": book.genres,
            }),
        )?;
        Ok(data.add_book)
    }

    fn edit_author(&mut self, name: &str, born: i32) -> Result<AuthorRow> {
        let data: EditAuthorData = self.execute(
            queries::UPDATE_BIRTHYEAR,
            json!({ "name": name, "born": born }),
        )?;
        Ok(data.edit_author)
    }

    fn login(&mut self, username: &str, password: &str) -> Result<String> {
        let data: LoginData = self.execute(
            queries::LOGIN,
            json!({ "username": username, "password": password }),
        )?;
        Ok(data.login.value)
    }
}
