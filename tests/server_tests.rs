use std::sync::Arc;

use library_catalog::client::{BookInput, CatalogApi, HttpApi};
use library_catalog::config::AuthSettings;
use library_catalog::error::LibraryError;
use library_catalog::graphql::AppState;
use library_catalog::server;
use library_catalog::storage::{CatalogStore, NewBook};
use serde_json::{Value, json};

const ADD_BOOK: &str = r#"mutation { addBook(title: "NoSQL Distilled", author: "Martin Fowler", published: 2012, genres: ["database"]) { title author { name } } }"#;

struct TestServer {
    endpoint: String,
    state: Arc<AppState>,
    http: reqwest::Client,
}

impl TestServer {
    async fn start() -> Self {
        let _ = rustls::crypto::ring::default_provider().install_default();

        let store = CatalogStore::in_memory();
        store.create_user("mluukkai", "refactoring").unwrap();
        store
            .add_book(NewBook {
                title: "Clean Code".to_string(),
                author: "Robert Martin".to_string(),
                published: 2008,
                genres: vec!["refactoring".to_string()],
            })
            .unwrap();
        let state = Arc::new(AppState::new(Arc::new(store), AuthSettings::default()));

        let listener = server::bind("127.0.0.1", 0).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(server::serve(listener, Arc::clone(&state)));

        Self {
            endpoint: format!("http://{}/", addr),
            state,
            http: reqwest::Client::new(),
        }
    }

    async fn graphql(&self, query: &str, authorization: Option<&str>) -> Value {
        let mut request = self.http.post(&self.endpoint).json(&json!({ "query": query }));
        if let Some(value) = authorization {
            request = request.header(reqwest::header::AUTHORIZATION, value);
        }
        request.send().await.unwrap().json().await.unwrap()
    }

    async fn login(&self) -> String {
        let response = self
            .graphql(
                r#"mutation { login(username: "mluukkai", password: "secret") { value } }"#,
                None,
            )
            .await;
        response["data"]["login"]["value"]
            .as_str()
            .unwrap()
            .to_string()
    }
}

// =============================================================================
// Routes
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_health() {
    let server = TestServer::start().await;
    let body = server
        .http
        .get(format!("{}health", server.endpoint))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_graphiql_page() {
    let server = TestServer::start().await;
    let response = server.http.get(&server.endpoint).send().await.unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.to_lowercase().contains("graphiql"));
}

// =============================================================================
// Authorization header
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_add_book_without_header_is_unauthenticated() {
    let server = TestServer::start().await;
    let response = server.graphql(ADD_BOOK, None).await;

    assert_eq!(response["errors"][0]["extensions"]["code"], "UNAUTHENTICATED");
    assert_eq!(server.state.store.book_count().unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_book_with_bearer_token() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let response = server
        .graphql(ADD_BOOK, Some(&format!("Bearer {}", token)))
        .await;

    assert!(response.get("errors").is_none(), "{response}");
    assert_eq!(response["data"]["addBook"]["title"], "NoSQL Distilled");
    assert_eq!(response["data"]["addBook"]["author"]["name"], "Martin Fowler");
    assert_eq!(server.state.store.book_count().unwrap(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lowercase_bearer_scheme() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let response = server
        .graphql("{ me { username } }", Some(&format!("bearer {}", token)))
        .await;
    assert_eq!(response["data"]["me"]["username"], "mluukkai");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_basic_scheme_gives_no_identity() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let response = server
        .graphql("{ me { username } }", Some(&format!("Basic {}", token)))
        .await;
    assert_eq!(response["data"]["me"], Value::Null);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_garbage_token_gives_no_identity() {
    let server = TestServer::start().await;
    let response = server
        .graphql("{ me { username } }", Some("Bearer not.a.token"))
        .await;
    assert_eq!(response["data"]["me"], Value::Null);
}

// =============================================================================
// HTTP client
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_http_api_round_trip() {
    let server = TestServer::start().await;
    let endpoint = server.endpoint.clone();

    tokio::task::spawn_blocking(move || {
        let mut api = HttpApi::new(&endpoint).unwrap();

        let book = BookInput {
            title: "Refactoring, edition 2".to_string(),
            author: "Martin Fowler".to_string(),
            published: 2018,
            genres: vec!["refactoring".to_string()],
        };
        assert!(matches!(
            api.add_book(&book),
            Err(LibraryError::Unauthenticated)
        ));

        assert_eq!(
            api.login("mluukkai", "wrong").unwrap_err().to_string(),
            "wrong credentials"
        );
        let token = api.login("mluukkai", "secret").unwrap();
        api.set_token(Some(token));

        let added = api.add_book(&book).unwrap();
        assert_eq!(added.author.name, "Martin Fowler");

        let author = api.edit_author("Martin Fowler", 1963).unwrap();
        assert_eq!(author.born, Some(1963));

        let refactoring = api.all_books(Some("refactoring")).unwrap();
        assert_eq!(refactoring.len(), 2);

        let authors = api.all_authors().unwrap();
        let fowler = authors.iter().find(|a| a.name == "Martin Fowler").unwrap();
        assert_eq!(fowler.book_count, Some(1));
    })
    .await
    .unwrap();
}
