use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn library_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("library"));
    for var in [
        "LIBRARY_DATABASE_URI",
        "LIBRARY_JWT_SECRET",
        "LIBRARY_PORT",
        "LIBRARY_ENDPOINT",
        "LIBRARY_TOKEN",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn init_and_seed(temp_dir: &TempDir) {
    library_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success();

    library_cmd()
        .arg("seed")
        .current_dir(temp_dir.path())
        .assert()
        .success();
}

fn login_token(temp_dir: &TempDir) -> String {
    let output = library_cmd()
        .args(["mutate", "login(username: \"mluukkai\", password: \"secret\") { value }"])
        .current_dir(temp_dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    response["data"]["login"]["value"]
        .as_str()
        .unwrap()
        .to_string()
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    library_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("library catalog"));
}

#[test]
fn test_version() {
    library_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("library"));
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();

    library_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    assert!(temp_dir.path().join(".library.yml").exists());
    assert!(temp_dir.path().join(".library").is_dir());
}

#[test]
fn test_init_twice_fails() {
    let temp_dir = TempDir::new().unwrap();

    library_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success();

    library_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Already initialized"));
}

#[test]
fn test_seed_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    init_and_seed(&temp_dir);

    library_cmd()
        .arg("seed")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 authors, 0 books and 0 users"));

    library_cmd()
        .args(["query", "{ bookCount authorCount }"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"bookCount\": 7"))
        .stdout(predicate::str::contains("\"authorCount\": 5"));
}

// =============================================================================
// GraphQL
// =============================================================================

#[test]
fn test_query_filters_books() {
    let temp_dir = TempDir::new().unwrap();
    init_and_seed(&temp_dir);

    library_cmd()
        .args([
            "query",
            "query($genre: String) { allBooks(genre: $genre) { title } }",
            "--variables",
            "{\"genre\": \"classic\"}",
        ])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Crime and punishment"))
        .stdout(predicate::str::contains("The Demon"))
        .stdout(predicate::str::contains("Clean Code").not());
}

#[test]
fn test_memory_store_starts_empty() {
    let temp_dir = TempDir::new().unwrap();

    library_cmd()
        .args(["query", "{ bookCount }", "--database-uri", "memory://"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"bookCount\": 0"));
}

#[test]
fn test_mutate_requires_token() {
    let temp_dir = TempDir::new().unwrap();
    init_and_seed(&temp_dir);

    library_cmd()
        .args([
            "mutate",
            "addBook(title: \"NoSQL Distilled\", author: \"Martin Fowler\", published: 2012, genres: [\"database\"]) { title }",
        ])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("UNAUTHENTICATED"))
        .stderr(predicate::str::contains("not authenticated"));
}

#[test]
fn test_login_with_wrong_password_fails() {
    let temp_dir = TempDir::new().unwrap();
    init_and_seed(&temp_dir);

    library_cmd()
        .args(["mutate", "login(username: \"mluukkai\", password: \"hunter2\") { value }"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("BAD_USER_INPUT"))
        .stderr(predicate::str::contains("wrong credentials"));
}

#[test]
fn test_login_then_add_book() {
    let temp_dir = TempDir::new().unwrap();
    init_and_seed(&temp_dir);
    let token = login_token(&temp_dir);

    library_cmd()
        .args([
            "mutate",
            "addBook(title: \"NoSQL Distilled\", author: \"Martin Fowler\", published: 2012, genres: [\"database\"]) { title author { name born } }",
            "--token",
            &token,
        ])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("NoSQL Distilled"))
        .stdout(predicate::str::contains("\"born\": 1963"));

    library_cmd()
        .args(["query", "{ me { username favouriteGenre } bookCount }", "--token", &token])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"username\": \"mluukkai\""))
        .stdout(predicate::str::contains("\"bookCount\": 8"));
}

#[test]
fn test_token_from_other_secret_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    init_and_seed(&temp_dir);
    let token = login_token(&temp_dir);

    library_cmd()
        .args(["query", "{ me { username } }", "--token", &token])
        .args(["--jwt-secret", "another-secret"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"me\": null"))
        .stderr(predicate::str::contains("token rejected"));
}
