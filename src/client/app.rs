use super::api::{AuthorRow, BookInput, BookRow, CatalogApi};
use super::token_store::TokenStore;
use crate::error::LibraryError;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Authors,
    Books,
    /// Add-book form, only reachable with a token
    Add,
    /// Login form, only reachable without a token
    Login,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
    pub masked: bool,
}

impl Field {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: false,
        }
    }

    fn masked(label: &'static str) -> Self {
        Self {
            masked: true,
            ..Self::new(label)
        }
    }
}

/// A list of text inputs with one focused field.
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<Field>,
    pub focus: usize,
}

impl Form {
    fn new(fields: Vec<Field>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    fn prev_field(&mut self) {
        self.focus = if self.focus == 0 {
            self.fields.len() - 1
        } else {
            self.focus - 1
        };
    }

    fn push(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    fn pop(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focus = 0;
    }
}

pub const LOGIN_USERNAME: usize = 0;
pub const LOGIN_PASSWORD: usize = 1;

pub const BOOK_TITLE: usize = 0;
pub const BOOK_AUTHOR: usize = 1;
pub const BOOK_PUBLISHED: usize = 2;
pub const BOOK_GENRES: usize = 3;

/// Birth-year form shown under the author table when logged in.
#[derive(Debug, Clone, Default)]
pub struct BirthYearForm {
    pub selected_author: usize,
    pub year: String,
}

#[derive(Debug, Clone)]
pub struct Banner {
    pub message: String,
    pub expires_at: Instant,
}

pub struct App<A: CatalogApi> {
    api: A,
    token_store: TokenStore,
    pub token: Option<String>,
    pub page: Page,
    pub input_mode: InputMode,
    pub authors: Vec<AuthorRow>,
    pub books: Vec<BookRow>,
    /// Books of the active genre filter, `None` when showing all
    pub filtered_books: Option<Vec<BookRow>>,
    pub genre_filter: Option<String>,
    /// Highlighted genre button; 0 is "all genres"
    pub selected_genre: usize,
    pub login_form: Form,
    pub book_form: Form,
    pub born_form: BirthYearForm,
    pub banner: Option<Banner>,
    error_ttl: Duration,
}

impl<A: CatalogApi> App<A> {
    pub fn new(mut api: A, token_store: TokenStore, error_ttl: Duration) -> Self {
        let token = token_store.load();
        api.set_token(token.clone());

        let mut app = Self {
            api,
            token_store,
            token,
            page: Page::Authors,
            input_mode: InputMode::Normal,
            authors: Vec::new(),
            books: Vec::new(),
            filtered_books: None,
            genre_filter: None,
            selected_genre: 0,
            login_form: Form::new(vec![Field::new("username"), Field::masked("password")]),
            book_form: Form::new(vec![
                Field::new("title"),
                Field::new("author"),
                Field::new("published"),
                Field::new("genres (comma separated)"),
            ]),
            born_form: BirthYearForm::default(),
            banner: None,
            error_ttl,
        };
        app.refresh();
        app
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Pages reachable from the navigation bar in the current login state.
    pub fn pages(&self) -> [Page; 3] {
        if self.is_logged_in() {
            [Page::Authors, Page::Books, Page::Add]
        } else {
            [Page::Authors, Page::Books, Page::Login]
        }
    }

    pub fn refresh(&mut self) {
        self.refresh_authors();
        self.refresh_books();
    }

    fn refresh_authors(&mut self) {
        match self.api.all_authors() {
            Ok(authors) => {
                self.authors = authors;
                if self.born_form.selected_author >= self.authors.len() {
                    self.born_form.selected_author = 0;
                }
            }
            Err(e) => self.show_error(e.to_string()),
        }
    }

    fn refresh_books(&mut self) {
        match self.api.all_books(None) {
            Ok(books) => self.books = books,
            Err(e) => self.show_error(e.to_string()),
        }
        if let Some(genre) = self.genre_filter.clone() {
            self.apply_genre_filter(Some(genre));
        }
    }

    /// Shows a failed call. A rejected token is dropped so the login page comes back.
    fn handle_api_error(&mut self, err: LibraryError) {
        if matches!(err, LibraryError::Unauthenticated) && self.is_logged_in() {
            tracing::info!("Stored token rejected, logging out");
            self.forget_token();
            if self.page == Page::Add {
                self.set_page(Page::Login);
            } else {
                self.input_mode = InputMode::Normal;
            }
            self.show_error("session expired, please log in again");
            return;
        }
        self.show_error(err.to_string());
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.show_error_at(message, Instant::now());
    }

    pub fn show_error_at(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        tracing::debug!(%message, "Showing error banner");
        self.banner = Some(Banner {
            message,
            expires_at: now + self.error_ttl,
        });
    }

    /// Drops the banner once its display time has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.banner.as_ref().is_some_and(|b| now >= b.expires_at) {
            self.banner = None;
        }
    }

    /// Distinct genres of the loaded books, in first-seen order.
    pub fn genres(&self) -> Vec<String> {
        let mut genres: Vec<String> = Vec::new();
        for genre in self.books.iter().flat_map(|b| b.genres.iter()) {
            if !genres.contains(genre) {
                genres.push(genre.clone());
            }
        }
        genres
    }

    pub fn visible_books(&self) -> &[BookRow] {
        self.filtered_books.as_deref().unwrap_or(&self.books)
    }

    pub fn set_page(&mut self, page: Page) {
        if !self.pages().contains(&page) {
            return;
        }
        self.page = page;
        self.input_mode = match page {
            Page::Add | Page::Login => InputMode::Editing,
            Page::Authors | Page::Books => InputMode::Normal,
        };
    }

    fn apply_genre_filter(&mut self, genre: Option<String>) {
        match genre {
            None => {
                self.genre_filter = None;
                self.filtered_books = None;
            }
            Some(genre) => match self.api.all_books(Some(&genre)) {
                Ok(books) => {
                    self.filtered_books = Some(books);
                    self.genre_filter = Some(genre);
                }
                Err(e) => self.show_error(e.to_string()),
            },
        }
    }

    /// Applies the highlighted genre button.
    pub fn select_genre(&mut self) {
        let genre = match self.selected_genre {
            0 => None,
            i => self.genres().get(i - 1).cloned(),
        };
        self.apply_genre_filter(genre);
    }

    fn next_genre(&mut self) {
        let count = self.genres().len() + 1;
        self.selected_genre = (self.selected_genre + 1) % count;
    }

    fn prev_genre(&mut self) {
        let count = self.genres().len() + 1;
        self.selected_genre = if self.selected_genre == 0 {
            count - 1
        } else {
            self.selected_genre - 1
        };
    }

    pub fn submit_login(&mut self) {
        let username = self.login_form.value(LOGIN_USERNAME).trim().to_string();
        let password = self.login_form.value(LOGIN_PASSWORD).to_string();

        match self.api.login(&username, &password) {
            Ok(token) => {
                if let Err(e) = self.token_store.save(&token) {
                    tracing::warn!(error = %e, "Failed to persist token");
                }
                self.api.set_token(Some(token.clone()));
                self.token = Some(token);
                self.login_form.clear();
                self.set_page(Page::Authors);
            }
            Err(e) => self.show_error(e.to_string()),
        }
    }

    fn forget_token(&mut self) {
        if let Err(e) = self.token_store.clear() {
            tracing::warn!(error = %e, "Failed to remove stored token");
        }
        self.token = None;
        self.api.set_token(None);
    }

    pub fn logout(&mut self) {
        self.forget_token();
        self.authors.clear();
        self.books.clear();
        self.filtered_books = None;
        self.genre_filter = None;
        self.selected_genre = 0;
        self.born_form = BirthYearForm::default();
        self.set_page(Page::Authors);
        self.refresh();
    }

    pub fn submit_book(&mut self) {
        let published = match self.book_form.value(BOOK_PUBLISHED).trim().parse::<i32>() {
            Ok(year) => year,
            Err(_) => {
                self.show_error("published must be a number");
                return;
            }
        };
        let input = BookInput {
            title: self.book_form.value(BOOK_TITLE).trim().to_string(),
            author: self.book_form.value(BOOK_AUTHOR).trim().to_string(),
            published,
            genres: self
                .book_form
                .value(BOOK_GENRES)
                .split(',')
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty())
                .collect(),
        };

        match self.api.add_book(&input) {
            Ok(_) => {
                self.book_form.clear();
                self.refresh();
            }
            Err(e) => self.handle_api_error(e),
        }
    }

    pub fn submit_birth_year(&mut self) {
        let year = self.born_form.year.trim();
        if year.is_empty() {
            return;
        }
        let Ok(born) = year.parse::<i32>() else {
            self.show_error("born must be a number");
            return;
        };
        let Some(author) = self.authors.get(self.born_form.selected_author) else {
            return;
        };
        let name = author.name.clone();

        match self.api.edit_author(&name, born) {
            Ok(_) => {
                self.born_form.year.clear();
                self.refresh_authors();
            }
            Err(e) => self.handle_api_error(e),
        }
    }

    /// Handles one key press. Returns `true` when the client should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.input_mode {
            InputMode::Normal => return self.handle_normal_key(key),
            InputMode::Editing => match self.page {
                Page::Login => self.handle_form_key(key, FormKind::Login),
                Page::Add => self.handle_form_key(key, FormKind::Book),
                Page::Authors => self.handle_birth_year_key(key),
                Page::Books => self.input_mode = InputMode::Normal,
            },
        }
        false
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('a') => self.set_page(Page::Authors),
            KeyCode::Char('b') => self.set_page(Page::Books),
            KeyCode::Char('n') => self.set_page(Page::Add),
            KeyCode::Char('l') if !self.is_logged_in() => self.set_page(Page::Login),
            KeyCode::Char('o') if self.is_logged_in() => self.logout(),
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Tab => {
                let pages = self.pages();
                let pos = pages.iter().position(|p| *p == self.page).unwrap_or(0);
                self.set_page(pages[(pos + 1) % pages.len()]);
            }
            KeyCode::Left if self.page == Page::Books => self.prev_genre(),
            KeyCode::Right if self.page == Page::Books => self.next_genre(),
            KeyCode::Enter if self.page == Page::Books => self.select_genre(),
            KeyCode::Enter | KeyCode::Char('e') => match self.page {
                Page::Authors if self.is_logged_in() && !self.authors.is_empty() => {
                    self.input_mode = InputMode::Editing;
                }
                Page::Add | Page::Login => self.input_mode = InputMode::Editing,
                _ => {}
            },
            _ => {}
        }
        false
    }

    fn handle_form_key(&mut self, key: KeyEvent, kind: FormKind) {
        let form = match kind {
            FormKind::Login => &mut self.login_form,
            FormKind::Book => &mut self.book_form,
        };
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Backspace => form.pop(),
            KeyCode::Char(c) => form.push(c),
            KeyCode::Enter => match kind {
                FormKind::Login => self.submit_login(),
                FormKind::Book => self.submit_book(),
            },
            _ => {}
        }
    }

    fn handle_birth_year_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Up if !self.authors.is_empty() => {
                let count = self.authors.len();
                self.born_form.selected_author = (self.born_form.selected_author + count - 1) % count;
            }
            KeyCode::Down if !self.authors.is_empty() => {
                self.born_form.selected_author =
                    (self.born_form.selected_author + 1) % self.authors.len();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || (c == '-' && self.born_form.year.is_empty()) => {
                self.born_form.year.push(c);
            }
            KeyCode::Backspace => {
                self.born_form.year.pop();
            }
            KeyCode::Enter => self.submit_birth_year(),
            _ => {}
        }
    }
}

#[derive(Clone, Copy)]
enum FormKind {
    Login,
    Book,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LibraryError, Result};
    use crate::storage::{BookFilter, CatalogStore, NewBook};
    use tempfile::TempDir;

    const TOKEN: &str = "valid-token";

    /// Answers like the server would, backed by an in-memory store.
    struct StoreApi {
        store: CatalogStore,
        token: Option<String>,
    }

    impl StoreApi {
        fn new() -> Self {
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
            store
                .add_book(NewBook {
                    title: "Crime and punishment".to_string(),
                    author: "Fyodor Dostoevsky".to_string(),
                    published: 1866,
                    genres: vec!["classic".to_string(), "crime".to_string()],
                })
                .unwrap();
            Self { store, token: None }
        }

        fn require_token(&self) -> Result<()> {
            match self.token.as_deref() {
                Some(TOKEN) => Ok(()),
                _ => Err(LibraryError::Unauthenticated),
            }
        }
    }

    impl CatalogApi for StoreApi {
        fn set_token(&mut self, token: Option<String>) {
            self.token = token;
        }

        fn all_authors(&mut self) -> Result<Vec<AuthorRow>> {
            let authors = self.store.list_authors()?;
            authors
                .into_iter()
                .map(|a| {
                    Ok(AuthorRow {
                        book_count: Some(self.store.count_books_by(&a.id)? as i64),
                        name: a.name,
                        born: a.born,
                    })
                })
                .collect()
        }

        fn all_books(&mut self, genre: Option<&str>) -> Result<Vec<BookRow>> {
            let filter = BookFilter {
                author: None,
                genre: genre.map(str::to_string),
            };
            Ok(self
                .store
                .find_books(&filter)?
                .into_iter()
                .map(|p| BookRow {
                    title: p.book.title,
                    author: crate::client::BookAuthor {
                        name: p.author.name,
                        born: p.author.born,
                    },
                    published: p.book.published,
                    genres: p.book.genres,
                })
                .collect())
        }

        fn add_book(&mut self, book: &BookInput) -> Result<BookRow> {
            self.require_token()?;
            let p = self.store.add_book(NewBook {
                title: book.title.clone(),
                author: book.author.clone(),
                published: book.published,
                genres: book.genres.clone(),
            })?;
            Ok(BookRow {
                title: p.book.title,
                author: crate::client::BookAuthor {
                    name: p.author.name,
                    born: p.author.born,
                },
                published: p.book.published,
                genres: p.book.genres,
            })
        }

        fn edit_author(&mut self, name: &str, born: i32) -> Result<AuthorRow> {
            self.require_token()?;
            let author = self.store.set_author_born(name, born)?;
            Ok(AuthorRow {
                name: author.name,
                born: author.born,
                book_count: None,
            })
        }

        fn login(&mut self, username: &str, password: &str) -> Result<String> {
            match self.store.find_user_by_username(username)? {
                Some(_) if password == "secret" => Ok(TOKEN.to_string()),
                _ => Err(LibraryError::InvalidCredentials),
            }
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App<StoreApi>, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn create_test_app() -> (App<StoreApi>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let token_store = TokenStore::new(temp_dir.path().join("token"));
        let app = App::new(StoreApi::new(), token_store, Duration::from_secs(5));
        (app, temp_dir)
    }

    fn log_in(app: &mut App<StoreApi>) {
        app.set_page(Page::Login);
        type_text(app, "mluukkai");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "secret");
        app.handle_key(key(KeyCode::Enter));
    }

    #[test]
    fn test_initial_state_loads_lists() {
        let (app, _temp_dir) = create_test_app();
        assert_eq!(app.page, Page::Authors);
        assert_eq!(app.authors.len(), 2);
        assert_eq!(app.books.len(), 2);
        assert!(!app.is_logged_in());
        assert_eq!(app.pages(), [Page::Authors, Page::Books, Page::Login]);
    }

    #[test]
    fn test_add_page_requires_login() {
        let (mut app, _temp_dir) = create_test_app();
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.page, Page::Authors);
        app.handle_key(key(KeyCode::Char('l')));
        assert_eq!(app.page, Page::Login);
        assert_eq!(app.input_mode, InputMode::Editing);
    }

    #[test]
    fn test_login_persists_token() {
        let (mut app, temp_dir) = create_test_app();
        log_in(&mut app);

        assert!(app.is_logged_in());
        assert_eq!(app.page, Page::Authors);
        assert!(app.banner.is_none());
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("token")).unwrap(),
            TOKEN
        );
        assert_eq!(app.pages(), [Page::Authors, Page::Books, Page::Add]);

        // A new session picks the token up again.
        let restored = App::new(
            StoreApi::new(),
            TokenStore::new(temp_dir.path().join("token")),
            Duration::from_secs(5),
        );
        assert!(restored.is_logged_in());
    }

    #[test]
    fn test_wrong_password_shows_banner() {
        let (mut app, _temp_dir) = create_test_app();
        app.set_page(Page::Login);
        type_text(&mut app, "mluukkai");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "hunter2");
        app.handle_key(key(KeyCode::Enter));

        assert!(!app.is_logged_in());
        assert_eq!(app.banner.as_ref().unwrap().message, "wrong credentials");
    }

    #[test]
    fn test_banner_expires() {
        let (mut app, _temp_dir) = create_test_app();
        let now = Instant::now();
        app.show_error_at("boom", now);

        app.tick(now + Duration::from_secs(4));
        assert!(app.banner.is_some());
        app.tick(now + Duration::from_secs(5));
        assert!(app.banner.is_none());
    }

    #[test]
    fn test_add_book_refetches_lists() {
        let (mut app, _temp_dir) = create_test_app();
        log_in(&mut app);
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.page, Page::Add);

        type_text(&mut app, "Refactoring, edition 2");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "Martin Fowler");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "2018");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "refactoring, design");
        app.handle_key(key(KeyCode::Enter));

        assert!(app.banner.is_none());
        assert_eq!(app.books.len(), 3);
        assert_eq!(app.authors.len(), 3);
        assert_eq!(app.book_form.value(BOOK_TITLE), "");
        let added = app.books.iter().find(|b| b.title == "Refactoring, edition 2").unwrap();
        assert_eq!(added.genres, vec!["refactoring", "design"]);
    }

    #[test]
    fn test_add_book_rejects_non_numeric_year() {
        let (mut app, _temp_dir) = create_test_app();
        log_in(&mut app);
        app.set_page(Page::Add);
        type_text(&mut app, "Some Title");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "Some Author");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "soon");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.banner.as_ref().unwrap().message, "published must be a number");
        assert_eq!(app.books.len(), 2);
    }

    #[test]
    fn test_edit_birth_year() {
        let (mut app, _temp_dir) = create_test_app();
        log_in(&mut app);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Editing);
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.born_form.selected_author, 1);
        type_text(&mut app, "1821");
        app.handle_key(key(KeyCode::Enter));

        assert!(app.banner.is_none());
        let author = app.authors.iter().find(|a| a.name == "Fyodor Dostoevsky").unwrap();
        assert_eq!(author.born, Some(1821));
        assert!(app.born_form.year.is_empty());
    }

    #[test]
    fn test_birth_year_form_hidden_when_logged_out() {
        let (mut app, _temp_dir) = create_test_app();
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_genre_buttons_filter_books() {
        let (mut app, _temp_dir) = create_test_app();
        app.handle_key(key(KeyCode::Char('b')));
        assert_eq!(app.genres(), vec!["refactoring", "classic", "crime"]);

        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.genre_filter.as_deref(), Some("classic"));
        let titles: Vec<_> = app.visible_books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Crime and punishment"]);
        // Buttons still come from the unfiltered list.
        assert_eq!(app.genres().len(), 3);

        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Enter));
        assert!(app.genre_filter.is_none());
        assert_eq!(app.visible_books().len(), 2);
    }

    #[test]
    fn test_logout_clears_token() {
        let (mut app, temp_dir) = create_test_app();
        log_in(&mut app);
        app.handle_key(key(KeyCode::Char('o')));

        assert!(!app.is_logged_in());
        assert!(!temp_dir.path().join("token").exists());
        assert_eq!(app.page, Page::Authors);
        assert_eq!(app.authors.len(), 2);
    }

    #[test]
    fn test_rejected_stored_token_logs_out() {
        let temp_dir = TempDir::new().unwrap();
        let token_path = temp_dir.path().join("token");
        std::fs::write(&token_path, "expired-token").unwrap();
        let mut app = App::new(
            StoreApi::new(),
            TokenStore::new(token_path.clone()),
            Duration::from_secs(5),
        );
        assert!(app.is_logged_in());

        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "1821");
        app.handle_key(key(KeyCode::Enter));

        assert!(!app.is_logged_in());
        assert!(!token_path.exists());
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.pages(), [Page::Authors, Page::Books, Page::Login]);
        assert_eq!(
            app.banner.as_ref().unwrap().message,
            "session expired, please log in again"
        );
        assert!(app.authors.iter().all(|a| a.born.is_none()));
    }

    #[test]
    fn test_rejected_token_on_add_page_opens_login() {
        let temp_dir = TempDir::new().unwrap();
        let token_path = temp_dir.path().join("token");
        std::fs::write(&token_path, "expired-token").unwrap();
        let mut app = App::new(
            StoreApi::new(),
            TokenStore::new(token_path),
            Duration::from_secs(5),
        );

        app.set_page(Page::Add);
        type_text(&mut app, "Refactoring to patterns");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "Joshua Kerievsky");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "2008");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.page, Page::Login);
        assert_eq!(app.books.len(), 2);
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _temp_dir) = create_test_app();
        assert!(app.handle_key(key(KeyCode::Char('q'))));
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }
}
