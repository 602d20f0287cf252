use super::collection::Collection;
use super::uri::DatabaseUri;
use crate::{
    error::{Entity, LibraryError, Result},
    model::{Author, Book, User},
    validation,
};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Optional restrictions for [`CatalogStore::find_books`]. Set fields are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// Exact author name.
    pub author: Option<String>,
    /// Genre the book must be tagged with.
    pub genre: Option<String>,
}

impl BookFilter {
    pub fn by_author(author: impl Into<String>) -> Self {
        Self {
            author: Some(author.into()),
            genre: None,
        }
    }

    pub fn by_genre(genre: impl Into<String>) -> Self {
        Self {
            author: None,
            genre: Some(genre.into()),
        }
    }
}

/// A book with its author reference resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulatedBook {
    pub book: Book,
    pub author: Author,
}

/// Arguments of [`CatalogStore::add_book`].
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub published: i32,
    pub genres: Vec<String>,
}

struct Collections {
    authors: Collection<Author>,
    books: Collection<Book>,
    users: Collection<User>,
}

impl Collections {
    fn author_named(&self, name: &str) -> Option<&Author> {
        self.authors.find(|a| a.name == name)
    }
}

/// The authors, books and users collections behind one lock.
pub struct CatalogStore {
    uri: DatabaseUri,
    inner: RwLock<Collections>,
}

impl CatalogStore {
    pub fn open(uri: &DatabaseUri) -> Result<Self> {
        let collections = match uri.data_dir() {
            None => Collections {
                authors: Collection::in_memory(),
                books: Collection::in_memory(),
                users: Collection::in_memory(),
            },
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                Collections {
                    authors: Collection::load(dir)?,
                    books: Collection::load(dir)?,
                    users: Collection::load(dir)?,
                }
            }
        };

        tracing::info!(
            uri = %uri,
            authors = collections.authors.len(),
            books = collections.books.len(),
            users = collections.users.len(),
            "Opened catalog store"
        );

        Ok(Self {
            uri: uri.clone(),
            inner: RwLock::new(collections),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            uri: DatabaseUri::Memory,
            inner: RwLock::new(Collections {
                authors: Collection::in_memory(),
                books: Collection::in_memory(),
                users: Collection::in_memory(),
            }),
        }
    }

    pub fn uri(&self) -> &DatabaseUri {
        &self.uri
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>> {
        self.inner
            .read()
            .map_err(|_| LibraryError::Storage("Catalog lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>> {
        self.inner
            .write()
            .map_err(|_| LibraryError::Storage("Catalog lock poisoned".to_string()))
    }

    pub fn book_count(&self) -> Result<usize> {
        Ok(self.read()?.books.len())
    }

    pub fn author_count(&self) -> Result<usize> {
        Ok(self.read()?.authors.len())
    }

    /// Books matching `filter`, each joined with its author, in insertion order.
    pub fn find_books(&self, filter: &BookFilter) -> Result<Vec<PopulatedBook>> {
        let inner = self.read()?;

        let author_id = match &filter.author {
            Some(name) => match inner.author_named(name) {
                Some(author) => Some(author.id.clone()),
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        inner
            .books
            .iter()
            .filter(|b| author_id.as_deref().is_none_or(|id| b.author == id))
            .filter(|b| filter.genre.as_deref().is_none_or(|g| b.has_genre(g)))
            .map(|book| {
                let author = inner.authors.get(&book.author).cloned().ok_or_else(|| {
                    LibraryError::Storage(format!(
                        "Book {} references missing author {}",
                        book.id, book.author
                    ))
                })?;
                Ok(PopulatedBook {
                    book: book.clone(),
                    author,
                })
            })
            .collect()
    }

    pub fn list_authors(&self) -> Result<Vec<Author>> {
        Ok(self.read()?.authors.iter().cloned().collect())
    }

    /// Number of books referencing the author with `author_id`.
    pub fn count_books_by(&self, author_id: &str) -> Result<usize> {
        Ok(self.read()?.books.count(|b| b.author == author_id))
    }

    /// Distinct genres over all books, sorted.
    pub fn genres(&self) -> Result<Vec<String>> {
        let inner = self.read()?;
        let mut genres: Vec<String> = inner
            .books
            .iter()
            .flat_map(|b| b.genres.iter().cloned())
            .collect();
        genres.sort();
        genres.dedup();
        Ok(genres)
    }

    /// Store a book, creating its author first when no author has that name.
    ///
    /// Everything is validated before the first write, so a rejected book
    /// never leaves a freshly created author behind.
    pub fn add_book(&self, new: NewBook) -> Result<PopulatedBook> {
        let mut inner = self.write()?;

        let existing = inner.author_named(&new.author).cloned();
        if existing.is_none() {
            validation::validate_author_name(&new.author)?;
        }
        validation::validate_title(&new.title)?;
        validation::validate_genres(&new.genres)?;
        if inner.books.find(|b| b.title == new.title).is_some() {
            return Err(LibraryError::Duplicate {
                entity: Entity::Book,
                field: "title",
                value: new.title,
            });
        }

        let (author, created) = match existing {
            Some(author) => (author, false),
            None => {
                let author = Author::new(new.author);
                tracing::info!(id = %author.id, name = %author.name, "Creating author");
                inner.authors.insert(author.clone())?;
                (author, true)
            }
        };

        let book = Book::new(new.title, new.published, author.id.clone()).with_genres(new.genres);
        tracing::info!(id = %book.id, title = %book.title, author = %author.name, "Creating book");
        if let Err(e) = inner.books.insert(book.clone()) {
            if created {
                if let Err(discard_err) = inner.authors.discard(&author.id) {
                    tracing::warn!(
                        id = %author.id,
                        error = %discard_err,
                        "Failed to remove author of rejected book"
                    );
                }
            }
            return Err(e);
        }

        Ok(PopulatedBook { book, author })
    }

    /// Overwrite the birth year of the author called `name`.
    pub fn set_author_born(&self, name: &str, born: i32) -> Result<Author> {
        let mut inner = self.write()?;
        let mut author = inner
            .author_named(name)
            .cloned()
            .ok_or_else(|| LibraryError::NotFound {
                entity: Entity::Author,
                key: name.to_string(),
            })?;

        tracing::info!(id = %author.id, name = %author.name, born, "Updating author birth year");
        author.born = Some(born);
        author.touch();
        inner.authors.replace(author.clone())?;
        Ok(author)
    }

    /// Insert an author directly. Used for seeding; names stay unique.
    pub fn insert_author(&self, author: Author) -> Result<Author> {
        validation::validate_author_name(&author.name)?;
        let mut inner = self.write()?;
        if inner.author_named(&author.name).is_some() {
            return Err(LibraryError::Duplicate {
                entity: Entity::Author,
                field: "name",
                value: author.name,
            });
        }
        inner.authors.insert(author.clone())?;
        Ok(author)
    }

    pub fn create_user(&self, username: &str, favourite_genre: &str) -> Result<User> {
        validation::validate_username(username)?;
        let mut inner = self.write()?;
        if inner.users.find(|u| u.username == username).is_some() {
            return Err(LibraryError::Duplicate {
                entity: Entity::User,
                field: "username",
                value: username.to_string(),
            });
        }

        let user = User::new(username, favourite_genre);
        tracing::info!(id = %user.id, username = %user.username, "Creating user");
        inner.users.insert(user.clone())?;
        Ok(user)
    }

    pub fn get_user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.read()?.users.get(id).cloned())
    }

    pub fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.read()?.users.find(|u| u.username == username).cloned())
    }
}
