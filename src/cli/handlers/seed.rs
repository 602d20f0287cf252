use crate::error::LibraryError;
use crate::model::Author;
use crate::storage::NewBook;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

const AUTHORS: &[(&str, Option<i32>)] = &[
    ("Robert Martin", Some(1952)),
    ("Martin Fowler", Some(1963)),
    ("Fyodor Dostoevsky", Some(1821)),
    ("Joshua Kerievsky", None),
    ("Sandi Metz", None),
];

const BOOKS: &[(&str, i32, &str, &[&str])] = &[
    ("Clean Code", 2008, "Robert Martin", &["refactoring"]),
    ("Agile software development", 2002, "Robert Martin", &["agile", "patterns", "design"]),
    ("Refactoring, edition 2", 2018, "Martin Fowler", &["refactoring"]),
    ("Refactoring to patterns", 2008, "Joshua Kerievsky", &["refactoring", "patterns"]),
    (
        "Practical Object-Oriented Design, An Agile Primer Using Ruby",
        2012,
        "Sandi Metz",
        &["refactoring", "design"],
    ),
    ("Crime and punishment", 1866, "Fyodor Dostoevsky", &["classic", "crime"]),
    ("The Demon", 1872, "Fyodor Dostoevsky", &["classic", "revolution"]),
];

const USERS: &[(&str, &str)] = &[("mluukkai", "refactoring")];

pub fn handle_seed(ctx: CommandContext) -> Result<()> {
    let store = ctx.open_store()?;
    let mut authors_added = 0;
    let mut books_added = 0;
    let mut users_added = 0;

    for (name, born) in AUTHORS {
        let author = match born {
            Some(year) => Author::new(*name).with_born(*year),
            None => Author::new(*name),
        };
        match store.insert_author(author) {
            Ok(_) => authors_added += 1,
            Err(LibraryError::Duplicate { .. }) => {}
            Err(e) => return Err(e.into()),
        }
    }

    for (title, published, author, genres) in BOOKS {
        let book = NewBook {
            title: title.to_string(),
            author: author.to_string(),
            published: *published,
            genres: genres.iter().map(|g| g.to_string()).collect(),
        };
        match store.add_book(book) {
            Ok(_) => books_added += 1,
            Err(LibraryError::Duplicate { .. }) => {}
            Err(e) => return Err(e.into()),
        }
    }

    for (username, favourite_genre) in USERS {
        match store.create_user(username, favourite_genre) {
            Ok(_) => users_added += 1,
            Err(LibraryError::Duplicate { .. }) => {}
            Err(e) => return Err(e.into()),
        }
    }

    println!(
        "{} {} authors, {} books and {} users into {}",
        "Seeded".green(),
        authors_added,
        books_added,
        users_added,
        store.uri()
    );
    Ok(())
}
