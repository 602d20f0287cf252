//! GraphQL documents sent by the client.

pub const LOGIN: &str = r#"
mutation($username: String!, $password: String!) {
  login(username: $username, password: $password) {
    value
  }
}
"#;

pub const ALL_AUTHORS: &str = r#"
query {
  allAuthors {
    name
    born
    bookCount
  }
}
"#;

pub const ALL_BOOKS: &str = r#"
query($genre: String) {
  allBooks(genre: $genre) {
    title
    author {
      name
      born
    }
    published
    genres
  }
}
"#;

pub const CREATE_BOOK: &str = r#"
mutation createBook($title: String!, $author: String!, $published: Int!, $genres: [String!]!) {
  addBook(title: $title, author: $author, published: $published, genres: $genres) {
    title
    author {
      name
      born
    }
    published
    genres
  }
}
"#;

pub const UPDATE_BIRTHYEAR: &str = r#"
mutation editYear($name: String!, $born: Int!) {
  editAuthor(name: $name, setBornTo: $born) {
    name
    born
    bookCount
  }
}
"#;
