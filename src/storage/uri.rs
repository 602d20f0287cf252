use crate::error::{LibraryError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Where the document store keeps its collections.
///
/// Accepted forms:
///
/// - `memory://` keeps everything in process memory
/// - `file://<dir>` stores one `<collection>.json` file per collection in `<dir>`
/// - a bare path is treated like `file://<path>`
///
/// Relative directories are resolved against the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUri {
    Memory,
    File(PathBuf),
}

impl DatabaseUri {
    pub fn parse(uri: &str, base: &Path) -> Result<Self> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(LibraryError::Config("Database URI is empty".to_string()));
        }

        if let Some(rest) = uri.strip_prefix("file://") {
            return Ok(Self::file(rest, base));
        }

        match Url::parse(uri) {
            Ok(url) if url.scheme() == "memory" => Ok(DatabaseUri::Memory),
            Ok(url) => Err(LibraryError::Config(format!(
                "Unsupported database scheme '{}' in {}",
                url.scheme(),
                uri
            ))),
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Self::file(uri, base)),
            Err(e) => Err(LibraryError::Config(format!(
                "Invalid database URI {}: {}",
                uri, e
            ))),
        }
    }

    fn file(path: &str, base: &Path) -> Self {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            DatabaseUri::File(path)
        } else {
            DatabaseUri::File(base.join(path))
        }
    }

    /// Directory holding the collection files, if any.
    pub fn data_dir(&self) -> Option<&Path> {
        match self {
            DatabaseUri::Memory => None,
            DatabaseUri::File(path) => Some(path),
        }
    }
}

impl fmt::Display for DatabaseUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseUri::Memory => write!(f, "memory://"),
            DatabaseUri::File(path) => write!(f, "file://{}", path.display()),
        }
    }
}
