use crate::error::{LibraryError, Result};
use crate::model::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// An ordered set of documents of one kind.
///
/// When backed by a directory, the whole collection is rewritten to
/// `<dir>/<COLLECTION>.json` after every change.
pub struct Collection<T: Document> {
    docs: Vec<T>,
    path: Option<PathBuf>,
}

impl<T: Document> Collection<T> {
    pub fn in_memory() -> Self {
        Self {
            docs: Vec::new(),
            path: None,
        }
    }

    /// Load the collection file from `dir`, starting empty if it does not exist yet.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(format!("{}.json", T::COLLECTION));
        let docs = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    LibraryError::Storage(format!("Failed to parse {}: {}", path.display(), e))
                })?
            }
        } else {
            Vec::new()
        };

        tracing::debug!(collection = T::COLLECTION, count = docs.len(), "Loaded collection");
        Ok(Self {
            docs,
            path: Some(path),
        })
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.docs.iter()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.docs.iter().find(|d| d.id() == id)
    }

    pub fn find<P>(&self, predicate: P) -> Option<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.docs.iter().find(|d| predicate(*d))
    }

    pub fn count<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.docs.iter().filter(|d| predicate(*d)).count()
    }

    pub fn insert(&mut self, doc: T) -> Result<()> {
        if self.get(doc.id()).is_some() {
            return Err(LibraryError::Storage(format!(
                "Duplicate id {} in {}",
                doc.id(),
                T::COLLECTION
            )));
        }
        self.docs.push(doc);
        if let Err(e) = self.persist() {
            self.docs.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Replace the document with the same id.
    pub fn replace(&mut self, doc: T) -> Result<()> {
        let pos = self
            .docs
            .iter()
            .position(|d| d.id() == doc.id())
            .ok_or_else(|| {
                LibraryError::Storage(format!("No document {} in {}", doc.id(), T::COLLECTION))
            })?;
        let previous = std::mem::replace(&mut self.docs[pos], doc);
        if let Err(e) = self.persist() {
            self.docs[pos] = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Drop a document again. Only used to undo a half-finished compound write.
    pub(crate) fn discard(&mut self, id: &str) -> Result<()> {
        self.docs.retain(|d| d.id() != id);
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let content = serde_json::to_string_pretty(&self.docs)?;
        atomic_write(path, &content)
    }
}

/// Write `content` to a temp file next to `target_path`, then rename it into place.
fn atomic_write(target_path: &Path, content: &str) -> Result<()> {
    let target_dir = target_path
        .parent()
        .ok_or_else(|| LibraryError::Storage("Target path has no parent directory".to_string()))?;
    std::fs::create_dir_all(target_dir)?;

    let mut temp_file = NamedTempFile::new_in(target_dir)
        .map_err(|e| LibraryError::Storage(format!("Failed to create temp file: {}", e)))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| LibraryError::Storage(format!("Failed to write to temp file: {}", e)))?;

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| LibraryError::Storage(format!("Failed to sync temp file: {}", e)))?;

    temp_file
        .persist(target_path)
        .map_err(|e| LibraryError::Storage(format!("Failed to persist temp file: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Author;
    use tempfile::TempDir;

    #[test]
    fn test_insert_persists_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut authors: Collection<Author> = Collection::load(temp_dir.path()).unwrap();
        assert!(authors.is_empty());

        authors.insert(Author::new("Martin Fowler")).unwrap();
        assert!(temp_dir.path().join("authors.json").exists());

        let reloaded: Collection<Author> = Collection::load(temp_dir.path()).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.iter().next().unwrap().name, "Martin Fowler");
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut authors: Collection<Author> = Collection::in_memory();
        let author = Author::new("Sandi Metz");
        authors.insert(author.clone()).unwrap();
        assert!(authors.insert(author).is_err());
        assert_eq!(authors.len(), 1);
    }

    #[test]
    fn test_replace_updates_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let mut authors: Collection<Author> = Collection::load(temp_dir.path()).unwrap();
        let first = Author::new("Robert Martin");
        let second = Author::new("Joshua Kerievsky");
        authors.insert(first.clone()).unwrap();
        authors.insert(second.clone()).unwrap();

        authors.replace(first.clone().with_born(1952)).unwrap();

        let reloaded: Collection<Author> = Collection::load(temp_dir.path()).unwrap();
        let names: Vec<_> = reloaded.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Robert Martin", "Joshua Kerievsky"]);
        assert_eq!(reloaded.get(&first.id).unwrap().born, Some(1952));
    }

    #[test]
    fn test_replace_missing_document() {
        let mut authors: Collection<Author> = Collection::in_memory();
        assert!(authors.replace(Author::new("Nobody Here")).is_err());
    }

    #[test]
    fn test_load_rejects_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("authors.json"), "{ not json").unwrap();
        let result: Result<Collection<Author>> = Collection::load(temp_dir.path());
        assert!(matches!(result, Err(LibraryError::Storage(_))));
    }
}
