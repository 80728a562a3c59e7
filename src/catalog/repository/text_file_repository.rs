use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;
use crate::books::codec::HEADER;
use crate::catalog::domain::store::CatalogStore;
use crate::catalog::repository::{decode_lines, encode_lines, CatalogRepository};
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

// TextFileCatalogRepository keeps the catalog in one pipe-delimited UTF-8
// file: a header line followed by one line per book.
#[derive(Debug)]
pub struct TextFileCatalogRepository {
    path: PathBuf,
}

impl TextFileCatalogRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn ensure_parent_dir(&self) -> LibraryResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(format!(".{}.tmp", Uuid::new_v4()));
        self.path.with_file_name(name)
    }
}

impl Repository<CatalogStore> for TextFileCatalogRepository {
    fn load(&self) -> LibraryResult<CatalogStore> {
        if !self.path.exists() {
            self.ensure_parent_dir()?;
            fs::write(&self.path, format!("{}\n", HEADER))?;
            info!("no catalog found at {}, created an empty one", self.path.display());
            return Ok(CatalogStore::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        // line numbers are 1-based and the header is line 1
        let store = decode_lines(contents.lines().enumerate().skip(1).map(|(i, line)| (i + 1, line)));
        info!("loaded {} books from {}", store.len(), self.path.display());
        Ok(store)
    }

    // Writes to a sibling temp file and renames it over the catalog, so a
    // failed save leaves the previous file in place.
    fn save(&self, aggregate: &CatalogStore) -> LibraryResult<usize> {
        self.ensure_parent_dir()?;
        let mut contents = encode_lines(aggregate).join("\n");
        contents.push('\n');
        let temp = self.temp_path();
        if let Err(err) = fs::write(&temp, contents).and_then(|_| fs::rename(&temp, &self.path)) {
            let _ = fs::remove_file(&temp);
            return Err(err.into());
        }
        info!("saved {} books to {}", aggregate.len(), self.path.display());
        Ok(aggregate.len())
    }
}

impl CatalogRepository for TextFileCatalogRepository {
    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use chrono::NaiveDate;
    use crate::books::codec::HEADER;
    use crate::books::domain::model::BookEntity;
    use crate::books::validator::{validate_for_create, BookFields};
    use crate::catalog::domain::store::CatalogStore;
    use crate::catalog::repository::text_file_repository::TextFileCatalogRepository;
    use crate::core::library::{Genre, LibraryError};
    use crate::core::repository::Repository;

    #[test]
    fn test_should_create_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("data").join("books.txt");
        let repo = TextFileCatalogRepository::new(&path);
        let store = repo.load().expect("should load");
        assert!(store.is_empty());
        assert_eq!(format!("{}\n", HEADER), fs::read_to_string(&path).unwrap());
    }

    #[test]
    fn test_should_save_and_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let repo = TextFileCatalogRepository::new(dir.path().join("books.txt"));
        let mut store = CatalogStore::new();
        store.create(BookEntity::new("0306406152", "Dune", "Herbert_Frank", "Chilton", 1965, Genre::ScienceFiction)).unwrap();
        store.create(BookEntity::new("9780306406157", "Emma", "Austen_Jane", "Penguin", 1815, Genre::Classic)).unwrap();
        store.borrow_on("9780306406157", "Doe_John", NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                        NaiveDate::from_ymd_opt(2024, 5, 15)).unwrap();

        assert_eq!(2, repo.save(&store).expect("should save"));
        let loaded = repo.load().expect("should load");
        assert_eq!(store, loaded);
        // no temp files left behind
        assert_eq!(1, fs::read_dir(dir.path()).unwrap().count());
    }

    #[test]
    fn test_should_keep_one_line_per_book_with_multiline_input() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("books.txt");
        let repo = TextFileCatalogRepository::new(&path);
        let mut store = CatalogStore::new();
        let book = validate_for_create(&BookFields::new(
            "0306406152", "Dune\nMessiah", "Herbert_Frank", "Chilton\r\nBooks", "1969", "science fiction"))
            .expect("should validate book");
        store.create(book).unwrap();

        assert_eq!(1, repo.save(&store).expect("should save"));
        assert_eq!(2, fs::read_to_string(&path).unwrap().lines().count());
        let loaded = repo.load().expect("should load");
        assert_eq!(1, loaded.len());
        assert_eq!("Dune_Messiah", loaded.get("0306406152").unwrap().title.as_str());
    }

    #[test]
    fn test_should_skip_malformed_lines() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("books.txt");
        fs::write(&path, format!("{}\n{}\n\n{}\n{}\n",
            HEADER,
            "0306406152|Dune|Herbert_Frank|Chilton|1965|SCIENCE_FICTION|true|null|null|null",
            "9780306406157|Emma|Austen_Jane|Penguin",
            "080442957X|Solaris|Lem_Stanislaw|Walker|1961|SCIENCE_FICTION|false|Doe_John|2024-05-01")).unwrap();
        let store = TextFileCatalogRepository::new(&path).load().expect("should load");
        assert_eq!(2, store.len());
        assert_eq!(None, store.get("080442957X").unwrap().due_date());
    }

    #[test]
    fn test_should_report_io_failure_on_save() {
        let dir = tempfile::tempdir().expect("temp dir");
        // the catalog path is an existing directory, so the rename fails
        let repo = TextFileCatalogRepository::new(dir.path());
        let err = repo.save(&CatalogStore::new()).unwrap_err();
        assert!(matches!(err, LibraryError::Io{ .. }));
    }
}
