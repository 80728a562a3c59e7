pub mod in_memory_repository;
pub mod text_file_repository;

use tracing::warn;
use crate::books::codec;
use crate::catalog::domain::store::CatalogStore;
use crate::core::repository::Repository;

pub trait CatalogRepository: Repository<CatalogStore> {
    // where the catalog lives, for log lines
    fn location(&self) -> String;
}

// Rebuilds a store from record lines (header already removed). Lines that
// fail to decode, or repeat an isbn, are skipped with a warning.
pub(crate) fn decode_lines<'a>(lines: impl Iterator<Item = (usize, &'a str)>) -> CatalogStore {
    let mut store = CatalogStore::new();
    for (number, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let added = codec::decode(line)
            .map_err(|err| err.at_line(number))
            .and_then(|book| store.create(book));
        if let Err(err) = added {
            warn!("skipping catalog line {}: {}", number, err);
        }
    }
    store
}

pub(crate) fn encode_lines(store: &CatalogStore) -> Vec<String> {
    let mut lines = Vec::with_capacity(store.len() + 1);
    lines.push(codec::HEADER.to_string());
    lines.extend(store.all().iter().map(codec::encode));
    lines
}

#[cfg(test)]
mod tests {
    use crate::books::codec::HEADER;
    use crate::catalog::repository::{decode_lines, encode_lines};

    const DUNE: &str = "0306406152|Dune|Herbert_Frank|Chilton|1965|SCIENCE_FICTION|true|null|null|null";
    const EMMA: &str = "9780141439587|Emma|Austen_Jane|Penguin|1815|CLASSIC|false|Doe_John|2024-05-01";

    #[test]
    fn test_should_skip_bad_and_duplicate_lines() {
        let lines = vec![DUNE, "", "garbage|line", EMMA, DUNE];
        let store = decode_lines(lines.into_iter().enumerate().map(|(i, l)| (i + 2, l)));
        assert_eq!(2, store.len());
        assert!(store.get("9780141439587").is_some());
    }

    #[test]
    fn test_should_encode_header_first() {
        let store = decode_lines(vec![(2, DUNE)].into_iter());
        let lines = encode_lines(&store);
        assert_eq!(vec![HEADER.to_string(), DUNE.to_string()], lines);
    }
}
