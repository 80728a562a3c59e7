use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use chrono::NaiveDate;
use serde::Serialize;
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::core::library::Genre;

// CatalogStats is a point-in-time report; it holds copies, not references
// into the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub available_count: usize,
    pub borrowed_count: usize,
    pub genre_histogram: BTreeMap<Genre, usize>,
    pub publisher_histogram: BTreeMap<String, usize>,
    // ties go to the genre seen first in catalog order
    pub most_popular_genre: Option<Genre>,
    pub oldest_by_year: Option<BookDto>,
    pub newest_by_year: Option<BookDto>,
    pub average_year: Option<f64>,
    pub overdue: Vec<BookDto>,
    pub top_borrowers: Vec<(String, usize)>,
}

// Tally counts keys while remembering the order they were first seen.
struct Tally<K> {
    order: Vec<K>,
    counts: HashMap<K, usize>,
}

impl<K: Hash + Eq + Clone> Tally<K> {
    fn new() -> Self {
        Self { order: vec![], counts: HashMap::new() }
    }

    fn add(&mut self, key: K) {
        match self.counts.get_mut(&key) {
            Some(count) => *count += 1,
            None => {
                self.order.push(key.clone());
                self.counts.insert(key, 1);
            }
        }
    }

    // first-seen order, then stably by descending count
    fn ranked(&self) -> Vec<(K, usize)> {
        let mut ranked: Vec<(K, usize)> = self.order.iter()
            .map(|key| (key.clone(), self.counts.get(key).copied().unwrap_or_default()))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl CatalogStats {
    pub fn compute(books: &[BookEntity], today: NaiveDate, top_borrowers: usize) -> CatalogStats {
        let mut genres = Tally::new();
        let mut publishers = Tally::new();
        let mut borrowers = Tally::new();
        let mut oldest: Option<&BookEntity> = None;
        let mut newest: Option<&BookEntity> = None;
        let mut year_sum: i64 = 0;
        let mut available_count = 0;

        for book in books {
            genres.add(book.genre);
            publishers.add(book.publisher.to_string());
            match book.borrower() {
                Some(borrower) => borrowers.add(borrower.to_string()),
                None => available_count += 1,
            }
            year_sum += i64::from(book.publication_year);
            if oldest.map_or(true, |o| book.publication_year < o.publication_year) {
                oldest = Some(book);
            }
            if newest.map_or(true, |n| book.publication_year > n.publication_year) {
                newest = Some(book);
            }
        }

        let mut top = borrowers.ranked();
        top.truncate(top_borrowers);

        CatalogStats {
            total: books.len(),
            available_count,
            borrowed_count: books.len() - available_count,
            genre_histogram: genres.counts.iter().map(|(k, v)| (*k, *v)).collect(),
            publisher_histogram: publishers.counts.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            most_popular_genre: genres.ranked().first().map(|(genre, _)| *genre),
            oldest_by_year: oldest.map(BookDto::from),
            newest_by_year: newest.map(BookDto::from),
            average_year: if books.is_empty() { None } else { Some(year_sum as f64 / books.len() as f64) },
            overdue: books.iter().filter(|b| b.is_overdue(today)).map(BookDto::from).collect(),
            top_borrowers: top,
        }
    }
}
