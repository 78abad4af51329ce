// Catalog store: the in-memory, ordered list of movies for the current
// session. It never touches the disk; the menu layer saves after every
// mutation.

use crate::model::{loosely_equals, MovieRecord};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Ordered collection of movies. Serializes as a plain JSON array.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
}

/// Field a search is run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFilter {
    Name,
    Year,
    Director,
    Genres,
    Rating,
}

impl FromStr for SearchFilter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SearchFilter::Name),
            "year" => Ok(SearchFilter::Year),
            "director" => Ok(SearchFilter::Director),
            "genres" => Ok(SearchFilter::Genres),
            "rating" => Ok(SearchFilter::Rating),
            _ => Err(()),
        }
    }
}

impl SearchFilter {
    /// Whether `movie` matches `text` for this filter. Text filters are
    /// case-insensitive substring checks; year and rating compare the
    /// number against the raw text.
    pub fn matches(self, movie: &MovieRecord, text: &str) -> bool {
        let needle = text.to_lowercase();
        match self {
            SearchFilter::Name => movie.name.to_lowercase().contains(&needle),
            SearchFilter::Director => movie.director.to_lowercase().contains(&needle),
            SearchFilter::Genres => movie
                .genres
                .iter()
                .any(|genre| genre.to_lowercase().contains(&needle)),
            SearchFilter::Year => loosely_equals(movie.release_year.map(|y| y as f64), text),
            SearchFilter::Rating => loosely_equals(movie.rating, text),
        }
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Append a movie. Duplicate names are allowed.
    pub fn add_movie(&mut self, movie: MovieRecord) {
        self.movies.push(movie);
    }

    /// Remove every movie whose name is exactly `name` (case-sensitive).
    /// Returns how many were removed; zero is not an error.
    pub fn remove_movie(&mut self, name: &str) -> usize {
        let before = self.movies.len();
        self.movies.retain(|movie| movie.name != name);
        before - self.movies.len()
    }

    /// Position of the first movie named exactly `name`.
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.movies.iter().position(|movie| movie.name == name)
    }

    /// Overwrite the movie at `index` in place. Keys the catalog does not
    /// manage are kept. Returns `false` when the index is out of range.
    pub fn replace(&mut self, index: usize, movie: MovieRecord) -> bool {
        match self.movies.get_mut(index) {
            Some(slot) => {
                let mut extra = std::mem::take(&mut slot.extra);
                extra.extend(movie.extra);
                *slot = MovieRecord { extra, ..movie };
                true
            }
            None => false,
        }
    }

    /// Run a search by filter name. An unknown filter yields no results.
    pub fn search(&self, filter: &str, text: &str) -> Vec<&MovieRecord> {
        match filter.parse::<SearchFilter>() {
            Ok(filter) => self.search_by(filter, text),
            Err(()) => Vec::new(),
        }
    }

    pub fn search_by(&self, filter: SearchFilter, text: &str) -> Vec<&MovieRecord> {
        self.movies
            .iter()
            .filter(|movie| filter.matches(movie, text))
            .collect()
    }
}

impl From<Vec<MovieRecord>> for Catalog {
    fn from(movies: Vec<MovieRecord>) -> Self {
        Catalog { movies }
    }
}
