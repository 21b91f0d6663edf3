use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::movie::Movie;

/// Mapping from release date to the movies released that day.
///
/// Always rebuilt wholesale from the collection's current contents, never
/// patched incrementally, so it cannot drift from the collection. Within a
/// bucket, movies keep collection iteration order; no secondary sort.
#[derive(Debug, Clone, Default)]
pub struct ReleaseIndex {
    buckets: BTreeMap<NaiveDate, Vec<Movie>>,
}

impl ReleaseIndex {
    /// Builds the index with a single pass over the collection.
    pub fn build(movies: &[Movie]) -> Self {
        let mut buckets: BTreeMap<NaiveDate, Vec<Movie>> = BTreeMap::new();
        for movie in movies {
            buckets
                .entry(movie.release_date)
                .or_default()
                .push(movie.clone());
        }
        Self { buckets }
    }

    /// Movies released on `date`, empty when the day has none.
    pub fn movies_on(&self, date: NaiveDate) -> &[Movie] {
        self.buckets.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dates that have at least one release, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.buckets.keys().copied()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
