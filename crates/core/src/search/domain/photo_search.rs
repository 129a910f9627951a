use crate::search::domain::photo::{SearchOptions, SearchPage};

/// Domain interface for the stock photo search provider.
pub trait PhotoSearch {
    fn search(&self, options: &SearchOptions) -> Result<SearchPage, Box<dyn std::error::Error>>;
}
