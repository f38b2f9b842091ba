pub mod search_hit;
pub mod search_results;

pub use search_hit::SearchHit;
pub use search_results::SearchResults;
