pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod phonetic;
pub mod search;
pub mod selector;

pub use error::{SearchError, VariantError, WishlistError};
pub use models::{SearchHit, SearchResults};
pub use search::{SearchPipeline, Wishlist};
pub use selector::{QueryKey, VariantSelector};
