//! Request and response shaping around the search index.

pub mod pipeline;
pub mod request;
pub mod wishlist;

pub use pipeline::{PipelineReport, SearchPipeline};
pub use request::{Route, SearchOptions, SearchParams, SearchRequest};
pub use wishlist::{Wishlist, WishlistFormat};
