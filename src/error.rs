use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VariantError {
    /// The hit carries no variant tags at all
    #[error("hit has no variants")]
    Empty,

    /// Images and tags are not positionally paired
    #[error("variant length mismatch: {images} images, {tags} tags")]
    LengthMismatch { images: usize, tags: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("method {0} not allowed, must be GET")]
    MethodNotAllowed(String),

    /// Missing or blank `q` parameter
    #[error("invalid search query")]
    InvalidQuery,
}

impl SearchError {
    /// HTTP status the search routes answer with
    pub fn status(&self) -> u16 {
        match self {
            SearchError::MethodNotAllowed(_) | SearchError::InvalidQuery => 400,
        }
    }

    /// Message exposed in the `{"error": ...}` response body
    pub fn public_message(&self) -> &'static str {
        match self {
            SearchError::MethodNotAllowed(_) => "Must be GET method",
            SearchError::InvalidQuery => "Invalid payload",
        }
    }
}

#[derive(Error, Debug)]
pub enum WishlistError {
    #[error("malformed wishlist: {0}")]
    Malformed(#[from] serde_json::Error),
}
