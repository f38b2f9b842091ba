use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One product record as returned by the search index
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// Stable product identifier, unique per business and product
    #[serde(default)]
    pub object_id: String,
    /// Image url per variant
    #[serde(default)]
    pub variant_images: Vec<String>,
    /// Free text label per variant, paired with `variant_images` by position
    #[serde(default)]
    pub variant_tags: Vec<String>,

    /// Variant chosen to showcase, set by the selector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_index: Option<usize>,
    /// Whether the showcased variant is on the user's wishlist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wishlist: Option<bool>,

    /// Every other attribute the index returned, kept verbatim
    #[serde(flatten)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl SearchHit {
    pub fn new<I, T>(object_id: &str, variants: I) -> Self
    where
        I: IntoIterator<Item = (T, T)>,
        T: Into<String>,
    {
        let (variant_images, variant_tags) = variants
            .into_iter()
            .map(|(image, tag)| (image.into(), tag.into()))
            .unzip();

        SearchHit {
            object_id: object_id.to_string(),
            variant_images,
            variant_tags,
            ..Default::default()
        }
    }

    /// Key under which the showcased variant is stored in wishlists
    pub fn wishlist_key(&self) -> Option<String> {
        self.variant_index
            .map(|index| format!("{}_{}", self.object_id, index))
    }
}
