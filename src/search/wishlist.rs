use std::collections::HashSet;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{error::WishlistError, models::SearchHit};

/// How a user's wishlist is stored
#[derive(
    strum_macros::Display,
    ValueEnum,
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WishlistFormat {
    /// `"12_3_0,12_4_1"`, written by the website
    #[default]
    Comma,
    /// `["12_3_0", "12_4_1"]`, written by the browser extension
    Json,
}

/// Saved `{objectId}_{variantIndex}` keys of a user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    keys: HashSet<String>,
}

impl Wishlist {
    pub fn parse(raw: &str, format: WishlistFormat) -> Result<Self, WishlistError> {
        match format {
            WishlistFormat::Comma => Ok(Self::from_comma(raw)),
            WishlistFormat::Json => Self::from_json(raw),
        }
    }

    pub fn from_comma(raw: &str) -> Self {
        raw.split(',')
            .filter(|key| !key.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn from_json(raw: &str) -> Result<Self, WishlistError> {
        let keys: Vec<String> = serde_json::from_str(raw)?;
        Ok(keys.into_iter().collect())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Marks each hit by whether its showcased variant is saved
    pub fn annotate(&self, hits: &mut [SearchHit]) {
        for hit in hits {
            let saved = hit
                .wishlist_key()
                .map(|key| self.contains(&key))
                .unwrap_or(false);
            hit.wishlist = Some(saved);
        }
    }
}

impl FromIterator<String> for Wishlist {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Wishlist {
            keys: iter.into_iter().collect(),
        }
    }
}
