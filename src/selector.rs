//! Best variant selection.
//!
//! Picks the variant whose tag sounds closest to what the user searched for,
//! so results showcase the matching photo and option first. Tags are compared
//! on their phonetic codes, which absorbs spelling and abbreviation noise in
//! merchant-entered labels ("Lrg", "Large", ...).

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::{
    config::SelectorConfig,
    error::VariantError,
    models::SearchHit,
    phonetic::{
        BoxedDistance, BoxedEncoder, DoubleMetaphone, EditDistance, Levenshtein, PhoneticEncoder,
    },
};

/// Phonetic key of a search query, computed once per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub struct VariantSelector<E = BoxedEncoder, D = BoxedDistance> {
    encoder: E,
    distance: D,
}

impl Default for VariantSelector<DoubleMetaphone, Levenshtein> {
    fn default() -> Self {
        VariantSelector::new(DoubleMetaphone::new(), Levenshtein)
    }
}

impl VariantSelector<BoxedEncoder, BoxedDistance> {
    pub fn from_config(config: &SelectorConfig) -> Self {
        log::debug!(
            "Variant selector using {} encoding and {} distance",
            config.encoder,
            config.distance
        );
        VariantSelector::new(config.encoder.build(), config.distance.build())
    }
}

impl<E: PhoneticEncoder, D: EditDistance> VariantSelector<E, D> {
    pub fn new(encoder: E, distance: D) -> Self {
        Self { encoder, distance }
    }

    pub fn query_key(&self, query: &str) -> QueryKey {
        QueryKey(self.encoder.encode(query).key())
    }

    /// Index of the variant that best matches `query`.
    ///
    /// Returns 0 when images or tags carry no discriminating signal. Among
    /// equally close tags the earliest one wins, and repeated tags resolve to
    /// their first position.
    pub fn best_index(
        &self,
        query: &QueryKey,
        images: &[String],
        tags: &[String],
    ) -> Result<usize, VariantError> {
        if tags.is_empty() {
            return Err(VariantError::Empty);
        }
        if images.len() != tags.len() {
            return Err(VariantError::LengthMismatch {
                images: images.len(),
                tags: tags.len(),
            });
        }

        let unique_images: HashSet<&str> = images.iter().map(String::as_str).collect();
        let mut unique_tags: IndexMap<&str, usize> = IndexMap::new();
        for (index, tag) in tags.iter().enumerate() {
            unique_tags.entry(tag.as_str()).or_insert(index);
        }

        if unique_images.len() <= 1 || unique_tags.len() <= 1 {
            return Ok(0);
        }

        let mut scores = unique_tags.iter().map(|(tag, &index)| {
            let key = self.encoder.encode(tag).key();
            let score = self.distance.distance(&key, query.as_str());
            log::trace!("Variant {} {:?} ({}) scored {}", index, tag, key, score);
            (index, score)
        });

        // Non-empty: at least two distinct tags at this point
        let Some(mut best) = scores.next() else {
            return Ok(0);
        };
        for (index, score) in scores {
            if score < best.1 {
                best = (index, score);
            }
        }

        Ok(best.0)
    }

    /// Sets `variant_index` on the hit and returns it
    pub fn select(&self, query: &str, hit: &mut SearchHit) -> Result<usize, VariantError> {
        let key = self.query_key(query);
        self.select_with(&key, hit)
    }

    pub fn select_with(
        &self,
        query: &QueryKey,
        hit: &mut SearchHit,
    ) -> Result<usize, VariantError> {
        let index = self.best_index(query, &hit.variant_images, &hit.variant_tags)?;
        hit.variant_index = Some(index);
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use crate::phonetic::{PhoneticCode, Verbatim};

    use super::*;

    /// Encodes every text to its length in `x`s, so distances are length gaps
    struct LengthEncoder;

    impl PhoneticEncoder for LengthEncoder {
        fn name(&self) -> &'static str {
            "length"
        }

        fn encode(&self, text: &str) -> PhoneticCode {
            PhoneticCode::new("x".repeat(text.chars().count()), "")
        }
    }

    fn make_hit(tags: &[&str]) -> SearchHit {
        SearchHit::new(
            "1_1",
            tags.iter()
                .enumerate()
                .map(|(i, tag)| (format!("https://cdn.test/{}.jpg", i), tag.to_string())),
        )
    }

    fn select(query: &str, hit: &mut SearchHit) -> Result<usize, VariantError> {
        VariantSelector::default().select(query, hit)
    }

    #[test]
    fn test_single_distinct_tag() {
        let mut hit = make_hit(&["Red", "Red"]);
        assert_eq!(select("blue", &mut hit), Ok(0));
        assert_eq!(hit.variant_index, Some(0));
    }

    #[test]
    fn test_single_distinct_image() {
        let mut hit = SearchHit::new("1_1", [("a.jpg", "Small"), ("a.jpg", "Large")]);
        assert_eq!(select("large", &mut hit), Ok(0));
    }

    #[test]
    fn test_single_variant() {
        let mut hit = make_hit(&["Large"]);
        assert_eq!(select("large", &mut hit), Ok(0));
    }

    #[test]
    fn test_phonetic_match() {
        let mut hit = make_hit(&["Small", "Large"]);
        assert_eq!(select("smal", &mut hit), Ok(0));

        let mut hit = make_hit(&["Small", "Large"]);
        assert_eq!(select("large", &mut hit), Ok(1));
    }

    #[test]
    fn test_multi_word_tag() {
        let mut hit = make_hit(&["XL", "Extra Large"]);
        assert_eq!(select("extra large", &mut hit), Ok(1));
    }

    #[test]
    fn test_duplicate_collapses_to_first() {
        let selector = VariantSelector::default();
        for query in ["bloo", "blue", "green", "grin", "anything"] {
            let mut hit = make_hit(&["Blue", "Blue", "Green"]);
            let index = selector.select(query, &mut hit).unwrap();
            assert_ne!(index, 1, "query {:?} picked a collapsed duplicate", query);
        }

        let mut hit = make_hit(&["Blue", "Blue", "Green"]);
        assert_eq!(selector.select("green", &mut hit), Ok(2));
    }

    #[test]
    fn test_tie_goes_to_earlier_tag() {
        let selector = VariantSelector::new(LengthEncoder, Levenshtein);

        // "ab" and "cd" are both at distance 1 from "abc"
        let mut hit = make_hit(&["ab", "cd", "abcdef"]);
        assert_eq!(selector.select("abc", &mut hit), Ok(0));

        let mut hit = make_hit(&["abcdef", "cd", "ab"]);
        assert_eq!(selector.select("abc", &mut hit), Ok(1));
    }

    #[test]
    fn test_first_tag_seeds_minimum() {
        let selector = VariantSelector::new(LengthEncoder, Levenshtein);
        let mut hit = make_hit(&["abc", "abcd", "ab"]);
        assert_eq!(selector.select("xyz", &mut hit), Ok(0));
    }

    #[test]
    fn test_appended_duplicate_of_best_is_ignored() {
        let selector = VariantSelector::default();
        let mut before = make_hit(&["Small", "Medium", "Large"]);
        let chosen = selector.select("medium", &mut before).unwrap();
        assert_eq!(chosen, 1);

        let mut after = make_hit(&["Small", "Medium", "Large", "Medium"]);
        assert_eq!(selector.select("medium", &mut after), Ok(chosen));
    }

    #[test]
    fn test_deterministic_and_bounded() {
        let selector = VariantSelector::default();
        let tags = ["Navy", "Forest Green", "Charcoal", "Heather Grey", "Navy"];
        for query in ["navy", "grey", "charcol", "forrest", "", "123"] {
            let first = selector.select(query, &mut make_hit(&tags)).unwrap();
            let second = selector.select(query, &mut make_hit(&tags)).unwrap();
            assert_eq!(first, second);
            assert!(first < tags.len());
            assert_ne!(first, 4);
        }
    }

    #[test]
    fn test_empty_tags() {
        let mut hit = SearchHit::new("1_1", Vec::<(String, String)>::new());
        assert_eq!(select("red", &mut hit), Err(VariantError::Empty));
        assert_eq!(hit.variant_index, None);
    }

    #[test]
    fn test_length_mismatch() {
        let mut hit = make_hit(&["Red", "Blue"]);
        hit.variant_images.pop();
        assert_eq!(
            select("red", &mut hit),
            Err(VariantError::LengthMismatch { images: 1, tags: 2 })
        );
        assert_eq!(hit.variant_index, None);
    }

    #[test]
    fn test_query_key_reuse() {
        let selector = VariantSelector::new(Verbatim, Levenshtein);
        let key = selector.query_key("Large");
        assert_eq!(key.as_str(), "large");

        let mut hit = make_hit(&["small", "large"]);
        assert_eq!(selector.select_with(&key, &mut hit), Ok(1));
        assert_eq!(selector.select("Large", &mut hit), Ok(1));
    }

    #[test]
    fn test_from_config() {
        let config = SelectorConfig {
            encoder: crate::phonetic::EncoderKind::Verbatim,
            distance: crate::phonetic::DistanceKind::DamerauLevenshtein,
        };
        let selector = VariantSelector::from_config(&config);
        let mut hit = make_hit(&["lrage", "small"]);
        assert_eq!(selector.select("large", &mut hit), Ok(0));
    }
}
