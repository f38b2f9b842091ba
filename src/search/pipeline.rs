use crate::{
    models::SearchResults,
    phonetic::{
        BoxedDistance, BoxedEncoder, DoubleMetaphone, EditDistance, Levenshtein, PhoneticEncoder,
    },
    search::Wishlist,
    selector::VariantSelector,
};

/// Outcome counts of one processed response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub hits: usize,
    pub selected: usize,
    pub rejected: usize,
}

/// Post-processing applied to index results before they are returned
pub struct SearchPipeline<E = BoxedEncoder, D = BoxedDistance> {
    selector: VariantSelector<E, D>,
}

impl Default for SearchPipeline<DoubleMetaphone, Levenshtein> {
    fn default() -> Self {
        SearchPipeline::new(VariantSelector::default())
    }
}

impl<E: PhoneticEncoder, D: EditDistance> SearchPipeline<E, D> {
    pub fn new(selector: VariantSelector<E, D>) -> Self {
        Self { selector }
    }

    pub fn selector(&self) -> &VariantSelector<E, D> {
        &self.selector
    }

    pub fn process(
        &self,
        query: &str,
        results: &mut SearchResults,
        wishlist: Option<&Wishlist>,
    ) -> PipelineReport {
        let key = self.selector.query_key(query);
        let mut report = PipelineReport {
            hits: results.hits.len(),
            ..Default::default()
        };

        for hit in results.hits.iter_mut() {
            match self.selector.select_with(&key, hit) {
                Ok(_) => report.selected += 1,
                Err(e) => {
                    log::warn!("Skipping variant selection for {}: {}", hit.object_id, e);
                    report.rejected += 1;
                }
            }
        }

        if let Some(wishlist) = wishlist {
            log::debug!("Annotating hits with {} wishlist entries", wishlist.len());
            wishlist.annotate(&mut results.hits);
        }

        log::debug!(
            "Processed {} hits for {:?}: {} selected, {} rejected",
            report.hits,
            query,
            report.selected,
            report.rejected
        );

        report
    }

    /// Processes one JSON encoded index response, returning it re-encoded
    pub fn process_json(
        &self,
        query: &str,
        raw: &str,
        wishlist: Option<&Wishlist>,
        pretty: bool,
    ) -> Result<(String, PipelineReport), serde_json::Error> {
        let mut results: SearchResults = serde_json::from_str(raw)?;
        let report = self.process(query, &mut results, wishlist);

        let encoded = if pretty {
            serde_json::to_string_pretty(&results)?
        } else {
            serde_json::to_string(&results)?
        };

        Ok((encoded, report))
    }
}
