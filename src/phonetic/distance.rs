use super::EditDistance;

pub struct Levenshtein;

impl EditDistance for Levenshtein {
    fn name(&self) -> &'static str {
        "levenshtein"
    }

    fn distance(&self, a: &str, b: &str) -> usize {
        strsim::levenshtein(a, b)
    }
}

/// Levenshtein that also counts adjacent transpositions as one edit
pub struct DamerauLevenshtein;

impl EditDistance for DamerauLevenshtein {
    fn name(&self) -> &'static str {
        "damerau_levenshtein"
    }

    fn distance(&self, a: &str, b: &str) -> usize {
        strsim::damerau_levenshtein(a, b)
    }
}
