use rphonetic::DoubleMetaphone as Encoder;

use super::{PhoneticCode, PhoneticEncoder};

/// Double Metaphone, tolerant of the spelling and abbreviation noise in
/// merchant-entered variant labels
pub struct DoubleMetaphone {
    encoder: Encoder,
}

impl Default for DoubleMetaphone {
    fn default() -> Self {
        Self::new()
    }
}

impl DoubleMetaphone {
    pub fn new() -> Self {
        Self {
            encoder: Encoder::default(),
        }
    }
}

impl PhoneticEncoder for DoubleMetaphone {
    fn name(&self) -> &'static str {
        "double_metaphone"
    }

    fn encode(&self, text: &str) -> PhoneticCode {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return PhoneticCode::default();
        }

        let result = self.encoder.double_metaphone(&text);
        PhoneticCode::new(result.primary().to_string(), result.alternate().to_string())
    }
}

/// Spelling as-is, lowercased with whitespace collapsed
pub struct Verbatim;

impl PhoneticEncoder for Verbatim {
    fn name(&self) -> &'static str {
        "verbatim"
    }

    fn encode(&self, text: &str) -> PhoneticCode {
        let normalized = text
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        PhoneticCode::new(normalized, "")
    }
}
