//! Phonetic primitives used to compare variant tags with search queries.
//!
//! Encoding and distance are separate policies so either can be swapped
//! without touching the selection logic.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod distance;
pub mod encoders;

pub use distance::{DamerauLevenshtein, Levenshtein};
pub use encoders::{DoubleMetaphone, Verbatim};

/// Primary and alternate pronunciation codes of a text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneticCode {
    pub primary: String,
    pub alternate: String,
}

impl PhoneticCode {
    pub fn new(primary: impl Into<String>, alternate: impl Into<String>) -> Self {
        PhoneticCode {
            primary: primary.into(),
            alternate: alternate.into(),
        }
    }

    /// Both codes concatenated, the form distances are measured on
    pub fn key(&self) -> String {
        format!("{}{}", self.primary, self.alternate)
    }
}

pub trait PhoneticEncoder: Send + Sync {
    fn name(&self) -> &'static str;
    fn encode(&self, text: &str) -> PhoneticCode;
}

pub trait EditDistance: Send + Sync {
    fn name(&self) -> &'static str;
    fn distance(&self, a: &str, b: &str) -> usize;
}

pub type BoxedEncoder = Box<dyn PhoneticEncoder>;
pub type BoxedDistance = Box<dyn EditDistance>;

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
pub enum EncoderKind {
    #[default]
    DoubleMetaphone,
    Verbatim,
}

impl EncoderKind {
    pub fn build(self) -> BoxedEncoder {
        match self {
            EncoderKind::DoubleMetaphone => Box::new(DoubleMetaphone::new()),
            EncoderKind::Verbatim => Box::new(Verbatim),
        }
    }
}

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
pub enum DistanceKind {
    #[default]
    Levenshtein,
    DamerauLevenshtein,
}

impl DistanceKind {
    pub fn build(self) -> BoxedDistance {
        match self {
            DistanceKind::Levenshtein => Box::new(Levenshtein),
            DistanceKind::DamerauLevenshtein => Box::new(DamerauLevenshtein),
        }
    }
}

impl<E: PhoneticEncoder + ?Sized> PhoneticEncoder for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn encode(&self, text: &str) -> PhoneticCode {
        (**self).encode(text)
    }
}

impl<D: EditDistance + ?Sized> EditDistance for Box<D> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn distance(&self, a: &str, b: &str) -> usize {
        (**self).distance(a, b)
    }
}
