use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors raised when a stored interests scalar cannot be read back
#[derive(Debug, Error)]
pub enum InterestsError {
    #[error("Malformed interests: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A profile's interests as an unordered, deduplicated set of strings
///
/// Serializes as a plain JSON array, so request and response payloads carry
/// `["chess", "hiking"]`. Duplicates in an incoming array collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Interests(BTreeSet<String>);

impl Interests {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, interest: &str) -> bool {
        self.0.contains(interest)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Interests present in both sets
    pub fn common<'a>(&'a self, other: &'a Interests) -> impl Iterator<Item = &'a str> {
        self.0.intersection(&other.0).map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Interests {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for Interests {
    fn from(values: Vec<String>) -> Self {
        values.into_iter().collect()
    }
}

/// Parse the stored scalar (a JSON array of strings) into a set
pub fn decode(raw: &str) -> Result<Interests, InterestsError> {
    let values: Vec<String> = serde_json::from_str(raw)?;
    Ok(values.into())
}

/// Serialize a set into its stored scalar form
///
/// The set is ordered, so equal sets always produce the same text.
pub fn encode(interests: &Interests) -> String {
    // A set of strings always serializes
    serde_json::to_string(interests).unwrap_or_else(|_| "[]".to_string())
}

/// Number of interests shared by two sets
#[inline]
pub fn overlap(a: &Interests, b: &Interests) -> usize {
    a.common(b).count()
}
