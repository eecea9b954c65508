use thiserror::Error;
use crate::core::interests::{overlap, InterestsError};
use crate::models::{Profile, ProfileId, ProfileRecord, ScanField};
use crate::services::store::{ProfileReader, StoreError};

/// Minimum number of shared interests for two profiles to match
pub const MIN_COMMON_INTERESTS: usize = 1;

/// Errors from the discovery query
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("User not found: {0}")]
    NotFound(ProfileId),

    #[error("No matches found for user {0}")]
    NoMatches(ProfileId),

    #[error("Stored interests for user {id} are malformed: {source}")]
    MalformedInterests {
        id: ProfileId,
        #[source]
        source: InterestsError,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// A candidate left out of the results because its stored data is corrupt
#[derive(Debug)]
pub struct SkippedCandidate {
    pub id: ProfileId,
    pub reason: InterestsError,
}

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<Profile>,
    pub total_candidates: usize,
    pub skipped: Vec<SkippedCandidate>,
}

/// Interest-overlap matcher
///
/// Two profiles match when they are distinct, live in the same city and share
/// at least `min_common_interests` interests. The predicate is symmetric.
/// Candidate order is preserved; nothing is ranked.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    min_common_interests: usize,
}

impl Matcher {
    /// Threshold below one is raised to one, so an empty set never matches
    pub fn new(min_common_interests: usize) -> Self {
        Self {
            min_common_interests: min_common_interests.max(1),
        }
    }

    pub fn min_common_interests(&self) -> usize {
        self.min_common_interests
    }

    #[inline]
    pub fn is_match(&self, subject: &Profile, candidate: &Profile) -> bool {
        subject.id != candidate.id
            && subject.city == candidate.city
            && overlap(&subject.interests, &candidate.interests) >= self.min_common_interests
    }

    /// Filter stored candidates down to the subject's matches
    ///
    /// A candidate whose interests fail to decode is skipped and reported in
    /// `MatchResult::skipped`; it does not abort the scan.
    pub fn find_matches(&self, subject: &Profile, candidates: Vec<ProfileRecord>) -> MatchResult {
        let total_candidates = candidates.len();
        let mut matches = Vec::new();
        let mut skipped = Vec::new();

        for record in candidates {
            // The store already scopes the scan; these keep the invariants
            // even if it does not.
            if record.id == subject.id || record.city != subject.city {
                continue;
            }

            let id = record.id;
            let candidate = match record.into_profile() {
                Ok(profile) => profile,
                Err(reason) => {
                    tracing::warn!(
                        "Skipping candidate {} for subject {}: {}",
                        id,
                        subject.id,
                        reason
                    );
                    skipped.push(SkippedCandidate { id, reason });
                    continue;
                }
            };

            if self.is_match(subject, &candidate) {
                matches.push(candidate);
            }
        }

        MatchResult {
            matches,
            total_candidates,
            skipped,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(MIN_COMMON_INTERESTS)
    }
}

/// Compute the matches for `subject_id` using only read access to the store
///
/// Fails with `NotFound` when the subject does not exist and with
/// `NoMatches` when no candidate qualifies, whether the subject was alone in
/// its city or every candidate fell below the threshold.
pub async fn compute_matches<R>(
    reader: &R,
    matcher: &Matcher,
    subject_id: ProfileId,
) -> Result<MatchResult, MatchError>
where
    R: ProfileReader + ?Sized,
{
    let subject = reader
        .get_by_id(subject_id)
        .await?
        .ok_or(MatchError::NotFound(subject_id))?
        .into_profile()
        .map_err(|source| MatchError::MalformedInterests {
            id: subject_id,
            source,
        })?;

    let candidates = reader
        .scan_by_equality(ScanField::City, &subject.city, Some(subject.id))
        .await?;

    let result = matcher.find_matches(&subject, candidates);

    if result.matches.is_empty() {
        tracing::debug!(
            "No matches for {}: {} candidates in {:?}, {} skipped",
            subject_id,
            result.total_candidates,
            subject.city,
            result.skipped.len()
        );
        return Err(MatchError::NoMatches(subject_id));
    }

    Ok(result)
}
