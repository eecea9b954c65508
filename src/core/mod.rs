// Core algorithm exports
pub mod interests;
pub mod matcher;

pub use interests::{decode, encode, overlap, Interests, InterestsError};
pub use matcher::{compute_matches, MatchError, MatchResult, Matcher, SkippedCandidate, MIN_COMMON_INTERESTS};
