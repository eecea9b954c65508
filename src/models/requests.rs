use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::core::interests::Interests;

/// Request to create a profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0, max = 150))]
    pub age: i32,
    #[validate(length(min = 1, max = 50))]
    pub gender: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    pub interests: Interests,
}

/// Partial update; omitted fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 0, max = 150))]
    pub age: Option<i32>,
    #[validate(length(min = 1, max = 50))]
    pub gender: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
    pub interests: Option<Interests>,
}

/// Paging parameters for the profile listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListProfilesQuery {
    #[serde(default)]
    pub skip: u32,
    pub limit: Option<u32>,
}
