// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Profile, ProfileId, ProfileRecord, NewProfileRecord, ProfileChanges, ScanField};
pub use requests::{CreateProfileRequest, UpdateProfileRequest, ListProfilesQuery};
pub use responses::{HealthResponse, ErrorResponse, MessageResponse};
