//! Wire types exchanged with the detection backend.

mod admin;
mod analysis;
mod auth;
mod profile;

pub use admin::{AdminData, AdminUser, AdminUserUpdate};
pub use analysis::{explanation_data_url, AnalysisRecord, Prediction, Upload, Verdict};
pub use auth::{
    Ack, Availability, AvailabilityField, AvailabilityRequest, LoginRequest, LoginResponse,
    RegisterRequest, ResetPasswordRequest,
};
pub use profile::{Profile, ProfileUpdate};
