mod conversions;
mod types;

pub use types::{HealthDependencyStatus, HealthResponse, ProfileResponse};
