pub mod jobs;
pub mod licenses;
pub mod limits;
pub mod trust;

pub use jobs::{project_jobs, JobView};
pub use licenses::{project_licenses, LicenseView};
pub use limits::{project_limits, LimitView};
pub use trust::{project_trust, TrustView};
