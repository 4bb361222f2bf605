pub mod lifecycle;
pub mod models;
pub mod repository;
pub mod service;
pub mod sweep;

pub use lifecycle::{display_status, filter_by_status, DisplayStatus, StatusFilter};
pub use models::{MonthlyPass, PassStatus, PaymentStatus, VehicleType};
pub use repository::{PassRepository, PassUpdate};
pub use service::{NewPassRequest, PassError, PassService};
pub use sweep::{LifecycleSweep, SweepOutcome};

#[cfg(test)]
pub(crate) mod support;
