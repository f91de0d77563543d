//! API middleware components

pub mod admin_auth;
pub mod metrics;

pub use admin_auth::RequireAdmin;
pub use metrics::metrics_middleware;
