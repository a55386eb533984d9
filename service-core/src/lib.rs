//! service-core: Shared infrastructure for the entitlement workspace.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
