//! Data Transfer Objects for the HTTP surface
//!
//! Request and response shapes exchanged with clients of the orchestrator and
//! with the external traffic gateway and shadow-traffic arbiter. The job and
//! deployment surfaces use camelCase keys; the arbiter telemetry keeps the
//! snake_case keys the external service emits.

pub mod deployment;
pub mod gateway;
pub mod job;
pub mod upload;
