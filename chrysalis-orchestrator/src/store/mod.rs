//! Store Module
//!
//! In-process state owned by the orchestrator: the job table, the single-slot
//! deployment status record, and the uploaded file sets. All three are
//! explicit store objects so a durable backend could replace them without
//! touching callers.

pub mod deployment;
pub mod job;
pub mod upload;
