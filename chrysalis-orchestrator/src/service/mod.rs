//! Service Module
//!
//! Business logic layer for the orchestrator: job submission, the pipeline
//! executor that drives the five migration stages, and the dual deployment
//! coordinator. Services mutate the stores; HTTP handlers stay thin.

pub mod deployment;
pub mod job;
pub mod pipeline;
