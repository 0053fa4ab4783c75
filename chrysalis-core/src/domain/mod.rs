//! Core domain types
//!
//! This module contains the core domain structures used across Chrysalis services.
//! These types represent the fundamental business entities and are shared between
//! the orchestrator (which owns the stores) and the external-collaborator clients.

pub mod artifact;
pub mod deployment;
pub mod job;
