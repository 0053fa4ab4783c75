//! Chrysalis Core
//!
//! Core types and abstractions for the Chrysalis migration system.
//!
//! This crate contains:
//! - Domain types: Core business entities (Job, pipeline artifacts, deployment records)
//! - DTOs: Request/response shapes for the HTTP surface
//! - The retry policy shared by every pipeline stage

pub mod domain;
pub mod dto;
pub mod retry;
