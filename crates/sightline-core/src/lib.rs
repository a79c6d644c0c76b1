//! Core types and definitions for the SIGHTLINE targeting pipeline.
//!
//! This crate defines the vocabulary shared across all other crates:
//! entity identities and records, components, configuration, and constants.
//! It has no dependency on the ECS or any host framework.

pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod types;
