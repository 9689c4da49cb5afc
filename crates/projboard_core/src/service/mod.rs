//! Core use-case services.
//!
//! # Responsibility
//! - Own the collection of projects and pair in-memory changes with store
//!   writes.
//! - Build domain objects from raw command text.

pub mod factory;
pub mod project_collection;
