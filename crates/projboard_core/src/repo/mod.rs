//! Repository layer: persistence contracts for whole projects.
//!
//! # Responsibility
//! - Define the store contract the collection persists through.
//! - Isolate SQLite and document encoding details from services.
//!
//! # Invariants
//! - A project is always written and read as one aggregate document.
//! - Store APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod project_repo;
