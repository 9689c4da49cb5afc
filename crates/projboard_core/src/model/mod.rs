//! In-memory project/task/member aggregate.
//!
//! # Responsibility
//! - Define the domain types and their consistency rules.
//!
//! # Invariants
//! - Ownership is a tree: project → roster/board → tasks → assignment sets.
//! - The only cross-link is the member index number inside assignment sets.
//! - Model code never performs I/O or logging.

pub mod assignment;
pub mod board;
pub mod date;
pub mod error;
pub mod member;
pub mod project;
pub mod roster;
pub mod task;
