//! Domain model for work items and the users they are assigned to.
//!
//! # Responsibility
//! - Define canonical records shared by storage, repositories and services.
//!
//! # Invariants
//! - Every record is identified by a stable v4 UUID.
//! - Deletion is a hard delete; there are no tombstones.

pub mod user;
pub mod work_item;
