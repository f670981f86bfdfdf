//! Repository layer over the configured storage backend.
//!
//! # Responsibility
//! - Give services entity-shaped data access instead of a storage-shaped one.
//! - Allow swapping storage backends without touching services.
//!
//! # Invariants
//! - Repositories add no logic; validation and defaulting live in services.

pub mod user_repo;
pub mod work_item_repo;
