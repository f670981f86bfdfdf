//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, defaulting and enrichment above repositories.
//! - Return view records, never raw entities.

pub mod dto;
pub mod error;
pub mod user_service;
pub mod validation;
pub mod work_item_service;
