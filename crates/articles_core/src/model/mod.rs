//! Domain model for the articles service.
//!
//! # Responsibility
//! - Define the canonical article record shared by storage and service layers.
//! - Own the field-level patch rule applied on update.
//!
//! # Invariants
//! - An article carries an `id` if and only if it has been persisted.
//! - Deletion is a hard delete; there is no tombstone state.

pub mod article;
