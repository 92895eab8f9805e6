//! Checklist domain model.
//!
//! # Responsibility
//! - Define the canonical checklist item record and its field vocabulary.
//! - Own score normalization so no out-of-range score can be constructed.
//!
//! # Invariants
//! - Every item is identified by a stable `ItemId`.
//! - Score fields always hold values in `[0, 10]`.

pub mod id_alloc;
pub mod item;
pub mod score;
