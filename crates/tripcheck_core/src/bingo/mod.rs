//! Bingo board derived from the checklist.
//!
//! # Responsibility
//! - Size and sample a square board from the current items.
//! - Report completed rows, columns and diagonals from live checked state.
//!
//! # Invariants
//! - Board side is `floor(sqrt(item_count))`; a zero side renders nothing.
//! - Checked state is always read from the authoritative collection, never
//!   from the sampled snapshot.

pub mod board;
pub mod lines;
