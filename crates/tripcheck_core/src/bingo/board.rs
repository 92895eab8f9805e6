//! Sampled bingo board with cached composition.
//!
//! # Invariants
//! - A board holds exactly `grid_side(n)^2` cells for the collection size `n`
//!   it was generated from.
//! - The sample is only redrawn on explicit request or when the required
//!   cell count changes.

use crate::bingo::lines::{completed_lines, grid_side, highlighted_cells, BingoLine};
use crate::model::item::{ChecklistItem, ItemId};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Random square sample of checklist items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BingoBoard {
    /// Row-major snapshot taken when the board was drawn.
    cells: Vec<ChecklistItem>,
}

/// Render-ready view of one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardCell {
    pub index: usize,
    pub id: ItemId,
    pub label: String,
    pub checked: bool,
    /// Part of at least one completed line.
    pub highlighted: bool,
}

impl BingoBoard {
    /// Draws a board of `grid_side(items.len())^2` distinct items.
    pub fn generate<R: Rng + ?Sized>(items: &[ChecklistItem], rng: &mut R) -> Self {
        let total = required_cells(items.len());
        if total == 0 {
            return Self::default();
        }

        let mut shuffled = items.to_vec();
        shuffled.shuffle(rng);
        shuffled.truncate(total);
        Self { cells: shuffled }
    }

    /// Redraws the sample unconditionally.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, items: &[ChecklistItem], rng: &mut R) {
        *self = Self::generate(items, rng);
    }

    /// Redraws only when the collection size no longer yields this board's
    /// cell count. Returns whether a redraw happened.
    pub fn sync<R: Rng + ?Sized>(&mut self, items: &[ChecklistItem], rng: &mut R) -> bool {
        if self.cells.len() == required_cells(items.len()) {
            return false;
        }
        self.regenerate(items, rng);
        true
    }

    pub fn side(&self) -> usize {
        grid_side(self.cells.len())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Sampled snapshot in row-major order.
    pub fn cells(&self) -> &[ChecklistItem] {
        &self.cells
    }

    /// Live checked state per cell; cells whose item is gone count as
    /// unchecked.
    pub fn checked_states(&self, items: &[ChecklistItem]) -> Vec<bool> {
        let live = index_by_id(items);
        self.cells
            .iter()
            .map(|cell| live.get(&cell.id).is_some_and(|item| item.checked))
            .collect()
    }

    pub fn completed_lines(&self, items: &[ChecklistItem]) -> Vec<BingoLine> {
        completed_lines(self.side(), &self.checked_states(items))
    }

    /// Cells merged with live item state, ready for display.
    pub fn render(&self, items: &[ChecklistItem]) -> Vec<BoardCell> {
        let live = index_by_id(items);
        let highlighted = highlighted_cells(&self.completed_lines(items));
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                let current = live.get(&cell.id).copied().unwrap_or(cell);
                BoardCell {
                    index,
                    id: current.id,
                    label: current.label.clone(),
                    checked: live.contains_key(&cell.id) && current.checked,
                    highlighted: highlighted.contains(&index),
                }
            })
            .collect()
    }
}

/// Display toggles for the board; independent of the derived data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BingoView {
    pub open: bool,
    pub show_ids: bool,
}

impl Default for BingoView {
    fn default() -> Self {
        Self {
            open: true,
            show_ids: true,
        }
    }
}

impl BingoView {
    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    pub fn toggle_ids(&mut self) {
        self.show_ids = !self.show_ids;
    }
}

fn required_cells(item_count: usize) -> usize {
    let side = grid_side(item_count);
    side * side
}

fn index_by_id(items: &[ChecklistItem]) -> HashMap<ItemId, &ChecklistItem> {
    items.iter().map(|item| (item.id, item)).collect()
}
