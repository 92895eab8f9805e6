//! Completed-line detection on a square grid.

use std::collections::BTreeSet;

/// Largest `n` with `n * n <= count`.
pub fn grid_side(count: usize) -> usize {
    let mut side = (count as f64).sqrt() as usize;
    // Float sqrt can be off by one near perfect squares.
    while side * side > count {
        side -= 1;
    }
    while (side + 1) * (side + 1) <= count {
        side += 1;
    }
    side
}

/// Which line of the grid completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LineKind {
    Row(usize),
    Column(usize),
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

/// One fully checked line with its row-major cell indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BingoLine {
    pub kind: LineKind,
    pub cells: Vec<usize>,
}

/// Returns every line whose cells are all checked.
///
/// `checked` is row-major; cells past its end count as unchecked. Rows come
/// first, then columns, then the two diagonals.
pub fn completed_lines(side: usize, checked: &[bool]) -> Vec<BingoLine> {
    if side == 0 {
        return Vec::new();
    }

    let is_checked = |index: usize| checked.get(index).copied().unwrap_or(false);
    let mut candidates = Vec::with_capacity(2 * side + 2);
    for row in 0..side {
        candidates.push(BingoLine {
            kind: LineKind::Row(row),
            cells: (0..side).map(|col| row * side + col).collect(),
        });
    }
    for col in 0..side {
        candidates.push(BingoLine {
            kind: LineKind::Column(col),
            cells: (0..side).map(|row| row * side + col).collect(),
        });
    }
    candidates.push(BingoLine {
        kind: LineKind::Diagonal,
        cells: (0..side).map(|i| i * side + i).collect(),
    });
    candidates.push(BingoLine {
        kind: LineKind::AntiDiagonal,
        cells: (0..side).map(|i| i * side + (side - 1 - i)).collect(),
    });

    candidates
        .into_iter()
        .filter(|line| line.cells.iter().all(|&cell| is_checked(cell)))
        .collect()
}

/// Union of cell indices across `lines`.
pub fn highlighted_cells(lines: &[BingoLine]) -> BTreeSet<usize> {
    lines
        .iter()
        .flat_map(|line| line.cells.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{completed_lines, grid_side, highlighted_cells, LineKind};

    #[test]
    fn side_is_floor_sqrt() {
        assert_eq!(grid_side(0), 0);
        assert_eq!(grid_side(1), 1);
        assert_eq!(grid_side(3), 1);
        assert_eq!(grid_side(4), 2);
        assert_eq!(grid_side(10), 3);
        assert_eq!(grid_side(24), 4);
        assert_eq!(grid_side(25), 5);
    }

    #[test]
    fn single_row_on_two_by_two() {
        let lines = completed_lines(2, &[true, true, false, false]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, LineKind::Row(0));
        assert_eq!(lines[0].cells, vec![0, 1]);
    }

    #[test]
    fn full_two_by_two_completes_every_line() {
        let lines = completed_lines(2, &[true; 4]);
        let kinds: Vec<_> = lines.iter().map(|line| line.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Row(0),
                LineKind::Row(1),
                LineKind::Column(0),
                LineKind::Column(1),
                LineKind::Diagonal,
                LineKind::AntiDiagonal,
            ]
        );
    }

    #[test]
    fn anti_diagonal_on_three_by_three() {
        let mut checked = [false; 9];
        for cell in [2, 4, 6] {
            checked[cell] = true;
        }
        let lines = completed_lines(3, &checked);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, LineKind::AntiDiagonal);
    }

    #[test]
    fn overlapping_lines_share_highlighted_cells() {
        // Row 0 and column 0 both complete; cell 0 belongs to both.
        let checked = [true, true, true, true, false, false, true, false, false];
        let lines = completed_lines(3, &checked);
        let cells: Vec<_> = highlighted_cells(&lines).into_iter().collect();
        assert_eq!(cells, vec![0, 1, 2, 3, 6]);
    }

    #[test]
    fn short_checked_vector_counts_as_unchecked() {
        let lines = completed_lines(2, &[true, true]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, LineKind::Row(0));
        assert!(completed_lines(0, &[]).is_empty());
    }
}
