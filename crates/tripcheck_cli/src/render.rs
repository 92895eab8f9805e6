//! Plain-text rendering of the checklist and the bingo board.

use std::fmt::Write as _;
use tripcheck_core::{
    BingoBoard, BingoView, ChecklistItem, ChecklistService, ImageStore, KeyValueStore, RepoResult,
    ScoreField,
};

pub fn item_list<K: KeyValueStore, I: ImageStore>(
    service: &ChecklistService<K, I>,
) -> RepoResult<String> {
    let mut out = String::new();
    let summary = service.summary();
    let _ = writeln!(out, "{}/{} checked", summary.checked, summary.total);

    for item in service.items() {
        let has_image = service.image(item.id)?.is_some();
        let _ = writeln!(
            out,
            "[{}] {:>13}  {}{}  ({})",
            if item.checked { "x" } else { " " },
            item.id,
            item.label,
            if has_image { "  [img]" } else { "" },
            scores(item)
        );
        if !item.notes.is_empty() {
            let _ = writeln!(out, "      notes: {}", item.notes);
        }
    }
    Ok(out)
}

pub fn bingo(board: &BingoBoard, items: &[ChecklistItem], view: BingoView) -> String {
    if board.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let lines = board.completed_lines(items);
    let _ = writeln!(
        out,
        "Bingo {0}x{0}: {1} completed line(s)",
        board.side(),
        lines.len()
    );
    if !view.open {
        return out;
    }

    for row in board.render(items).chunks(board.side()) {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| {
                let mark = match (cell.highlighted, cell.checked) {
                    (true, _) => '*',
                    (false, true) => 'x',
                    (false, false) => ' ',
                };
                if view.show_ids {
                    format!("[{mark}] {:>13}", cell.id)
                } else {
                    format!("[{mark}]")
                }
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join(" "));
    }
    out
}

fn scores(item: &ChecklistItem) -> String {
    ScoreField::ALL
        .iter()
        .map(|field| format!("{} {}", field.label(), item.score(*field)))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::bingo;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tripcheck_core::{BingoBoard, BingoView, ChecklistItem};

    #[test]
    fn empty_board_renders_nothing() {
        assert!(bingo(&BingoBoard::default(), &[], BingoView::default()).is_empty());
    }

    #[test]
    fn collapsed_board_renders_only_header() {
        let items: Vec<_> = (1..=4).map(|id| ChecklistItem::new(id, "spot")).collect();
        let board = BingoBoard::generate(&items, &mut StdRng::seed_from_u64(2));
        let mut view = BingoView::default();
        view.toggle_open();

        let text = bingo(&board, &items, view);
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Bingo 2x2"));
    }
}
