use rand::rngs::StdRng;
use rand::SeedableRng;
use tripcheck_core::{
    grid_side, BingoBoard, ChecklistService, KeyValueStore, LineKind, MemoryImageStore,
    MemoryKeyValueStore, STORAGE_KEY,
};

fn service_with(count: usize) -> ChecklistService<MemoryKeyValueStore, MemoryImageStore> {
    let mut kv = MemoryKeyValueStore::new();
    kv.set(STORAGE_KEY, "[]").unwrap();
    let mut service = ChecklistService::open(kv, MemoryImageStore::new()).unwrap();
    for index in 0..count {
        service.add(format!("stop {index}")).unwrap();
    }
    service
}

#[test]
fn board_sizes_match_documented_examples() {
    let mut rng = StdRng::seed_from_u64(1);
    for (count, cells) in [(10, 9), (3, 1), (1, 1), (0, 0), (16, 16)] {
        let service = service_with(count);
        let board = BingoBoard::generate(service.items(), &mut rng);
        assert_eq!(board.cells().len(), cells, "item count {count}");
        assert_eq!(board.side(), grid_side(count));
    }
}

#[test]
fn toggling_items_completes_lines_without_redrawing() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut service = service_with(4);
    let board = BingoBoard::generate(service.items(), &mut rng);
    let snapshot = board.clone();

    let top_row: Vec<_> = board.cells()[..2].iter().map(|cell| cell.id).collect();
    for id in &top_row {
        service.toggle(*id).unwrap();
    }

    let lines = board.completed_lines(service.items());
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].kind, LineKind::Row(0));
    assert_eq!(board, snapshot);

    for cell in &board.cells()[2..] {
        service.toggle(cell.id).unwrap();
    }
    assert_eq!(board.completed_lines(service.items()).len(), 6);
}

#[test]
fn board_follows_collection_growth() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut service = service_with(3);
    let mut board = BingoBoard::generate(service.items(), &mut rng);
    assert_eq!(board.side(), 1);

    service.add("fourth").unwrap();
    assert!(board.sync(service.items(), &mut rng));
    assert_eq!(board.side(), 2);

    service.add("fifth").unwrap();
    assert!(!board.sync(service.items(), &mut rng));
}
