use super::*;

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn kinds(blocks: &[DiffBlock]) -> Vec<DiffKind> {
    blocks.iter().map(|b| b.kind).collect()
}

fn assert_partition(left: &[String], right: &[String], blocks: &[DiffBlock]) {
    assert!(!blocks.is_empty());
    let (mut li, mut rj) = (0, 0);
    for block in blocks {
        assert_eq!(block.left.start, li, "left gap/overlap in {blocks:?}");
        assert_eq!(block.right.start, rj, "right gap/overlap in {blocks:?}");
        assert!(block.left.start <= block.left.end);
        assert!(block.right.start <= block.right.end);
        li = block.left.end;
        rj = block.right.end;

        match block.kind {
            DiffKind::Equal => {
                assert_eq!(&left[block.left.clone()], &right[block.right.clone()]);
            }
            DiffKind::Add => assert!(block.left.is_empty() && !block.right.is_empty()),
            DiffKind::Delete => assert!(!block.left.is_empty() && block.right.is_empty()),
            DiffKind::Modify => assert!(!block.left.is_empty() && !block.right.is_empty()),
        }
    }
    assert_eq!(li, left.len());
    assert_eq!(rj, right.len());
}

#[test]
fn identical_inputs_are_one_equal_block() {
    let l = lines(&["a", "b", "c"]);
    let blocks = calculate(&l, &l.clone());
    assert_eq!(blocks, vec![DiffBlock::new(0..3, 0..3, DiffKind::Equal)]);
}

#[test]
fn both_empty_is_degenerate_equal_block() {
    let empty: Vec<String> = Vec::new();
    assert_eq!(
        calculate(&empty, &empty),
        vec![DiffBlock::new(0..0, 0..0, DiffKind::Equal)]
    );
}

#[test]
fn single_substitution_is_modify() {
    let l = lines(&["a", "b", "c"]);
    let r = lines(&["a", "x", "c"]);
    assert_eq!(
        calculate(&l, &r),
        vec![
            DiffBlock::new(0..1, 0..1, DiffKind::Equal),
            DiffBlock::new(1..2, 1..2, DiffKind::Modify),
            DiffBlock::new(2..3, 2..3, DiffKind::Equal),
        ]
    );
}

#[test]
fn left_tail_is_delete_with_empty_right_range() {
    let l = lines(&["a", "b"]);
    let r = lines(&["a"]);
    assert_eq!(
        calculate(&l, &r),
        vec![
            DiffBlock::new(0..1, 0..1, DiffKind::Equal),
            DiffBlock::new(1..2, 1..1, DiffKind::Delete),
        ]
    );
}

#[test]
fn right_tail_is_add() {
    let l = lines(&["a"]);
    let r = lines(&["a", "b", "c"]);
    assert_eq!(
        calculate(&l, &r),
        vec![
            DiffBlock::new(0..1, 0..1, DiffKind::Equal),
            DiffBlock::new(1..1, 1..3, DiffKind::Add),
        ]
    );
}

#[test]
fn empty_left_is_single_add() {
    let empty: Vec<String> = Vec::new();
    let r = lines(&["a", "b"]);
    assert_eq!(
        calculate(&empty, &r),
        vec![DiffBlock::new(0..0, 0..2, DiffKind::Add)]
    );
}

#[test]
fn left_lookahead_resyncs_as_delete() {
    let l = lines(&["a", "x", "y", "b"]);
    let r = lines(&["a", "b"]);
    assert_eq!(
        calculate(&l, &r),
        vec![
            DiffBlock::new(0..1, 0..1, DiffKind::Equal),
            DiffBlock::new(1..3, 1..1, DiffKind::Delete),
            DiffBlock::new(3..4, 1..2, DiffKind::Equal),
        ]
    );
}

#[test]
fn right_lookahead_resyncs_as_add() {
    let l = lines(&["a", "b"]);
    let r = lines(&["a", "x", "b"]);
    assert_eq!(
        calculate(&l, &r),
        vec![
            DiffBlock::new(0..1, 0..1, DiffKind::Equal),
            DiffBlock::new(1..1, 1..2, DiffKind::Add),
            DiffBlock::new(1..2, 2..3, DiffKind::Equal),
        ]
    );
}

#[test]
fn left_lookahead_wins_over_right() {
    let l = lines(&["x", "y"]);
    let r = lines(&["y", "x"]);
    let blocks = calculate(&l, &r);
    assert_eq!(
        kinds(&blocks),
        vec![DiffKind::Delete, DiffKind::Equal, DiffKind::Add]
    );
    assert_eq!(blocks[0], DiffBlock::new(0..1, 0..0, DiffKind::Delete));
    assert_eq!(blocks[2], DiffBlock::new(2..2, 1..2, DiffKind::Add));
}

#[test]
fn smallest_lookahead_distance_wins() {
    let l = lines(&["q", "b", "b"]);
    let r = lines(&["b"]);
    assert_eq!(
        calculate(&l, &r),
        vec![
            DiffBlock::new(0..1, 0..0, DiffKind::Delete),
            DiffBlock::new(1..2, 0..1, DiffKind::Equal),
            DiffBlock::new(2..3, 1..1, DiffKind::Delete),
        ]
    );
}

#[test]
fn deletion_beyond_lookahead_closes_when_right_runs_out() {
    // "b" sits 4 lines ahead, past the lookahead, so "1" pairs with "b" as a modify and the
    // left tail becomes a delete once the right side is exhausted.
    let l = lines(&["a", "1", "2", "3", "4", "b"]);
    let r = lines(&["a", "b"]);
    assert_eq!(
        calculate(&l, &r),
        vec![
            DiffBlock::new(0..1, 0..1, DiffKind::Equal),
            DiffBlock::new(1..2, 1..2, DiffKind::Modify),
            DiffBlock::new(2..6, 2..2, DiffKind::Delete),
        ]
    );
}

#[test]
fn substitution_run_stays_one_modify_block() {
    let l = lines(&["a", "b", "c", "z"]);
    let r = lines(&["x", "y", "c", "z"]);
    assert_eq!(
        calculate(&l, &r),
        vec![
            DiffBlock::new(0..2, 0..2, DiffKind::Modify),
            DiffBlock::new(2..4, 2..4, DiffKind::Equal),
        ]
    );
}

#[test]
fn blocks_always_partition_both_sides() {
    // Small alphabet so matches, lookahead hits and misses all occur.
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move || {
        seed = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (seed >> 33) as usize
    };

    for _ in 0..500 {
        let n = next() % 12;
        let m = next() % 12;
        let l: Vec<String> = (0..n).map(|_| ((b'a' + (next() % 4) as u8) as char).to_string()).collect();
        let r: Vec<String> = (0..m).map(|_| ((b'a' + (next() % 4) as u8) as char).to_string()).collect();

        let blocks = calculate(&l, &r);
        assert_partition(&l, &r, &blocks);
        if l == r {
            assert_eq!(blocks.len(), 1);
            assert_eq!(blocks[0].kind, DiffKind::Equal);
        }
    }
}
