//! Property tests: rejected moves leave the piece untouched, rotation stays in range.

use blockfall::piece::{Collision, Piece};
use blockfall::source::RandomSource;
use blockfall::{Board, Cell, Grid, TetrominoKind};
use proptest::prelude::*;

fn kind() -> impl Strategy<Value = TetrominoKind> {
    prop::sample::select(TetrominoKind::ALL.to_vec())
}

/// Grid with a scatter of settled cells from `mask`.
fn scattered(mask: &[bool]) -> Grid {
    let mut g = Grid::new(10, 20).unwrap();
    for (i, &on) in mask.iter().enumerate() {
        if on {
            g.set(i % 10, i / 10, Cell::Settled(TetrominoKind::T));
        }
    }
    g
}

proptest! {
    #[test]
    fn failed_moves_roll_back(
        kind in kind(),
        x in -3i32..12,
        y in -3i32..22,
        rotation in 0usize..8,
        dx in -2i32..=2,
        dy in -2i32..=2,
        mask in prop::collection::vec(prop::bool::weighted(0.2), 200),
    ) {
        let grid = scattered(&mask);
        let mut p = Piece::with_rotation(kind, x, y, rotation);
        let before = p.clone();
        let c = p.attempt_move(&grid, dx, dy);
        if c == Collision::None {
            prop_assert_eq!((p.x, p.y), (x + dx, y + dy));
            prop_assert_eq!(p.check_collision(&grid), Collision::None);
        } else {
            prop_assert_eq!(p, before);
        }
    }

    #[test]
    fn rotation_index_stays_in_range(
        kind in kind(),
        turns in prop::collection::vec(prop::bool::ANY, 0..40),
    ) {
        let grid = Grid::new(10, 20).unwrap();
        let mut p = Piece::new(kind, 3, 8);
        for cw in turns {
            let before = p.rotation();
            let c = p.attempt_rotate(&grid, if cw { 1 } else { -1 });
            prop_assert!(p.rotation() < kind.rotation_count());
            if c != Collision::None {
                prop_assert_eq!(p.rotation(), before);
            }
        }
    }

    #[test]
    fn random_play_keeps_grid_consistent(
        seed in any::<u64>(),
        moves in prop::collection::vec(0u8..6, 1..300),
    ) {
        let mut b = Board::random(10, 20, Some(seed)).unwrap();
        for m in moves {
            match m {
                0 => { b.move_left(); }
                1 => { b.move_right(); }
                2 => { b.rotate_cw(); }
                3 => { b.rotate_ccw(); }
                4 => { b.advance_one_step(); }
                _ => { b.hard_drop(); }
            }
            // The settled grid never holds transient cells or complete rows.
            prop_assert!(b.grid().rows().flatten().all(|c| c.is_settled()));
            for y in 0..b.grid().height() {
                prop_assert!(!b.grid().is_row_complete(y));
            }
            if !b.is_game_over() {
                prop_assert_eq!(b.current().check_collision(b.grid()), Collision::None);
                prop_assert!(b.current().kind != TetrominoKind::P);
            }
        }
    }
}

#[test]
fn seeded_random_boards_repeat() {
    let play = |seed| {
        let mut b = Board::new(10, 20, RandomSource::seeded(seed)).unwrap();
        let mut kinds = Vec::new();
        for _ in 0..10 {
            kinds.push(b.current().kind);
            b.hard_drop();
        }
        kinds
    };
    assert_eq!(play(11), play(11));
}
