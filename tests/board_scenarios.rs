//! End-to-end board scenarios driven through the public engine API.

use blockfall::source::SequenceSource;
use blockfall::TetrominoKind::{self, I, O, T};
use blockfall::{Board, Cell, Collision, Grid, Sound};

fn board(kinds: &[TetrominoKind]) -> Board<SequenceSource> {
    Board::new(10, 20, SequenceSource::new(kinds.iter().copied())).unwrap()
}

fn solid_count(grid: &Grid) -> usize {
    grid.rows().flatten().filter(|c| c.is_solid()).count()
}

#[test]
fn two_bars_and_a_square_clear_the_bottom_row() {
    let mut b = board(&[I, I, O]);

    for _ in 0..3 {
        assert_eq!(b.move_left(), Collision::None);
    }
    assert_eq!(b.move_left(), Collision::Side);
    b.hard_drop();

    for _ in 0..3 {
        assert_eq!(b.move_right(), Collision::None);
    }
    assert_eq!(b.move_right(), Collision::Side);
    b.hard_drop();

    let before = solid_count(b.grid());
    assert_eq!(before, 8);
    b.hard_drop();

    assert_eq!(b.score(), 40);
    assert_eq!(b.lines_cleared(), 1);
    assert_eq!(b.pieces_placed(), 3);
    // 8 bar cells + 4 square cells, minus the 10 cleared.
    assert_eq!(solid_count(b.grid()), 2);
    let bottom = b.grid().row(19).unwrap();
    for (x, cell) in bottom.iter().enumerate() {
        let expected = if x == 4 || x == 5 { Cell::Settled(O) } else { Cell::Empty };
        assert_eq!(*cell, expected, "column {x}");
    }
    assert!(b.take_sounds().contains(&Sound::ClearRow));
}

#[test]
fn spawn_position_is_the_same_for_every_piece() {
    let mut b = board(&[T, I, O, T]);
    let mut seen = Vec::new();
    for _ in 0..4 {
        let p = b.current();
        seen.push((p.kind, p.x, p.y, p.rotation()));
        b.hard_drop();
    }
    assert_eq!(
        seen,
        vec![(T, 4, 0, 0), (I, 3, 0, 0), (O, 4, 0, 0), (T, 4, 0, 0)]
    );
}

#[test]
fn tetris_scores_1200() {
    let mut grid = Grid::for_board(10, 20).unwrap();
    for y in 16..20 {
        for x in 0..9 {
            grid.set(x, y, Cell::Settled(T));
        }
    }
    let mut b = Board::from_grid(grid, SequenceSource::new([I]));
    // Vertical bar in the rightmost column: state 1 puts the bar at x + 2.
    assert_eq!(b.rotate_cw(), Collision::None);
    for _ in 0..4 {
        b.move_right();
    }
    assert_eq!(b.current().x, 7);
    b.hard_drop();
    assert_eq!(b.lines_cleared(), 4);
    assert_eq!(b.score(), 1200);
    assert_eq!(solid_count(b.grid()), 0);
}

#[test]
fn blocked_spawn_is_game_over_and_everything_stops() {
    let mut grid = Grid::for_board(10, 20).unwrap();
    for y in 0..2 {
        for x in 0..9 {
            grid.set(x, y, Cell::Settled(O));
        }
    }
    let mut b = Board::from_grid(grid.clone(), SequenceSource::new([T, I]));
    assert!(b.is_game_over());
    assert_eq!(b.take_sounds(), vec![Sound::GameOver]);

    for _ in 0..5 {
        b.advance_one_step();
        b.move_right();
        b.rotate_ccw();
        b.hard_drop();
    }
    assert_eq!(b.grid(), &grid);
    assert_eq!(b.score(), 0);
    assert!(b.take_sounds().is_empty());
    // The blocked piece is not drawn.
    assert_eq!(b.render_grid(), grid);
}

#[test]
fn resting_piece_reports_block_and_locks_on_the_next_tick() {
    let mut b = board(&[O, T]);
    while b.current().y < 18 {
        assert_eq!(b.advance_one_step(), Collision::None);
    }
    assert_eq!(b.move_right(), Collision::None);
    assert_eq!(b.advance_one_step(), Collision::Block);
    assert_eq!(b.grid().get(5, 19), Some(Cell::Settled(O)));
    assert_eq!(b.grid().get(6, 18), Some(Cell::Settled(O)));
    assert_eq!(b.current().kind, T);
}

#[test]
fn hard_drop_always_terminates_and_fills_up() {
    let mut b = board(&[I, O, T]);
    let mut drops = 0;
    while !b.is_game_over() {
        b.hard_drop();
        drops += 1;
        assert!(drops < 200, "board never filled");
    }
    assert!(b.pieces_placed() > 0);
    let sounds = b.take_sounds();
    assert_eq!(sounds.last(), Some(&Sound::GameOver));
}
