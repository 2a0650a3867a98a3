//! Resolve tests - full scripts for player inputs and cascades

use tui_mordicus::core::{resolve_chain, resolve_move_chain, CoreError, Grid, StateSnapshot};
use tui_mordicus::types::Direction;

fn state(text: &str, lives: u32, bonus: u32) -> StateSnapshot {
    StateSnapshot::new(Grid::parse(text).unwrap(), lives, 0, bonus)
}

fn grid(text: &str) -> Grid {
    Grid::parse(text).unwrap()
}

#[test]
fn test_two_pushes_clear_the_level() {
    let start = state("@ b . . B", 5, 12);

    let first = resolve_move_chain(&start, Direction::Right).unwrap();
    assert_eq!(first.len(), 1, "nothing reacts to the first push");
    assert_eq!(first[0].grid, grid(". @ b . B"));
    assert_eq!(first[0].bonus, 7);
    assert!(!first[0].is_success());

    let second = resolve_move_chain(&first[0], Direction::Right).unwrap();
    assert_eq!(second.len(), 2);
    assert_eq!(second[0].grid, grid(". . @ b B"));
    assert_eq!(second[0].bonus, 2);
    assert_eq!(second[1].grid, grid(". . @ S ."));
    assert!(second[1].is_success());
    assert_eq!(second[1].lives, 5);
}

#[test]
fn test_cascade_stops_at_success() {
    let script = resolve_chain(&state("@ . . b B", 5, 100));
    assert_eq!(script.len(), 1);
    assert_eq!(script[0].grid, grid("@ . . S ."));
    assert!(script[0].is_success());
}

#[test]
fn test_capture_costs_exactly_one_life() {
    let script = resolve_chain(&state(". b .\nb R @\n. . .", 3, 100));
    assert_eq!(script.len(), 1);
    assert_eq!(script[0].grid, grid(". R .\nR . R\n. . ."));
    assert!(script[0].is_player_dead());
    assert_eq!(script[0].lives, 2);
}

#[test]
fn test_capture_on_top_of_bananas() {
    let script = resolve_chain(&state("@ b b\nR . .", 5, 100));
    assert_eq!(script.len(), 1);
    assert_eq!(script[0].grid, grid("R b b\n. . ."));
    assert_eq!(script[0].lives, 4);
}

#[test]
fn test_walking_into_reach_of_a_gorilla() {
    let start = state(". @ b\nR . .", 1, 100);
    let script = resolve_move_chain(&start, Direction::Left).unwrap();

    assert_eq!(script.len(), 2);
    assert_eq!(script[0].grid, grid("@ . b\nR . ."));
    assert_eq!(script[0].lives, 1);
    assert_eq!(script[1].grid, grid("R . b\n. . ."));
    assert_eq!(script[1].lives, 0);
    assert!(script[1].is_game_over());
}

#[test]
fn test_every_cascade_frame_is_kept() {
    let script = resolve_chain(&state("@ o . .\n. . . .\n> . . .", 5, 100));
    let frames: Vec<Grid> = script.iter().map(|s| s.grid.clone()).collect();
    assert_eq!(
        frames,
        vec![
            grid("@ o . .\n. . . .\n. > . ."),
            grid("@ o . .\n. . . .\n. . > ."),
            grid("@ o . .\n. . . .\n. . . >"),
        ]
    );
    assert!(script.iter().all(|s| s.lives == 5 && s.bonus == 100));
}

#[test]
fn test_arrows_meeting_head_on_block_the_lane() {
    let script = resolve_chain(&state("@ o\n. .\nv .\n. .\n^ .", 5, 0));
    assert_eq!(script.len(), 1);
    assert_eq!(script[0].grid, grid("@ o\n. .\n. .\n# .\n. ."));
}

#[test]
fn test_settled_script_can_be_resumed() {
    let script = resolve_chain(&state("@ o . .\n. . . .\n> . . .", 5, 100));
    let last = script.last().unwrap();
    assert!(resolve_chain(last).is_empty());
}

#[test]
fn test_blocked_move_still_yields_a_frame() {
    let start = state("@ #\no .", 5, 100);
    let script = resolve_move_chain(&start, Direction::Right).unwrap();
    assert_eq!(script, vec![start]);
}

#[test]
fn test_move_without_player_fails() {
    let start = state("R . b", 0, 100);
    assert_eq!(
        resolve_move_chain(&start, Direction::Up),
        Err(CoreError::InvalidGrid)
    );
}

#[test]
fn test_resolution_is_deterministic() {
    let start = state(
        "
        @ . b . B
        . v . < .
        R . > . b
        ",
        5,
        100,
    );
    for dir in Direction::ALL {
        let a = resolve_move_chain(&start, dir).unwrap();
        let b = resolve_move_chain(&start, dir).unwrap();
        assert_eq!(a, b);
    }
}
