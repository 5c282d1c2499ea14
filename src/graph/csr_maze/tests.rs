//! Tests for the CSR maze.

use super::*;

#[test]
fn test_csr_neighbors_and_degree() {
    // 0 -> 1, 2
    // 1 -> 2
    // 2 ->
    // 3 -> 1
    let adjacency = vec![vec![1, 2], vec![2], vec![], vec![1]];
    let maze = CsrMaze::from_adjacency(&adjacency, &[2]);

    assert_eq!(maze.node_count(), 4);
    assert_eq!(maze.edge_count(), 4);
    assert_eq!(maze.neighbors(0), &[1, 2]);
    assert!(maze.neighbors(2).is_empty());
    assert_eq!(maze.degree(3), 1);
    assert!(maze.has_edge(3, 1));
    assert!(!maze.has_edge(1, 3));
}

#[test]
fn test_undirected_edges_are_symmetric() {
    let maze = CsrMaze::from_undirected_edges(3, &[(0, 1), (1, 2)], &[2]);
    assert!(maze.has_edge(0, 1));
    assert!(maze.has_edge(1, 0));
    assert!(maze.has_edge(2, 1));
    assert!(!maze.has_edge(0, 2));
    assert_eq!(maze.edge_count(), 4);
}

#[test]
fn test_self_loop_is_stored_once() {
    let maze = CsrMaze::from_undirected_edges(1, &[(0, 0)], &[]);
    assert_eq!(maze.neighbors(0), &[0]);
}

#[test]
fn test_goals_roundtrip() {
    let mut maze = CsrMaze::from_undirected_edges(4, &[(0, 1)], &[3, 1]);
    assert_eq!(maze.goals(), vec![1, 3]);
    assert!(maze.has_goal(3));
    maze.set_goal(3, false);
    assert_eq!(maze.goals(), vec![1]);
}

#[test]
fn test_players_are_recorded() {
    let mut maze = CsrMaze::from_undirected_edges(2, &[(0, 1)], &[1]);
    let p = maze.new_player(0);
    maze.move_player(p, 1);
    assert_eq!(maze.players().position(p), Some(1));
    assert_eq!(maze.players().total_moves(), 1);
    maze.reset_players();
    assert_eq!(maze.players().player_count(), 0);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_out_of_bounds_edge_panics() {
    let _ = CsrMaze::from_adjacency(&[vec![1]], &[]);
}

#[test]
fn test_players_accumulate_across_runs_until_reset() {
    use crate::search::SequentialSolver;

    let mut maze = CsrMaze::from_undirected_edges(3, &[(0, 1), (1, 2)], &[2]);
    for _ in 0..2 {
        assert_eq!(SequentialSolver::new(&maze).solve(0), Ok(Some(vec![0, 1, 2])));
    }
    assert_eq!(maze.players().player_count(), 2);
    assert_eq!(maze.players().total_moves(), 6);

    maze.reset_players();
    assert_eq!(maze.players().player_count(), 0);
    assert_eq!(maze.players().total_moves(), 0);
}
