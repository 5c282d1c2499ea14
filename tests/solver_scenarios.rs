use std::sync::atomic::{AtomicUsize, Ordering};

use amazed::{
    Cell, ConfigError, CsrMaze, ForkJoinSolver, GridMaze, Maze, SearchObserver, SequentialSolver,
    SharedState, SolveError, SolverConfig, VisitPolicy,
};

/// `w x h` grid where every cell is open, 4-neighbourhood, goal in the far corner.
fn open_grid(w: usize, h: usize) -> CsrMaze {
    let mut edges = Vec::new();
    for r in 0..h {
        for c in 0..w {
            let id = r * w + c;
            if c + 1 < w {
                edges.push((id, id + 1));
            }
            if r + 1 < h {
                edges.push((id, id + w));
            }
        }
    }
    CsrMaze::from_undirected_edges(w * h, &edges, &[w * h - 1])
}

/// Complete ternary tree of the given depth, goal at the last leaf.
fn ternary_tree(depth: u32) -> CsrMaze {
    let n = (3usize.pow(depth + 1) - 1) / 2;
    let edges: Vec<(Cell, Cell)> = (1..n).map(|c| ((c - 1) / 3, c)).collect();
    CsrMaze::from_undirected_edges(n, &edges, &[n - 1])
}

/// Spine `0..len` where every spine cell carries two leaf teeth, goal at the spine's end.
fn comb(len: usize) -> CsrMaze {
    let mut edges = Vec::with_capacity(3 * len);
    for i in 0..len {
        if i + 1 < len {
            edges.push((i, i + 1));
        }
        edges.push((i, len + 2 * i));
        edges.push((i, len + 2 * i + 1));
    }
    CsrMaze::from_undirected_edges(3 * len, &edges, &[len - 1])
}

fn assert_valid_path(maze: &CsrMaze, start: Cell, path: &[Cell]) {
    assert_eq!(path.first(), Some(&start), "path must begin at the start");
    let last = *path.last().expect("non-empty path");
    assert!(maze.has_goal(last), "path must end at a goal, ended at {last}");
    for w in path.windows(2) {
        assert!(maze.has_edge(w[0], w[1]), "{} -> {} is not an edge", w[0], w[1]);
    }
}

fn configs() -> Vec<SolverConfig> {
    let mut out = Vec::new();
    for policy in [VisitPolicy::Atomic, VisitPolicy::CheckThenInsert] {
        for fork_after in [0, 1, 4, usize::MAX] {
            for min_branches in [2, 3] {
                out.push(
                    SolverConfig::default()
                        .with_fork_after(fork_after)
                        .with_min_branches(min_branches)
                        .with_threads(4)
                        .with_visit_policy(policy),
                );
            }
        }
    }
    out
}

#[test]
fn line_graph_yields_the_line() {
    let maze = CsrMaze::from_undirected_edges(3, &[(0, 1), (1, 2)], &[2]);
    let solution = ForkJoinSolver::new(&maze, SolverConfig::default().with_fork_after(0))
        .solve(0)
        .unwrap();
    assert_eq!(solution.path, Some(vec![0, 1, 2]));
    assert!(solution.terminated);
}

#[test]
fn star_graph_goes_straight_to_the_goal_leaf() {
    let maze = CsrMaze::from_undirected_edges(4, &[(0, 1), (0, 2), (0, 3)], &[3]);
    for _ in 0..20 {
        let solution = ForkJoinSolver::new(&maze, SolverConfig::default().with_fork_after(0))
            .solve(0)
            .unwrap();
        assert!(solution.terminated);
        assert_eq!(solution.path, Some(vec![0, 3]));
        assert_eq!(solution.stats.forks, 1);
        assert_eq!(solution.stats.goal_signals, 1);
    }
}

#[test]
fn disconnected_goal_is_unreachable() {
    let maze = CsrMaze::from_undirected_edges(3, &[(1, 2)], &[2]);
    let solution = ForkJoinSolver::new(&maze, SolverConfig::default().with_fork_after(0))
        .solve(0)
        .unwrap();
    assert_eq!(solution.path, None);
    assert!(!solution.terminated);
    assert_eq!(solution.stats.visited, 1);
}

#[test]
fn maze_without_goals_is_unreachable() {
    let mut maze = open_grid(6, 6);
    maze.set_goal(35, false);
    for config in configs() {
        let solution = ForkJoinSolver::new(&maze, config).solve(0).unwrap();
        assert_eq!(solution.path, None);
        // Everything reachable was explored before concluding failure.
        assert_eq!(solution.stats.visited, 36);
    }
}

#[test]
fn start_on_goal_is_a_single_cell_path() {
    let maze = CsrMaze::from_undirected_edges(2, &[(0, 1)], &[0]);
    assert_eq!(amazed::solve(&maze, 0, 0).unwrap(), Some(vec![0]));
}

#[test]
fn every_configuration_finds_a_valid_path() {
    let grid = open_grid(12, 9);
    let tree = ternary_tree(5);
    for config in configs() {
        for (maze, start) in [(&grid, 0), (&grid, 50), (&tree, 0)] {
            let solution = ForkJoinSolver::new(maze, config.clone()).solve(start).unwrap();
            let path = solution.path.expect("goal is reachable");
            assert_valid_path(maze, start, &path);
        }
    }
}

#[test]
fn exactly_one_goal_is_reported_with_many_goals() {
    let mut maze = ternary_tree(5);
    let leaves: Vec<Cell> = (0..maze.cell_count()).filter(|&c| maze.degree(c) == 1).collect();
    for &leaf in &leaves {
        maze.set_goal(leaf, true);
    }
    let config = SolverConfig::default().with_fork_after(0).with_threads(8);
    for _ in 0..10 {
        let solution = ForkJoinSolver::new(&maze, config.clone()).solve(0).unwrap();
        let path = solution.path.expect("leaves are goals");
        assert_valid_path(&maze, 0, &path);
        assert!(solution.terminated);
    }
}

#[test]
fn never_forking_matches_sequential_reachability() {
    let reachable = open_grid(7, 5);
    let unreachable = CsrMaze::from_undirected_edges(6, &[(0, 1), (1, 2), (3, 4), (4, 5)], &[5]);
    for maze in [&reachable, &unreachable] {
        let sequential = SequentialSolver::new(maze).solve(0).unwrap();
        let solution = ForkJoinSolver::new(maze, SolverConfig::sequential()).solve(0).unwrap();
        assert_eq!(solution.path.is_some(), sequential.is_some());
        assert_eq!(solution.stats.forks, 0);
        assert_eq!(solution.stats.tasks_spawned, 0);
    }
}

#[test]
fn atomic_policy_never_expands_a_cell_twice() {
    let mut maze = open_grid(20, 20);
    maze.set_goal(399, false);
    let config = SolverConfig::default()
        .with_fork_after(0)
        .with_min_branches(2)
        .with_threads(8);
    let solution = ForkJoinSolver::new(&maze, config).solve(0).unwrap();
    assert_eq!(solution.stats.duplicate_expansions, 0);
    assert_eq!(solution.stats.expansions, solution.stats.visited);
    assert_eq!(solution.stats.visited, 400);
}

// With check-then-insert, two tasks can both pass the visited check for the
// same cell. Each such race costs one extra expansion, so expansions may exceed
// visited cells by exactly the number of duplicates. The path stays valid.
#[test]
fn check_then_insert_accounts_for_duplicate_expansions() {
    let mut maze = open_grid(20, 20);
    maze.set_goal(399, false);
    let config = SolverConfig::default()
        .with_fork_after(0)
        .with_min_branches(2)
        .with_threads(8)
        .with_visit_policy(VisitPolicy::CheckThenInsert);
    for _ in 0..5 {
        let solution = ForkJoinSolver::new(&maze, config.clone()).solve(0).unwrap();
        let stats = solution.stats;
        assert_eq!(stats.expansions, stats.visited + stats.duplicate_expansions);
        assert_eq!(stats.visited, 400);
    }

    maze.set_goal(399, true);
    let solution = ForkJoinSolver::new(&maze, config).solve(0).unwrap();
    assert_valid_path(&maze, 0, &solution.path.unwrap());
}

#[test]
fn visited_set_only_grows_under_concurrent_claims() {
    let state = SharedState::new(4096, VisitPolicy::Atomic, None);
    std::thread::scope(|s| {
        for t in 0..4 {
            let state = &state;
            s.spawn(move || {
                for cell in (t..4096).step_by(4) {
                    state.visited().claim(cell);
                }
            });
        }
        let state = &state;
        s.spawn(move || {
            let mut last = 0;
            while last < 4096 {
                let now = state.visited().len();
                assert!(now >= last, "visited shrank from {last} to {now}");
                last = now;
            }
        });
    });
    assert_eq!(state.visited().len(), 4096);
}

#[test]
fn task_cap_bounds_live_forks() {
    let maze = ternary_tree(6);
    let capped = SolverConfig::default().with_fork_after(0).with_max_live_tasks(6).with_threads(4);
    let solution = ForkJoinSolver::new(&maze, capped).solve(0).unwrap();
    assert!(solution.stats.peak_live_tasks <= 6);
    assert_valid_path(&maze, 0, &solution.path.unwrap());

    // A cap below the branching factor can never be met: the run is sequential.
    let starved = SolverConfig::default().with_fork_after(0).with_max_live_tasks(2);
    let solution = ForkJoinSolver::new(&maze, starved).solve(0).unwrap();
    assert_eq!(solution.stats.forks, 0);
    assert!(solution.stats.fork_fallbacks > 0);
    assert_valid_path(&maze, 0, &solution.path.unwrap());
}

#[derive(Default)]
struct CountingObserver {
    forks: AtomicUsize,
    joins: AtomicUsize,
    goals: AtomicUsize,
    expands: AtomicUsize,
}

impl SearchObserver for CountingObserver {
    fn on_expand(&self, _cell: Cell) {
        self.expands.fetch_add(1, Ordering::Relaxed);
    }

    fn on_fork(&self, _parent: Cell, children: &[Cell]) {
        assert!(children.len() >= 3);
        self.forks.fetch_add(1, Ordering::Relaxed);
    }

    fn on_join(&self, _parent: Cell, _found: bool) {
        self.joins.fetch_add(1, Ordering::Relaxed);
    }

    fn on_goal(&self, _goal: Cell) {
        self.goals.fetch_add(1, Ordering::Relaxed);
    }
}

#[test]
fn observer_sees_every_fork_join_and_one_goal() {
    let maze = ternary_tree(4);
    let observer = CountingObserver::default();
    let solution = ForkJoinSolver::new(&maze, SolverConfig::default().with_fork_after(0))
        .with_observer(&observer)
        .solve(0)
        .unwrap();
    assert!(solution.is_found());
    assert_eq!(observer.goals.load(Ordering::Relaxed), 1);
    assert_eq!(observer.forks.load(Ordering::Relaxed), solution.stats.forks);
    assert_eq!(observer.joins.load(Ordering::Relaxed), solution.stats.forks);
    assert_eq!(observer.expands.load(Ordering::Relaxed), solution.stats.expansions);
}

#[test]
fn players_follow_the_search() {
    let maze = ternary_tree(3);
    let solution = ForkJoinSolver::new(&maze, SolverConfig::default().with_fork_after(0))
        .solve(0)
        .unwrap();
    let players = maze.players();
    assert!(players.player_count() >= 1);
    assert!(players.player_count() <= 1 + solution.stats.tasks_spawned);
    assert!(players.total_moves() >= solution.path.unwrap().len());
}

#[test]
fn rejects_bad_start_and_bad_config() {
    let maze = CsrMaze::from_undirected_edges(2, &[(0, 1)], &[1]);
    assert!(matches!(
        ForkJoinSolver::new(&maze, SolverConfig::default()).solve(2),
        Err(SolveError::StartOutOfBounds { start: 2, cells: 2 })
    ));
    assert!(matches!(
        ForkJoinSolver::new(&maze, SolverConfig::default().with_min_branches(1)).solve(0),
        Err(SolveError::Config(ConfigError::InvalidMinBranches(1)))
    ));
}

#[test]
fn grid_maze_file_is_solved() {
    let maze = GridMaze::parse(include_str!("../mazes/demo.maze")).unwrap();
    let config = SolverConfig::default().with_fork_after(0).with_min_branches(2);
    let solution = ForkJoinSolver::new(&maze, config).solve(maze.start()).unwrap();
    let path = solution.path.expect("demo maze is solvable");
    assert_eq!(path[0], maze.start());
    assert!(maze.has_goal(*path.last().unwrap()));
    for w in path.windows(2) {
        assert!(maze.neighbors(w[0]).contains(&w[1]));
    }
    assert!(maze.render_path(&path).contains('o'));

    let walled = GridMaze::parse(include_str!("../mazes/walled.maze")).unwrap();
    let solution = ForkJoinSolver::new(&walled, SolverConfig::default())
        .solve(walled.start())
        .unwrap();
    assert_eq!(solution.path, None);
}

#[test]
fn long_comb_does_not_exhaust_worker_stacks() {
    let maze = comb(3000);
    let config = SolverConfig::default().with_fork_after(0);
    let solution = ForkJoinSolver::new(&maze, config.clone()).solve(0).unwrap();
    let path = solution.path.expect("the spine end is reachable");
    assert_eq!(path, (0..3000).collect::<Vec<_>>());
    assert!(solution.stats.fork_fallbacks > 0);

    assert_eq!(amazed::solve(&maze, 0, 0).unwrap().map(|p| p.len()), Some(3000));
}

#[test]
fn large_open_grid_does_not_exhaust_worker_stacks() {
    let maze = open_grid(300, 300);
    for threads in [None, Some(4)] {
        let mut config = SolverConfig::default().with_fork_after(0).with_min_branches(2);
        config.threads = threads;
        let solution = ForkJoinSolver::new(&maze, config).solve(0).unwrap();
        assert_valid_path(&maze, 0, &solution.path.expect("corner is reachable"));
    }
}
