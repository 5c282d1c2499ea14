use std::fs;
use std::path::PathBuf;

use amazed::{ForkJoinSolver, GridMaze, Maze, SolverConfig, TracingObserver, VisitPolicy};
use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "amazed")]
#[command(about = "Solve an ASCII maze with a fork/join depth-first search", long_about = None)]
struct Cli {
    /// Maze file (`#` wall, `.` open, `S` start, `G` goal)
    maze: PathBuf,

    /// JSON solver configuration; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sequential expansions before a task may fork
    #[arg(long)]
    fork_after: Option<usize>,

    /// Minimum unvisited neighbours for a fork point
    #[arg(long)]
    min_branches: Option<usize>,

    /// Worker threads (default: rayon's choice)
    #[arg(long)]
    threads: Option<usize>,

    /// Cap on concurrently live forked tasks
    #[arg(long)]
    max_tasks: Option<usize>,

    /// Deepest nesting of fork/join blocks
    #[arg(long)]
    max_fork_depth: Option<usize>,

    /// Use check-then-insert visiting (allows duplicate expansions)
    #[arg(long, default_value_t = false)]
    race: bool,

    /// Print a JSON report instead of the rendered maze
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    maze: &'a str,
    cells: usize,
    start: usize,
    config: &'a SolverConfig,
    path: Option<&'a [usize]>,
    coords: Option<Vec<(usize, usize)>>,
    stats: amazed::SearchStats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = load_config(&cli)?;
    let text = fs::read_to_string(&cli.maze)
        .with_context(|| format!("Failed to read maze file {}", cli.maze.display()))?;
    let maze = GridMaze::parse(&text)
        .with_context(|| format!("Failed to parse maze file {}", cli.maze.display()))?;

    info!(
        cells = maze.cell_count(),
        width = maze.width(),
        height = maze.height(),
        "Maze loaded"
    );

    let observer = TracingObserver;
    let solution = ForkJoinSolver::new(&maze, config.clone())
        .with_observer(&observer)
        .solve(maze.start())
        .context("Search failed")?;

    info!(
        found = solution.is_found(),
        expansions = solution.stats.expansions,
        forks = solution.stats.forks,
        "Search finished"
    );

    if cli.json {
        let path = solution.path.as_deref();
        let maze_name = cli.maze.to_string_lossy();
        let report = Report {
            maze: &maze_name,
            cells: maze.cell_count(),
            start: maze.start(),
            config: &config,
            path,
            coords: path.map(|p| p.iter().filter_map(|&c| maze.coords(c)).collect()),
            stats: solution.stats,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match &solution.path {
        Some(path) => {
            print!("{}", maze.render_path(path));
            println!("Path length: {}", path.len());
        }
        None => println!("No path from start to any goal."),
    }
    let stats = &solution.stats;
    println!(
        "Expanded {} cells ({} duplicate), {} forks, {} tasks, peak {} live",
        stats.expansions, stats.duplicate_expansions, stats.forks, stats.tasks_spawned, stats.peak_live_tasks
    );

    Ok(())
}

fn load_config(cli: &Cli) -> Result<SolverConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            SolverConfig::from_json(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => SolverConfig::default(),
    };

    if let Some(n) = cli.fork_after {
        config.fork_after = n;
    }
    if let Some(n) = cli.min_branches {
        config.min_branches = n;
    }
    if let Some(n) = cli.threads {
        config.threads = Some(n);
    }
    if let Some(n) = cli.max_tasks {
        config.max_live_tasks = Some(n);
    }
    if let Some(n) = cli.max_fork_depth {
        config.max_fork_depth = n;
    }
    if cli.race {
        config.visit_policy = VisitPolicy::CheckThenInsert;
    }

    config.validate().context("Invalid solver options")?;
    Ok(config)
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("amazed=debug,warn")
        } else {
            EnvFilter::new("amazed=info,warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
