//! Rectangular ASCII mazes.
//!
//! Alphabet:
//! - `#` or `*`: wall
//! - `.` or space: open cell
//! - `S` or `@`: the start cell (exactly one)
//! - `G` or `$`: a goal cell (any number)
//!
//! Every non-wall character becomes a cell, numbered in row-major order.
//! Open cells are joined to their open 4-neighbours.

use super::{Cell, CsrMaze, Maze, PlayerId};
use crate::error::MazeParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Wall,
    Open,
    Start,
    Goal,
}

impl Tile {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '#' | '*' => Some(Self::Wall),
            '.' | ' ' => Some(Self::Open),
            'S' | '@' => Some(Self::Start),
            'G' | '$' => Some(Self::Goal),
            _ => None,
        }
    }

    fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Open => '.',
            Self::Start => 'S',
            Self::Goal => 'G',
        }
    }
}

/// A grid maze backed by a [`CsrMaze`].
#[derive(Debug)]
pub struct GridMaze {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    /// Cell id per tile, `None` for walls.
    cell_of: Vec<Option<Cell>>,
    /// Tile index per cell.
    tile_of: Vec<usize>,
    start: Cell,
    inner: CsrMaze,
}

impl GridMaze {
    /// Parses a maze from its ASCII form.
    ///
    /// Trailing line breaks are ignored; every row must have the width of the first.
    pub fn parse(text: &str) -> Result<Self, MazeParseError> {
        let rows: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        let rows = match rows.iter().rposition(|r| !r.is_empty()) {
            Some(last) => &rows[..=last],
            None => return Err(MazeParseError::Empty),
        };

        let width = rows[0].chars().count();
        let height = rows.len();
        let mut tiles = Vec::with_capacity(width * height);
        let mut start_tile = None;

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MazeParseError::RaggedRow { row, expected: width, found });
            }
            for (col, ch) in line.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or(MazeParseError::UnknownChar { ch, row, col })?;
                if tile == Tile::Start {
                    if start_tile.is_some() {
                        return Err(MazeParseError::MultipleStarts { row, col });
                    }
                    start_tile = Some(tiles.len());
                }
                tiles.push(tile);
            }
        }
        let start_tile = start_tile.ok_or(MazeParseError::MissingStart)?;

        let mut cell_of = vec![None; tiles.len()];
        let mut tile_of = Vec::new();
        for (t, tile) in tiles.iter().enumerate() {
            if *tile != Tile::Wall {
                cell_of[t] = Some(tile_of.len());
                tile_of.push(t);
            }
        }

        let mut adjacency = vec![Vec::with_capacity(4); tile_of.len()];
        let mut goals = Vec::new();
        for (cell, &t) in tile_of.iter().enumerate() {
            if tiles[t] == Tile::Goal {
                goals.push(cell);
            }
            let (row, col) = (t / width, t % width);
            let up = row.checked_sub(1).map(|r| r * width + col);
            let down = (row + 1 < height).then(|| (row + 1) * width + col);
            let left = col.checked_sub(1).map(|c| row * width + c);
            let right = (col + 1 < width).then(|| row * width + col + 1);
            for n in [up, down, left, right].into_iter().flatten() {
                if let Some(nc) = cell_of[n] {
                    adjacency[cell].push(nc);
                }
            }
        }

        let start = cell_of[start_tile].ok_or(MazeParseError::MissingStart)?;
        Ok(Self {
            width,
            height,
            tiles,
            cell_of,
            tile_of,
            start,
            inner: CsrMaze::from_adjacency(&adjacency, &goals),
        })
    }

    /// The start cell.
    pub fn start(&self) -> Cell {
        self.start
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The cell at `(row, col)`, or `None` for walls and positions off the grid.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cell_of[row * self.width + col]
    }

    /// The `(row, col)` of `cell`.
    pub fn coords(&self, cell: Cell) -> Option<(usize, usize)> {
        self.tile_of.get(cell).map(|&t| (t / self.width, t % self.width))
    }

    /// The underlying CSR maze.
    pub fn as_csr(&self) -> &CsrMaze {
        &self.inner
    }

    /// Draws the maze with `path` overlaid as `o`, keeping start and goal markers.
    pub fn render_path(&self, path: &[Cell]) -> String {
        let mut glyphs: Vec<char> = self.tiles.iter().map(|t| t.glyph()).collect();
        for &cell in path {
            if let Some(&t) = self.tile_of.get(cell) {
                if self.tiles[t] == Tile::Open {
                    glyphs[t] = 'o';
                }
            }
        }
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in glyphs.chunks(self.width) {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

impl Maze for GridMaze {
    fn cell_count(&self) -> usize {
        self.inner.cell_count()
    }

    fn neighbors(&self, cell: Cell) -> &[Cell] {
        self.inner.neighbors(cell)
    }

    fn has_goal(&self, cell: Cell) -> bool {
        self.inner.has_goal(cell)
    }

    fn new_player(&self, cell: Cell) -> PlayerId {
        self.inner.new_player(cell)
    }

    fn move_player(&self, player: PlayerId, cell: Cell) {
        self.inner.move_player(player, cell);
    }
}
