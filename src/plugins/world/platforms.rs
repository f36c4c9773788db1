//! Tile layout of the level and point queries against it.
//!
//! The layout is ASCII, top row first. World space has its origin at the
//! bottom-left corner of the map with +y up.
//!
//! | char | meaning                                   |
//! |------|-------------------------------------------|
//! | `#`  | floor / platform tile (`Layer::Floor`)    |
//! | `\|` | wall tile (`Layer::Wall`, turns monsters) |
//! | `S`  | monster spawner (not solid)               |
//! | other| empty                                     |

use bevy::prelude::*;

pub const LEVEL: [&str; 30] = [
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "...........########...........",
    "..............................",
    "..............................",
    "..............S...............",
    "..............................",
    "..######..............######..",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..........##########..........",
    "..............................",
    "..............................",
    "...S......................S...",
    "..............................",
    ".....######.........######....",
    "..............................",
    "...............#..............",
    "...............|..............",
    "...............|..............",
    "##############################",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Floor,
    Wall,
    Spawner,
}

impl Tile {
    fn from_char(c: char) -> Self {
        match c {
            '#' => Self::Floor,
            '|' => Self::Wall,
            'S' => Self::Spawner,
            _ => Self::Empty,
        }
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        matches!(self, Self::Floor | Self::Wall)
    }
}

/// Axis-aligned bounds of one tile in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl TileRect {
    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// "Is there a solid tile at this point?"
pub trait TileQuery {
    fn tile_at(&self, point: Vec2) -> Option<TileRect>;
}

/// A run of identical solid tiles on one row, merged into one collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRun {
    pub tile: Tile,
    pub rect: TileRect,
}

#[derive(Resource, Debug, Clone)]
pub struct PlatformMap {
    tile_size: f32,
    cols: usize,
    rows: usize,
    /// Row-major, row 0 at the bottom.
    tiles: Vec<Tile>,
}

impl PlatformMap {
    /// Rows shorter than the widest one are padded with empty tiles.
    pub fn from_layout(layout: &[&str], tile_size: f32) -> Self {
        let rows = layout.len();
        let cols = layout.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut tiles = vec![Tile::Empty; rows * cols];

        for (top_row, line) in layout.iter().enumerate() {
            let row = rows - 1 - top_row;
            for (col, c) in line.chars().enumerate() {
                tiles[row * cols + col] = Tile::from_char(c);
            }
        }

        Self { tile_size, cols, rows, tiles }
    }

    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.cols as f32 * self.tile_size
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    pub fn tile(&self, col: usize, row: usize) -> Tile {
        if col >= self.cols || row >= self.rows {
            return Tile::Empty;
        }
        self.tiles[row * self.cols + col]
    }

    pub fn rect(&self, col: usize, row: usize) -> TileRect {
        let min = Vec2::new(col as f32, row as f32) * self.tile_size;
        TileRect { min, max: min + Vec2::splat(self.tile_size) }
    }

    /// Horizontal runs of the same solid tile kind.
    pub fn solid_runs(&self) -> Vec<TileRun> {
        let mut runs = Vec::new();
        for row in 0..self.rows {
            let mut col = 0;
            while col < self.cols {
                let tile = self.tile(col, row);
                if !tile.is_solid() {
                    col += 1;
                    continue;
                }
                let start = col;
                while col < self.cols && self.tile(col, row) == tile {
                    col += 1;
                }
                let first = self.rect(start, row);
                let last = self.rect(col - 1, row);
                runs.push(TileRun { tile, rect: TileRect { min: first.min, max: last.max } });
            }
        }
        runs
    }

    /// Centres of every spawner cell.
    pub fn spawner_points(&self) -> Vec<Vec2> {
        let mut points = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.tile(col, row) == Tile::Spawner {
                    points.push(self.rect(col, row).center());
                }
            }
        }
        points
    }
}

impl TileQuery for PlatformMap {
    fn tile_at(&self, point: Vec2) -> Option<TileRect> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let col = (point.x / self.tile_size) as usize;
        let row = (point.y / self.tile_size) as usize;
        self.tile(col, row).is_solid().then(|| self.rect(col, row))
    }
}
