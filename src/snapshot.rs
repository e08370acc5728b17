//! Board snapshot text format.
//!
//! ```text
//! <rows> <cols>
//! <rows lines of 4 * cols characters, one 4-char group per tile>
//! <round>
//! <R|B>
//! ```
//!
//! A tile group may hold `#` (wall), `R`/`B` (player) and any of the
//! projectile glyphs `^ v < >`. The last line names the player we are and
//! may be omitted, in which case it is red.

use anyhow::{anyhow, bail, ensure, Context, Result};
use ndarray::{Array2, ArrayView2};
use std::fmt;
use std::str::FromStr;

use crate::actions::{Direction, ALL_DIRECTIONS};
use crate::grid::{GridDims, Walls, CELL_FREE, CELL_WALL};
use crate::game_state::GameState;
use crate::projectiles::ProjectileField;

/// Characters per tile in the full text format
pub const TILE_WIDTH: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerColor {
    Red,
    Blue,
}

impl PlayerColor {
    pub fn glyph(self) -> char {
        match self {
            PlayerColor::Red => 'R',
            PlayerColor::Blue => 'B',
        }
    }

    pub fn other(self) -> Self {
        match self {
            PlayerColor::Red => PlayerColor::Blue,
            PlayerColor::Blue => PlayerColor::Red,
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerColor::Red => write!(f, "red"),
            PlayerColor::Blue => write!(f, "blue"),
        }
    }
}

impl FromStr for PlayerColor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "R" => Ok(PlayerColor::Red),
            "B" => Ok(PlayerColor::Blue),
            other => bail!("Expected R or B as the player, got {:?}", other),
        }
    }
}

fn glyph_direction(c: char) -> Option<Direction> {
    ALL_DIRECTIONS.into_iter().find(|dir| dir.glyph() == c)
}

/// A parsed board as a player receives it
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    tiles: Array2<i8>,
    projectiles: Vec<(usize, Direction)>,
    red: usize,
    blue: usize,
    round: u32,
    perspective: PlayerColor,
}

impl Snapshot {
    /// Assemble a snapshot from its parts, checking the same things the
    /// parser does
    pub fn new(
        tiles: Array2<i8>,
        projectiles: Vec<(usize, Direction)>,
        red: usize,
        blue: usize,
        round: u32,
        perspective: PlayerColor,
    ) -> Result<Self> {
        ensure!(
            tiles.nrows() >= 3 && tiles.ncols() >= 3,
            "Board too small: {}x{}",
            tiles.nrows(),
            tiles.ncols()
        );
        let walls = Walls::from_tiles(&tiles.view())?;
        let dims = walls.dims();
        for (name, cell) in [("Red player", red), ("Blue player", blue)] {
            ensure!(cell < dims.num_cells(), "{} is outside the board", name);
            let (row, col) = dims.coords(cell);
            ensure!(!walls.is_wall(cell), "{} stands on a wall at ({}, {})", name, row, col);
        }
        ensure!(red != blue, "Both players share one cell");
        for &(cell, dir) in &projectiles {
            ensure!(cell < dims.num_cells(), "Projectile is outside the board");
            let (row, col) = dims.coords(cell);
            ensure!(
                !walls.is_wall(cell),
                "Projectile {} is inside a wall at ({}, {})",
                dir.glyph(),
                row,
                col
            );
        }
        Ok(Self {
            tiles,
            projectiles,
            red,
            blue,
            round,
            perspective,
        })
    }

    pub fn dims(&self) -> GridDims {
        GridDims::new(self.tiles.nrows(), self.tiles.ncols())
    }

    pub fn tiles(&self) -> ArrayView2<'_, i8> {
        self.tiles.view()
    }

    pub fn projectiles(&self) -> &[(usize, Direction)] {
        &self.projectiles
    }

    pub fn position(&self, color: PlayerColor) -> usize {
        match color {
            PlayerColor::Red => self.red,
            PlayerColor::Blue => self.blue,
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn perspective(&self) -> PlayerColor {
        self.perspective
    }

    pub fn walls(&self) -> Walls {
        let dims = self.dims();
        let cells = self
            .tiles
            .indexed_iter()
            .filter(|(_, &tile)| tile == CELL_WALL)
            .map(|((row, col), _)| dims.index(row, col));
        Walls::from_cells(dims, cells)
    }

    pub fn projectile_field(&self) -> ProjectileField {
        ProjectileField::from_list(self.dims().num_cells(), self.projectiles.iter().copied())
    }

    /// Searchable state with the perspective player as hero
    pub fn game_state<'w>(&self, walls: &'w Walls, max_round: u32) -> GameState<'w> {
        let hero = self.position(self.perspective);
        let enemy = self.position(self.perspective.other());
        GameState::new(
            walls,
            self.projectile_field(),
            hero,
            enemy,
            max_round.saturating_sub(self.round),
        )
    }
}

struct BoardRows {
    tiles: Array2<i8>,
    projectiles: Vec<(usize, Direction)>,
    red: Option<usize>,
    blue: Option<usize>,
}

fn parse_rows<'a, I>(dims: GridDims, lines: &mut I) -> Result<BoardRows>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut board = BoardRows {
        tiles: Array2::from_elem((dims.rows(), dims.cols()), CELL_FREE),
        projectiles: Vec::new(),
        red: None,
        blue: None,
    };

    for row in 0..dims.rows() {
        let (line_no, line) = lines
            .next()
            .ok_or_else(|| anyhow!("Expected {} board rows, found {}", dims.rows(), row))?;
        for (i, c) in line.chars().enumerate() {
            if c == ' ' {
                continue;
            }
            let col = i / TILE_WIDTH;
            ensure!(
                col < dims.cols(),
                "Line {}: character {:?} past the last column",
                line_no,
                c
            );
            let cell = dims.index(row, col);
            match c {
                '#' => board.tiles[[row, col]] = CELL_WALL,
                'R' | 'B' => {
                    let slot = if c == 'R' { &mut board.red } else { &mut board.blue };
                    ensure!(slot.is_none(), "Line {}: duplicate player {}", line_no, c);
                    *slot = Some(cell);
                }
                _ => match glyph_direction(c) {
                    Some(dir) => board.projectiles.push((cell, dir)),
                    None => bail!("Line {}: unexpected character {:?}", line_no, c),
                },
            }
        }
    }
    Ok(board)
}

impl FromStr for Snapshot {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .enumerate()
            .map(|(i, line)| (i + 1, line));

        let (_, header) = lines.next().context("Empty board")?;
        let mut dims = header.split_whitespace().map(str::parse::<usize>);
        let (rows, cols) = match (dims.next(), dims.next(), dims.next()) {
            (Some(Ok(rows)), Some(Ok(cols)), None) => (rows, cols),
            _ => bail!("Bad board header {:?}, expected \"<rows> <cols>\"", header),
        };
        ensure!(rows >= 3 && cols >= 3, "Board too small: {}x{}", rows, cols);

        let BoardRows {
            tiles,
            mut projectiles,
            red,
            blue,
        } = parse_rows(GridDims::new(rows, cols), &mut lines)?;
        let red = red.context("Red player missing from the board")?;
        let blue = blue.context("Blue player missing from the board")?;

        let mut rest = lines.map(|(_, line)| line.trim()).filter(|line| !line.is_empty());
        let round_line = rest.next().context("Missing round number")?;
        let round = round_line
            .parse::<u32>()
            .with_context(|| format!("Bad round number {:?}", round_line))?;
        let perspective = match rest.next() {
            Some(line) => line.parse()?,
            None => PlayerColor::Red,
        };

        projectiles.sort_by_key(|&(cell, dir)| (dir.index(), cell));
        projectiles.dedup();
        Snapshot::new(tiles, projectiles, red, blue, round, perspective)
    }
}
