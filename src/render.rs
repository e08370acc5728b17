//! Text rendering of a board in the snapshot format.
//!
//! Full mode writes four characters per tile: slot 0 holds the wall or
//! player glyph and the up projectile, slots 1-3 hold down, left and right.
//! Later writes win a slot. Nice mode keeps one character per tile: the last
//! non-blank slot.

use std::fmt;

use crate::actions::Direction;
use crate::grid::Walls;
use crate::projectiles::ProjectileField;
use crate::snapshot::{PlayerColor, Snapshot, TILE_WIDTH};

fn slot(dir: Direction) -> usize {
    match dir {
        Direction::Up => 0,
        Direction::Down => 1,
        Direction::Left => 2,
        Direction::Right => 3,
    }
}

/// Everything a rendered board shows
#[derive(Clone, Copy, Debug)]
pub struct BoardView<'a> {
    pub walls: &'a Walls,
    pub projectiles: &'a ProjectileField,
    pub red: usize,
    pub blue: usize,
}

impl BoardView<'_> {
    fn tile_slots(&self) -> Vec<[char; TILE_WIDTH]> {
        let num_cells = self.walls.dims().num_cells();
        let mut tiles = vec![[' '; TILE_WIDTH]; num_cells];
        for &wall in self.walls.indices() {
            tiles[wall][0] = '#';
        }
        tiles[self.red][0] = PlayerColor::Red.glyph();
        tiles[self.blue][0] = PlayerColor::Blue.glyph();
        for (cell, dir) in self.projectiles.to_list() {
            tiles[cell][slot(dir)] = dir.glyph();
        }
        tiles
    }

    /// Board rows, each terminated by a newline
    pub fn render_rows(&self, nice: bool) -> String {
        let cols = self.walls.dims().cols();
        let mut out = String::new();
        for row in self.tile_slots().chunks(cols) {
            for tile in row {
                if nice {
                    out.push(tile.iter().rev().copied().find(|&c| c != ' ').unwrap_or(' '));
                } else {
                    out.extend(tile.iter());
                }
            }
            out.push('\n');
        }
        out
    }

    /// Header, rows and round line, plus the player line when given
    pub fn render(&self, round: u32, perspective: Option<PlayerColor>, nice: bool) -> String {
        let dims = self.walls.dims();
        let mut out = format!("{} {}\n", dims.rows(), dims.cols());
        out.push_str(&self.render_rows(nice));
        out.push_str(&format!("{}\n", round));
        if let Some(color) = perspective {
            out.push(color.glyph());
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let walls = self.walls();
        let projectiles = self.projectile_field();
        let view = BoardView {
            walls: &walls,
            projectiles: &projectiles,
            red: self.position(PlayerColor::Red),
            blue: self.position(PlayerColor::Blue),
        };
        f.write_str(&view.render(self.round(), Some(self.perspective()), false))
    }
}

/// Wrap player glyphs in ANSI colours for terminal output
pub fn colorize(board: &str) -> String {
    board
        .replace('R', "\x1b[91mR\x1b[0m")
        .replace('B', "\x1b[94mB\x1b[0m")
}
