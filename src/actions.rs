//! Directions and the nine per-round actions.
//!
//! Move codes match the integers the game runner expects on stdout:
//! 0-3 go up/down/left/right, 4-7 shoot up/down/left/right, 8 wait.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    /// Panics on anything outside 0..4; callers only ever pass `code % 4`.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Left,
            3 => Direction::Right,
            _ => panic!("Invalid direction index: {}", index),
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Opposite heading: up<->down, left<->right
    #[inline]
    pub fn flip(self) -> Self {
        Self::from_index(self.index() ^ 1)
    }

    /// (row, col) delta of one step in this direction
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Projectile glyph used by the board text format
    pub fn glyph(self) -> char {
        match self {
            Direction::Up => '^',
            Direction::Down => 'v',
            Direction::Left => '<',
            Direction::Right => '>',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Go(Direction),
    Shoot(Direction),
    Wait,
}

/// Canonical move order used by move generation and the search
pub const ALL_MOVES: [Move; 9] = [
    Move::Go(Direction::Up),
    Move::Go(Direction::Down),
    Move::Go(Direction::Left),
    Move::Go(Direction::Right),
    Move::Shoot(Direction::Up),
    Move::Shoot(Direction::Down),
    Move::Shoot(Direction::Left),
    Move::Shoot(Direction::Right),
    Move::Wait,
];

pub const WAIT_CODE: u8 = 8;

impl Move {
    /// Decode a move from its integer code (0..=8)
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0..=3 => Some(Move::Go(Direction::from_index(code as usize % 4))),
            4..=7 => Some(Move::Shoot(Direction::from_index(code as usize % 4))),
            WAIT_CODE => Some(Move::Wait),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Move::Go(dir) => dir.index() as u8,
            Move::Shoot(dir) => 4 + dir.index() as u8,
            Move::Wait => WAIT_CODE,
        }
    }

    /// Direction of a go or shoot move
    pub fn direction(self) -> Option<Direction> {
        match self {
            Move::Go(dir) | Move::Shoot(dir) => Some(dir),
            Move::Wait => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Go(dir) => write!(f, "go-{:?}", dir),
            Move::Shoot(dir) => write!(f, "shoot-{:?}", dir),
            Move::Wait => write!(f, "wait"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_canonical_order() {
        for (code, mv) in ALL_MOVES.iter().enumerate() {
            assert_eq!(mv.code() as usize, code);
            assert_eq!(Move::from_code(code as u8), Some(*mv));
        }
        assert_eq!(Move::from_code(9), None);
    }

    #[test]
    fn test_direction_is_code_mod_four() {
        for mv in ALL_MOVES.iter().filter(|m| **m != Move::Wait) {
            let dir = mv.direction().unwrap();
            assert_eq!(dir.index(), mv.code() as usize % 4);
        }
        assert_eq!(Move::Wait.direction(), None);
    }

    #[test]
    fn test_flip_is_involutive() {
        for dir in ALL_DIRECTIONS {
            assert_ne!(dir.flip(), dir);
            assert_eq!(dir.flip().flip(), dir);
            let (dr, dc) = dir.delta();
            let (fr, fc) = dir.flip().delta();
            assert_eq!((dr + fr, dc + fc), (0, 0));
        }
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_direction_panics() {
        Direction::from_index(4);
    }
}
