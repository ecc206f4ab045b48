//! Facing direction and quarter-turn rotation.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The cardinal direction the robot points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Facing {
    North,
    East,
    South,
    West,
}

/// Returned by [`Facing::from_str`] for anything other than the four canonical names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown facing `{0}`, expected NORTH, EAST, SOUTH or WEST")]
pub struct ParseFacingError(pub String);

impl Facing {
    /// All facings in clockwise order. Rotation walks this array.
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// Reads a facing token. Upper-case names are always accepted; any casing is
    /// accepted when `case_insensitive` is set. Returns `None` for anything else.
    pub fn from_token(token: &str, case_insensitive: bool) -> Option<Self> {
        Self::ALL.into_iter().find(|facing| {
            if case_insensitive {
                facing.as_str().eq_ignore_ascii_case(token)
            } else {
                facing.as_str() == token
            }
        })
    }

    /// Canonical upper-case name, as used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Facing::North => "NORTH",
            Facing::East => "EAST",
            Facing::South => "SOUTH",
            Facing::West => "WEST",
        }
    }

    /// Quarter turn counter-clockwise (NORTH -> WEST -> SOUTH -> EAST -> NORTH).
    pub fn rotate_left(&mut self) {
        *self = self.turned(-1);
    }

    /// Quarter turn clockwise (NORTH -> EAST -> SOUTH -> WEST -> NORTH).
    pub fn rotate_right(&mut self) {
        *self = self.turned(1);
    }

    /// Unit offset of one step in this direction. North is +Y, East is +X.
    pub fn delta(self) -> IVec2 {
        match self {
            Facing::North => IVec2::Y,
            Facing::East => IVec2::X,
            Facing::South => IVec2::NEG_Y,
            Facing::West => IVec2::NEG_X,
        }
    }

    fn turned(self, quarters: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let idx = self as isize;
        Self::ALL[(idx + quarters).rem_euclid(len) as usize]
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facing {
    type Err = ParseFacingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s, false).ok_or_else(|| ParseFacingError(s.to_owned()))
    }
}
