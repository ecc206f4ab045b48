//! Grid coordinates and bounded stepping.

use crate::orientation::Facing;
use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Lowest valid cell on either axis.
pub const GRID_MIN: i32 = 0;

/// Highest valid cell on either axis. The table is a fixed 6x6 square.
pub const GRID_MAX: i32 = 5;

/// Value substituted for coordinates that could not be read as integers.
///
/// Always outside `GRID_MIN..=GRID_MAX`, so a placement built from it is rejected.
pub const INVALID_COORDINATE: i32 = i32::MIN;

/// A cell on the table.
///
/// Construction never validates; call [`Position::is_valid`] before committing
/// a candidate to a robot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    cell: IVec2,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            cell: IVec2::new(x, y),
        }
    }

    pub fn x(&self) -> i32 {
        self.cell.x
    }

    pub fn y(&self) -> i32 {
        self.cell.y
    }

    /// Returns `true` if both coordinates lie within the grid (bounds inclusive).
    pub fn is_valid(&self) -> bool {
        Self::in_bounds(self.cell)
    }

    /// Moves one cell towards `facing` unless that would leave the grid.
    ///
    /// Returns whether the position changed. Walking off an edge is a silent no-op.
    pub fn step(&mut self, facing: Facing) -> bool {
        let target = self.cell + facing.delta();
        if !Self::in_bounds(target) {
            return false;
        }
        self.cell = target;
        true
    }

    fn in_bounds(cell: IVec2) -> bool {
        cell.cmpge(IVec2::splat(GRID_MIN)).all() && cell.cmple(IVec2::splat(GRID_MAX)).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_valid() {
        for (x, y) in [(0, 0), (0, 5), (5, 0), (5, 5)] {
            assert!(Position::new(x, y).is_valid(), "({x}, {y}) should be on the grid");
        }
    }

    #[test]
    fn outside_cells_are_invalid() {
        for (x, y) in [(-1, 0), (0, -1), (6, 0), (0, 6), (INVALID_COORDINATE, 2)] {
            assert!(!Position::new(x, y).is_valid(), "({x}, {y}) should be rejected");
        }
    }

    #[test]
    fn step_follows_facing() {
        let mut pos = Position::new(2, 2);
        assert!(pos.step(Facing::North));
        assert_eq!((pos.x(), pos.y()), (2, 3));
        assert!(pos.step(Facing::East));
        assert_eq!((pos.x(), pos.y()), (3, 3));
        assert!(pos.step(Facing::South));
        assert_eq!((pos.x(), pos.y()), (3, 2));
        assert!(pos.step(Facing::West));
        assert_eq!((pos.x(), pos.y()), (2, 2));
    }

    #[test]
    fn step_stops_at_edge() {
        let mut pos = Position::new(5, 0);
        assert!(!pos.step(Facing::East));
        assert!(!pos.step(Facing::South));
        assert_eq!(pos, Position::new(5, 0));
    }

    #[test]
    fn serde_round_trip() {
        let pos = Position::new(4, 1);
        let json = serde_json::to_string(&pos).unwrap();
        assert_eq!(json, r#"{"cell":[4,1]}"#);
        assert_eq!(serde_json::from_str::<Position>(&json).unwrap(), pos);
    }
}
