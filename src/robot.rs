//! The robot state machine.
//!
//! A [`Robot`] starts unplaced and ignores everything except a valid PLACE.
//! Commands arrive either pre-combined as [`Command`]s ([`Robot::execute`]) or as
//! raw tokens where PLACE and its `x,y,FACING` payload are separate
//! ([`Robot::execute_tokens`]). Invalid input never errors; it is dropped and
//! the robot keeps whatever state it had.

use crate::command::{Command, CommandKind, CommandParser, Placement};
use crate::orientation::Facing;
use crate::position::Position;
use tracing::{debug, trace};

/// Where the robot stands and which way it points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pose {
    pub position: Position,
    pub facing: Facing,
}

impl Pose {
    /// Formats the pose as `X,Y,FACING`.
    pub fn report(&self) -> String {
        format!(
            "{},{},{}",
            self.position.x(),
            self.position.y(),
            self.facing
        )
    }
}

/// Lifecycle of a robot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RobotState {
    /// No valid PLACE seen yet.
    #[default]
    Unplaced,
    /// On the table.
    Placed(Pose),
    /// A bare PLACE token was read and the next token is its payload.
    /// Holds the pose to keep if that payload turns out to be invalid.
    AwaitingPlacement(Option<Pose>),
}

impl RobotState {
    fn pose(&self) -> Option<Pose> {
        match *self {
            RobotState::Unplaced => None,
            RobotState::Placed(pose) => Some(pose),
            RobotState::AwaitingPlacement(prior) => prior,
        }
    }
}

/// A single toy robot on the 6x6 table.
#[derive(Clone, Debug, Default)]
pub struct Robot {
    state: RobotState,
}

impl Robot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RobotState {
        self.state
    }

    /// The current pose, if the robot has ever been placed.
    pub fn pose(&self) -> Option<Pose> {
        self.state.pose()
    }

    pub fn position(&self) -> Option<Position> {
        self.pose().map(|p| p.position)
    }

    pub fn facing(&self) -> Option<Facing> {
        self.pose().map(|p| p.facing)
    }

    pub fn is_placed(&self) -> bool {
        self.pose().is_some()
    }

    /// Applies every command in order and returns the reports produced.
    pub fn execute<'a, I>(&mut self, commands: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a Command>,
    {
        commands
            .into_iter()
            .filter_map(|command| self.apply(command))
            .collect()
    }

    /// Applies one command. Returns `Some(report)` only for a REPORT issued
    /// while placed.
    ///
    /// A pending split-token PLACE is abandoned: its fallback pose is restored
    /// before the command runs.
    pub fn apply(&mut self, command: &Command) -> Option<String> {
        self.finish_tokens();

        match command {
            Command::Place(placement) => {
                self.place(placement);
                None
            }
            Command::Move => self.with_pose(command, |pose| {
                if !pose.position.step(pose.facing) {
                    debug!(pose = %pose.report(), "move would leave the table, ignoring");
                }
                None
            }),
            Command::Left => self.with_pose(command, |pose| {
                pose.facing.rotate_left();
                None
            }),
            Command::Right => self.with_pose(command, |pose| {
                pose.facing.rotate_right();
                None
            }),
            Command::Report => self.with_pose(command, |pose| Some(pose.report())),
            Command::Ignore => {
                debug!("unrecognised command, ignoring");
                None
            }
        }
    }

    /// Runs `f` on the pose if the robot is placed; otherwise drops `command`.
    fn with_pose<F>(&mut self, command: &Command, f: F) -> Option<String>
    where
        F: FnOnce(&mut Pose) -> Option<String>,
    {
        let RobotState::Placed(pose) = &mut self.state else {
            debug!(?command, "robot not placed, ignoring command");
            return None;
        };
        let output = f(pose);
        trace!(?command, pose = %pose.report(), "applied");
        output
    }

    /// Commits `placement` if it is valid. Returns whether the robot was placed.
    ///
    /// An invalid placement leaves the robot exactly as it was.
    pub fn place(&mut self, placement: &Placement) -> bool {
        let prior = self.pose();
        match placement.facing {
            Some(facing) if placement.is_valid() => {
                self.state = RobotState::Placed(Pose {
                    position: placement.position,
                    facing,
                });
                trace!(?placement, "placed");
                true
            }
            _ => {
                debug!(?placement, "invalid placement, ignoring");
                self.state = prior.map_or(RobotState::Unplaced, RobotState::Placed);
                false
            }
        }
    }

    /// Formats the current pose as `X,Y,FACING`, or `None` while unplaced.
    pub fn report(&self) -> Option<String> {
        match self.state {
            RobotState::Placed(pose) => Some(pose.report()),
            _ => None,
        }
    }

    /// Feeds raw tokens in order and returns the reports produced.
    ///
    /// The tokens form one complete sequence: a PLACE left without a payload at
    /// the end is dropped, see [`Robot::finish_tokens`].
    pub fn execute_tokens<'a, I>(&mut self, tokens: I, parser: &CommandParser) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let reports = tokens
            .into_iter()
            .filter_map(|token| self.feed_token(token, parser))
            .collect();
        self.finish_tokens();
        reports
    }

    /// Abandons a PLACE still waiting for its payload, restoring the pose it
    /// would have fallen back to. No-op in any other state.
    pub fn finish_tokens(&mut self) {
        if let RobotState::AwaitingPlacement(prior) = self.state {
            debug!("PLACE without payload, ignoring");
            self.state = prior.map_or(RobotState::Unplaced, RobotState::Placed);
        }
    }

    /// Feeds a single raw token.
    ///
    /// A PLACE keyword moves the robot into [`RobotState::AwaitingPlacement`];
    /// the next token, whatever it is, is then parsed as the PLACE payload.
    pub fn feed_token(&mut self, token: &str, parser: &CommandParser) -> Option<String> {
        if let RobotState::AwaitingPlacement(prior) = self.state {
            self.state = prior.map_or(RobotState::Unplaced, RobotState::Placed);
            self.place(&parser.parse_placement(token));
            return None;
        }

        match parser.keyword(token) {
            Some(CommandKind::Place) => {
                self.state = RobotState::AwaitingPlacement(self.pose());
                None
            }
            Some(kind) => self.apply(&Command::from_kind(kind)),
            None => self.apply(&Command::Ignore),
        }
    }
}
