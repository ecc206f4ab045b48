//! # toy-robot
//!
//! A toy robot on a fixed 6x6 table, driven by `PLACE x,y,FACING`, `MOVE`,
//! `LEFT`, `RIGHT` and `REPORT` commands.
//!
//! The [`Robot`] state machine validates and applies commands without doing any
//! I/O: invalid placements, moves off the table and unknown commands are
//! silently dropped. [`CommandParser`] turns text into commands, and
//! [`Simulator`] runs whole lines and formats reports as `Output: X,Y,FACING`.

pub mod command;
pub mod error;
pub mod orientation;
pub mod position;
pub mod robot;
pub mod simulator;

pub use command::*;
pub use error::*;
pub use orientation::*;
pub use position::*;
pub use robot::*;
pub use simulator::*;
