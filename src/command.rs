//! Commands understood by the robot and the parser that produces them.

use crate::orientation::Facing;
use crate::position::{INVALID_COORDINATE, Position};
use std::collections::HashMap;

/// Unvalidated payload of a PLACE command.
///
/// `facing` is `None` when the facing token was not recognised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub position: Position,
    pub facing: Option<Facing>,
}

impl Placement {
    pub fn new(x: i32, y: i32, facing: Option<Facing>) -> Self {
        Self {
            position: Position::new(x, y),
            facing,
        }
    }

    /// A placement is accepted only if the cell is on the grid and the facing is known.
    pub fn is_valid(&self) -> bool {
        self.position.is_valid() && self.facing.is_some()
    }
}

/// Keyword-level tag of a command, before any payload is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Place,
    Move,
    Left,
    Right,
    Report,
}

/// A fully parsed command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Put the robot on the table (`PLACE x,y,FACING`).
    Place(Placement),
    /// Step one cell forward (`MOVE`).
    Move,
    /// Quarter turn counter-clockwise (`LEFT`).
    Left,
    /// Quarter turn clockwise (`RIGHT`).
    Right,
    /// Emit the current pose (`REPORT`).
    Report,
    /// No-op. The token has no registered meaning.
    Ignore,
}

/// Splits a raw input line into tokens.
pub fn tokenize(line: &str) -> impl Iterator<Item = &str> {
    line.split_whitespace()
}

/// Turns tokens into [`Command`]s using a keyword table.
#[derive(Clone, Debug)]
pub struct CommandParser {
    keywords: HashMap<String, CommandKind>,
    case_insensitive: bool,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new(false).with_standard_keywords()
    }
}

impl CommandParser {
    /// Creates a parser with an empty keyword table.
    ///
    /// With `case_insensitive` set, keywords and facings match in any casing.
    pub fn new(case_insensitive: bool) -> Self {
        Self {
            keywords: HashMap::new(),
            case_insensitive,
        }
    }

    /// Registers the five standard keywords (builder pattern).
    pub fn with_standard_keywords(mut self) -> Self {
        let mappings = [
            ("PLACE", CommandKind::Place),
            ("MOVE", CommandKind::Move),
            ("LEFT", CommandKind::Left),
            ("RIGHT", CommandKind::Right),
            ("REPORT", CommandKind::Report),
        ];
        for (word, kind) in mappings {
            self.set_keyword(word, kind);
        }
        self
    }

    /// Maps `word` to `kind`, replacing any earlier mapping for the same word.
    pub fn set_keyword(&mut self, word: &str, kind: CommandKind) {
        self.keywords.insert(self.normalize(word), kind);
    }

    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Looks up the command kind for a single token.
    pub fn keyword(&self, token: &str) -> Option<CommandKind> {
        self.keywords.get(&self.normalize(token)).copied()
    }

    /// Parses a PLACE payload of the form `x,y,FACING`.
    ///
    /// Never fails: unreadable coordinates become [`INVALID_COORDINATE`] and an
    /// unknown facing becomes `None`, so the result simply does not validate.
    /// Anything other than exactly three fields is rejected the same way.
    pub fn parse_placement(&self, payload: &str) -> Placement {
        let fields: Vec<&str> = payload.split(',').map(str::trim).collect();
        let [x, y, facing] = fields.as_slice() else {
            return Placement::new(INVALID_COORDINATE, INVALID_COORDINATE, None);
        };
        Placement::new(
            parse_coordinate(x),
            parse_coordinate(y),
            Facing::from_token(facing, self.case_insensitive),
        )
    }

    /// Parses a whole line into commands.
    ///
    /// A PLACE keyword consumes the following token as its payload, whatever that
    /// token is. Unknown tokens become [`Command::Ignore`].
    pub fn parse_line(&self, line: &str) -> Vec<Command> {
        let mut commands = Vec::new();
        let mut tokens = tokenize(line);

        while let Some(token) = tokens.next() {
            let command = match self.keyword(token) {
                Some(CommandKind::Place) => {
                    Command::Place(self.parse_placement(tokens.next().unwrap_or_default()))
                }
                Some(kind) => Command::from_kind(kind),
                None => Command::Ignore,
            };
            commands.push(command);
        }

        commands
    }

    fn normalize(&self, word: &str) -> String {
        if self.case_insensitive {
            word.to_ascii_uppercase()
        } else {
            word.to_owned()
        }
    }
}

impl Command {
    /// Builds the payload-free command for `kind`. PLACE without a payload is
    /// mapped to an invalid placement.
    pub fn from_kind(kind: CommandKind) -> Self {
        match kind {
            CommandKind::Place => {
                Command::Place(Placement::new(INVALID_COORDINATE, INVALID_COORDINATE, None))
            }
            CommandKind::Move => Command::Move,
            CommandKind::Left => Command::Left,
            CommandKind::Right => Command::Right,
            CommandKind::Report => Command::Report,
        }
    }
}

fn parse_coordinate(field: &str) -> i32 {
    field.parse().unwrap_or(INVALID_COORDINATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_line() {
        let parser = CommandParser::default();
        let commands = parser.parse_line("PLACE 1,2,EAST MOVE LEFT RIGHT REPORT");
        assert_eq!(
            commands,
            vec![
                Command::Place(Placement::new(1, 2, Some(Facing::East))),
                Command::Move,
                Command::Left,
                Command::Right,
                Command::Report,
            ]
        );
    }

    #[test]
    fn unknown_tokens_are_ignored() {
        let parser = CommandParser::default();
        assert_eq!(
            parser.parse_line("JUMP move REPORT"),
            vec![Command::Ignore, Command::Ignore, Command::Report]
        );
    }

    #[test]
    fn non_numeric_coordinates_become_sentinel() {
        let parser = CommandParser::default();
        let placement = parser.parse_placement("a,3,NORTH");
        assert_eq!(placement.position.x(), INVALID_COORDINATE);
        assert_eq!(placement.position.y(), 3);
        assert!(!placement.is_valid());
    }

    #[test]
    fn malformed_payloads_do_not_validate() {
        let parser = CommandParser::default();
        for payload in ["", "1,2", "1,2,NORTH,EXTRA", "1,2,UP", "1.5,2,NORTH", ",,"] {
            assert!(
                !parser.parse_placement(payload).is_valid(),
                "`{payload}` should not validate"
            );
        }
    }

    #[test]
    fn trailing_place_has_invalid_payload() {
        let parser = CommandParser::default();
        let commands = parser.parse_line("PLACE");
        assert!(matches!(commands.as_slice(), [Command::Place(p)] if !p.is_valid()));
    }

    #[test]
    fn case_insensitive_parser_accepts_any_casing() {
        let parser = CommandParser::new(true).with_standard_keywords();
        assert_eq!(
            parser.parse_line("place 0,0,north Report"),
            vec![
                Command::Place(Placement::new(0, 0, Some(Facing::North))),
                Command::Report,
            ]
        );
    }
}
