//! UCI command parsing.

use crate::UciError;
use std::str::FromStr;

/// Commands sent from GUI to engine.
#[derive(Debug, Clone, PartialEq)]
pub enum GuiCommand {
    /// Initialize UCI mode.
    Uci,
    /// Check if engine is ready.
    IsReady,
    /// The next position starts a new game.
    UciNewGame,
    /// Set up position.
    Position {
        fen: Option<String>,
        moves: Vec<String>,
    },
    /// Start calculating.
    Go(GoOptions),
    /// Print the current position (non-standard, `d`).
    Display,
    /// Stop calculating.
    Stop,
    /// Quit the engine.
    Quit,
    /// Unknown command (for forward compatibility).
    Unknown(String),
}

/// Options for the `go` command.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GoOptions {
    /// Search for exactly this time in milliseconds.
    pub movetime: Option<u64>,
    /// Search to this depth.
    pub depth: Option<u32>,
    /// White time remaining in milliseconds.
    pub wtime: Option<u64>,
    /// Black time remaining in milliseconds.
    pub btime: Option<u64>,
    /// White increment per move in milliseconds.
    pub winc: Option<u64>,
    /// Black increment per move in milliseconds.
    pub binc: Option<u64>,
    /// Moves to go until next time control.
    pub movestogo: Option<u32>,
    /// Search indefinitely until `stop`.
    pub infinite: bool,
    /// Count leaf nodes to this depth instead of searching (non-standard).
    pub perft: Option<u32>,
}

impl GuiCommand {
    /// Parse a UCI command string.
    pub fn parse(input: &str) -> Result<Self, UciError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        match parts.next().unwrap_or("") {
            "uci" => Ok(GuiCommand::Uci),
            "isready" => Ok(GuiCommand::IsReady),
            "ucinewgame" => Ok(GuiCommand::UciNewGame),
            "d" => Ok(GuiCommand::Display),
            "stop" => Ok(GuiCommand::Stop),
            "quit" => Ok(GuiCommand::Quit),
            "position" => Self::parse_position(parts),
            "go" => Ok(GuiCommand::Go(Self::parse_go(parts))),
            _ => Ok(GuiCommand::Unknown(input.to_string())),
        }
    }

    /// Parses `startpos [moves ...]` or `fen <fields> [moves ...]`.
    fn parse_position<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<Self, UciError> {
        let fen = match parts.next() {
            Some("startpos") => {
                // skip ahead to the move list, if any
                parts.by_ref().find(|&p| p == "moves");
                None
            }
            Some("fen") => {
                let fields: Vec<&str> = parts.by_ref().take_while(|&p| p != "moves").collect();
                if fields.is_empty() {
                    return Err(UciError::ParseError("missing FEN after 'fen'".to_string()));
                }
                Some(fields.join(" "))
            }
            Some(other) => {
                return Err(UciError::ParseError(format!(
                    "Expected 'startpos' or 'fen', got '{}'",
                    other
                )));
            }
            None => {
                return Err(UciError::ParseError(
                    "Expected 'startpos' or 'fen'".to_string(),
                ));
            }
        };

        let moves = parts.map(str::to_string).collect();
        Ok(GuiCommand::Position { fen, moves })
    }

    /// Unknown keywords and unparsable values are skipped.
    fn parse_go<'a>(mut parts: impl Iterator<Item = &'a str>) -> GoOptions {
        let mut opts = GoOptions::default();
        while let Some(keyword) = parts.next() {
            match keyword {
                "movetime" => opts.movetime = next_number(&mut parts),
                "depth" => opts.depth = next_number(&mut parts),
                "wtime" => opts.wtime = next_number(&mut parts),
                "btime" => opts.btime = next_number(&mut parts),
                "winc" => opts.winc = next_number(&mut parts),
                "binc" => opts.binc = next_number(&mut parts),
                "movestogo" => opts.movestogo = next_number(&mut parts),
                "perft" => opts.perft = next_number(&mut parts),
                "infinite" => opts.infinite = true,
                _ => {}
            }
        }
        opts
    }
}

fn next_number<'a, T: FromStr>(parts: &mut impl Iterator<Item = &'a str>) -> Option<T> {
    parts.next().and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uci() {
        assert_eq!(GuiCommand::parse("uci").unwrap(), GuiCommand::Uci);
    }

    #[test]
    fn parse_isready() {
        assert_eq!(GuiCommand::parse("isready").unwrap(), GuiCommand::IsReady);
    }

    #[test]
    fn parse_simple_commands() {
        assert_eq!(
            GuiCommand::parse("ucinewgame\n").unwrap(),
            GuiCommand::UciNewGame
        );
        assert_eq!(GuiCommand::parse("d").unwrap(), GuiCommand::Display);
        assert_eq!(GuiCommand::parse("  stop ").unwrap(), GuiCommand::Stop);
        assert_eq!(GuiCommand::parse("quit").unwrap(), GuiCommand::Quit);
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            GuiCommand::parse("setoption name Hash value 16").unwrap(),
            GuiCommand::Unknown("setoption name Hash value 16".to_string())
        );
        assert_eq!(
            GuiCommand::parse("").unwrap(),
            GuiCommand::Unknown(String::new())
        );
    }

    #[test]
    fn parse_position_startpos() {
        let cmd = GuiCommand::parse("position startpos").unwrap();
        assert_eq!(
            cmd,
            GuiCommand::Position {
                fen: None,
                moves: vec![]
            }
        );
    }

    #[test]
    fn parse_position_startpos_with_moves() {
        let cmd = GuiCommand::parse("position startpos moves e2e4 e7e5").unwrap();
        assert_eq!(
            cmd,
            GuiCommand::Position {
                fen: None,
                moves: vec!["e2e4".to_string(), "e7e5".to_string()]
            }
        );
    }

    #[test]
    fn parse_position_fen() {
        let cmd = GuiCommand::parse(
            "position fen rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        )
        .unwrap();
        assert_eq!(
            cmd,
            GuiCommand::Position {
                fen: Some(
                    "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1".to_string()
                ),
                moves: vec![]
            }
        );
    }

    #[test]
    fn parse_position_fen_with_moves() {
        let cmd =
            GuiCommand::parse("position fen 4k3/8/8/8/8/8/4P3/4K3 w - - 0 1 moves e2e4 e8d7")
                .unwrap();
        assert_eq!(
            cmd,
            GuiCommand::Position {
                fen: Some("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1".to_string()),
                moves: vec!["e2e4".to_string(), "e8d7".to_string()]
            }
        );
    }

    #[test]
    fn parse_position_requires_source() {
        assert!(matches!(
            GuiCommand::parse("position"),
            Err(UciError::ParseError(_))
        ));
        assert!(matches!(
            GuiCommand::parse("position somewhere"),
            Err(UciError::ParseError(_))
        ));
    }

    #[test]
    fn parse_go_movetime() {
        let cmd = GuiCommand::parse("go movetime 1000").unwrap();
        if let GuiCommand::Go(opts) = cmd {
            assert_eq!(opts.movetime, Some(1000));
        } else {
            panic!("Expected Go command");
        }
    }

    #[test]
    fn parse_go_depth() {
        let cmd = GuiCommand::parse("go depth 10").unwrap();
        if let GuiCommand::Go(opts) = cmd {
            assert_eq!(opts.depth, Some(10));
        } else {
            panic!("Expected Go command");
        }
    }

    #[test]
    fn parse_go_clock() {
        let cmd = GuiCommand::parse("go wtime 300000 btime 290000 winc 2000 binc 2000").unwrap();
        assert_eq!(
            cmd,
            GuiCommand::Go(GoOptions {
                wtime: Some(300000),
                btime: Some(290000),
                winc: Some(2000),
                binc: Some(2000),
                ..GoOptions::default()
            })
        );
    }

    #[test]
    fn parse_go_perft() {
        let cmd = GuiCommand::parse("go perft 4").unwrap();
        if let GuiCommand::Go(opts) = cmd {
            assert_eq!(opts.perft, Some(4));
            assert_eq!(opts.depth, None);
        } else {
            panic!("Expected Go command");
        }
    }

    #[test]
    fn parse_go_infinite() {
        let cmd = GuiCommand::parse("go infinite").unwrap();
        if let GuiCommand::Go(opts) = cmd {
            assert!(opts.infinite);
        } else {
            panic!("Expected Go command");
        }
    }
}
