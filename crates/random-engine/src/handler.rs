//! UCI command handling.

use crate::search::{MoveFinder, SearchError};
use chess_rules::{perft_divide, Position};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};
use uci::{GoOptions, GuiCommand, UciEngine, UciError};

/// Whether the driver loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Turns GUI commands into operations on one position.
pub struct UciHandler<F> {
    position: Position,
    finder: F,
}

impl<F: MoveFinder> UciHandler<F> {
    pub fn new(finder: F) -> Self {
        Self {
            position: Position::startpos(),
            finder,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Reads and handles commands until `quit` or end of input.
    ///
    /// Malformed commands are logged and skipped; I/O errors end the loop.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        engine: &mut UciEngine<R, W>,
    ) -> Result<(), UciError> {
        loop {
            let cmd = match engine.read_command() {
                Ok(cmd) => cmd,
                Err(UciError::ParseError(e)) => {
                    warn!("Error reading command: {}", e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            if self.handle(cmd, engine)? == Flow::Quit {
                info!("quit");
                return Ok(());
            }
        }
    }

    pub fn handle<R: BufRead, W: Write>(
        &mut self,
        cmd: GuiCommand,
        engine: &mut UciEngine<R, W>,
    ) -> Result<Flow, UciError> {
        match cmd {
            GuiCommand::Uci => {
                engine.send_id(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_AUTHORS"))?;
                engine.send_uciok()?;
            }

            GuiCommand::IsReady => engine.send_readyok()?,

            GuiCommand::UciNewGame => {
                self.position = Position::startpos();
                debug!("new game");
            }

            GuiCommand::Position { fen, moves } => {
                // A bad FEN or move keeps the previous position
                match Position::setup(fen.as_deref(), &moves) {
                    Ok(position) => {
                        debug!(fen = %position.to_fen(), "position set");
                        self.position = position;
                    }
                    Err(e) => warn!("Ignoring position command: {}", e),
                }
            }

            GuiCommand::Go(opts) => self.go(&opts, engine)?,

            GuiCommand::Display => engine.send_text(self.position.to_string())?,

            GuiCommand::Stop => {
                // Moves are chosen instantly; nothing to stop
            }

            GuiCommand::Quit => return Ok(Flow::Quit),

            GuiCommand::Unknown(text) => {
                if !text.is_empty() {
                    warn!("Unknown command: {}", text);
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn go<R: BufRead, W: Write>(
        &mut self,
        opts: &GoOptions,
        engine: &mut UciEngine<R, W>,
    ) -> Result<(), UciError> {
        if let Some(depth) = opts.perft {
            let divide = perft_divide(&mut self.position, depth);
            let total: u64 = divide.iter().map(|(_, n)| n).sum();
            let mut lines: Vec<String> = divide
                .iter()
                .map(|(mv, nodes)| format!("{}: {}", mv, nodes))
                .collect();
            lines.push(String::new());
            lines.push(format!("Nodes searched: {}", total));
            info!("perft {} = {}", depth, total);
            return engine.send_text(lines.join("\n"));
        }

        match self.finder.find_move(&mut self.position) {
            Ok(mv) => engine.send_bestmove(&mv.to_uci()),
            Err(SearchError::NoLegalMoves) => {
                info!("No legal moves, game is over");
                engine.send_bestmove("0000")
            }
        }
    }
}
