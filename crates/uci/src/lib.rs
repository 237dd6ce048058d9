//! UCI (Universal Chess Interface) protocol library.
//!
//! This crate provides types and parsing for the line-oriented UCI protocol
//! used between a chess GUI and an engine.
//!
//! # Supported Commands
//!
//! - `uci` - Initialize engine, get id
//! - `isready` / `readyok` - Synchronization
//! - `ucinewgame` - Forget the previous game
//! - `position [startpos | fen <fen>] [moves <move>...]` - Set position
//! - `go [movetime <ms>] [depth <d>] [perft <d>]` - Start search
//! - `d` - Print the current position
//! - `stop` - Stop search
//! - `quit` - Exit engine

mod command;

pub use command::{GoOptions, GuiCommand};

use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum UciError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Messages sent from engine to GUI.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineMessage {
    /// Engine identification.
    Id {
        name: Option<String>,
        author: Option<String>,
    },
    /// UCI initialization complete.
    UciOk,
    /// Engine is ready.
    ReadyOk,
    /// Best move found.
    BestMove { mv: String, ponder: Option<String> },
    /// Free-form output such as a board dump or perft counts.
    Text(String),
}

impl EngineMessage {
    /// Format message for output.
    pub fn to_uci(&self) -> String {
        match self {
            EngineMessage::Id { name, author } => {
                let mut parts = Vec::new();
                if let Some(n) = name {
                    parts.push(format!("id name {}", n));
                }
                if let Some(a) = author {
                    parts.push(format!("id author {}", a));
                }
                parts.join("\n")
            }
            EngineMessage::UciOk => "uciok".to_string(),
            EngineMessage::ReadyOk => "readyok".to_string(),
            EngineMessage::BestMove { mv, ponder } => match ponder {
                Some(p) => format!("bestmove {} ponder {}", mv, p),
                None => format!("bestmove {}", mv),
            },
            EngineMessage::Text(text) => text.clone(),
        }
    }
}

/// Line I/O for an engine speaking UCI.
pub struct UciEngine<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> UciEngine<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Read and parse the next command from GUI.
    ///
    /// End of input reads as `quit`.
    pub fn read_command(&mut self) -> Result<GuiCommand, UciError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            debug!("input closed");
            return Ok(GuiCommand::Quit);
        }
        debug!(line = line.trim_end(), "received");
        GuiCommand::parse(&line)
    }

    /// Send a message to the GUI.
    pub fn send(&mut self, msg: &EngineMessage) -> Result<(), UciError> {
        let text = msg.to_uci();
        debug!(response = %text, "sent");
        writeln!(self.writer, "{}", text)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Send engine identification.
    pub fn send_id(&mut self, name: &str, author: &str) -> Result<(), UciError> {
        self.send(&EngineMessage::Id {
            name: Some(name.to_string()),
            author: Some(author.to_string()),
        })
    }

    pub fn send_uciok(&mut self) -> Result<(), UciError> {
        self.send(&EngineMessage::UciOk)
    }

    pub fn send_readyok(&mut self) -> Result<(), UciError> {
        self.send(&EngineMessage::ReadyOk)
    }

    /// Send best move.
    pub fn send_bestmove(&mut self, mv: &str) -> Result<(), UciError> {
        self.send(&EngineMessage::BestMove {
            mv: mv.to_string(),
            ponder: None,
        })
    }

    /// Send free-form text, one or more lines.
    pub fn send_text(&mut self, text: impl Into<String>) -> Result<(), UciError> {
        self.send(&EngineMessage::Text(text.into()))
    }

    /// Consumes the engine, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

/// Create a UCI engine using stdin/stdout.
pub fn stdio_engine() -> UciEngine<std::io::StdinLock<'static>, std::io::Stdout> {
    UciEngine::new(std::io::stdin().lock(), std::io::stdout())
}
