use crate::core::bitboard::Bitboard;
use crate::core::board::{Board, BoardError, Color, Coord};
use crate::core::moves::{Destinations, Move};
use crate::engine::movegen::MoveGen;
use crate::game::state::{Event, GameState, Status};
use chrono::{DateTime, Local};
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Errors in a console command line
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("invalid side to move '{0}'")]
    InvalidColor(String),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("invalid value '{value}' for option {name}")]
    InvalidOptionValue { name: String, value: String },
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// One parsed console command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Click(Coord),
    Move(Move),
    Moves(Option<Coord>),
    Display,
    Status,
    Json,
    Options,
    Help,
    Reset,
    Position { board: Board, turn: Color },
    SetOption { name: String, value: String },
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&first) = parts.first() else {
            return Err(CommandError::MissingArgument("command"));
        };

        match first.to_ascii_lowercase().as_str() {
            "click" | "select" => {
                let sq = parts.get(1).ok_or(CommandError::MissingArgument("square"))?;
                Ok(Command::Click(Coord::from_algebraic(sq)?))
            }
            "move" => {
                let mv = parts.get(1).ok_or(CommandError::MissingArgument("move"))?;
                Ok(Command::Move(Move::from_uci(mv)?))
            }
            "moves" => match parts.get(1) {
                Some(sq) => Ok(Command::Moves(Some(Coord::from_algebraic(sq)?))),
                None => Ok(Command::Moves(None)),
            },
            "d" | "display" => Ok(Command::Display),
            "status" => Ok(Command::Status),
            "json" => Ok(Command::Json),
            "options" => Ok(Command::Options),
            "help" | "?" => Ok(Command::Help),
            "reset" | "new" => Ok(Command::Reset),
            "position" => Self::parse_position(&parts),
            "setoption" => Self::parse_setoption(&parts),
            "quit" | "exit" => Ok(Command::Quit),
            _ if parts.len() == 1 && first.len() == 2 => {
                Ok(Command::Click(Coord::from_algebraic(first)?))
            }
            _ if parts.len() == 1 && first.len() == 4 => Ok(Command::Move(Move::from_uci(first)?)),
            _ => Err(CommandError::Unknown(first.to_string())),
        }
    }

    fn parse_position(parts: &[&str]) -> Result<Self, CommandError> {
        let placement = parts
            .get(1)
            .ok_or(CommandError::MissingArgument("placement"))?;
        if placement.eq_ignore_ascii_case("startpos") {
            return Ok(Command::Position {
                board: Board::startpos(),
                turn: Color::White,
            });
        }
        let board = Board::from_placement(placement)?;
        let turn = match parts.get(2).copied() {
            None | Some("w") | Some("white") => Color::White,
            Some("b") | Some("black") => Color::Black,
            Some(other) => return Err(CommandError::InvalidColor(other.to_string())),
        };
        Ok(Command::Position { board, turn })
    }

    fn parse_setoption(parts: &[&str]) -> Result<Self, CommandError> {
        let mut name = String::new();
        let mut value = String::new();
        let mut in_name = false;
        let mut in_value = false;

        for part in parts.iter().skip(1) {
            match *part {
                "name" => { in_name = true; in_value = false; }
                "value" => { in_name = false; in_value = true; }
                _ => {
                    if in_name { if !name.is_empty() { name.push(' '); } name.push_str(part); }
                    else if in_value { if !value.is_empty() { value.push(' '); } value.push_str(part); }
                }
            }
        }

        if name.is_empty() {
            return Err(CommandError::MissingArgument("option name"));
        }
        Ok(Command::SetOption { name, value })
    }
}

/// Runtime settings changed through `setoption`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Print legal destinations whenever a piece is selected.
    pub show_moves: bool,
    /// Draw pieces with Unicode glyphs instead of FEN letters.
    pub unicode: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            show_moves: true,
            unicode: false,
        }
    }
}

impl Options {
    /// Apply one option by name; names ignore case, spaces and underscores
    pub fn apply(&mut self, name: &str, value: &str) -> Result<(), CommandError> {
        let opt = name.to_lowercase().replace([' ', '_'], "");
        let slot = match opt.as_str() {
            "showmoves" => &mut self.show_moves,
            "unicode" => &mut self.unicode,
            _ => return Err(CommandError::UnknownOption(name.to_string())),
        };
        *slot = parse_bool(value).ok_or_else(|| CommandError::InvalidOptionValue {
            name: name.to_string(),
            value: value.to_string(),
        })?;
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Line-oriented controller for a two-player game on one terminal
pub struct Console {
    pub state: GameState,
    pub options: Options,
    started_at: DateTime<Local>,
}

impl Console {
    pub fn new() -> Self {
        Console {
            state: GameState::new(),
            options: Options::default(),
            started_at: Local::now(),
        }
    }

    /// Run against stdin/stdout until `quit` or end of input
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        self.run_with(stdin.lock(), &mut stdout)
    }

    /// Run against any input and output; each line is handled to completion
    /// before the next one is read
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match Command::parse(line) {
                Ok(Command::Quit) => break,
                Ok(cmd) => self.execute(cmd, out)?,
                Err(err) => writeln!(out, "info string {}", err)?,
            }
            out.flush()?;
        }
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, cmd: Command, out: &mut W) -> io::Result<()> {
        match cmd {
            Command::Click(coord) => {
                let event = self.state.handle_selection(coord);
                self.report(event, coord, out)
            }
            Command::Move(mv) => self.cmd_move(mv, out),
            Command::Moves(coord) => self.cmd_moves(coord, out),
            Command::Display => self.cmd_display(out),
            Command::Status => self.cmd_status(out),
            Command::Json => self.cmd_json(out),
            Command::Options => self.cmd_options(out),
            Command::Help => self.cmd_help(out),
            Command::Reset => {
                self.state.reset();
                self.started_at = Local::now();
                writeln!(out, "new game, {} to move", self.state.turn())
            }
            Command::Position { board, turn } => {
                self.state = GameState::with_board(board, turn);
                self.started_at = Local::now();
                writeln!(out, "position set, {} to move", self.state.turn())
            }
            Command::SetOption { name, value } => match self.options.apply(&name, &value) {
                Ok(()) => Ok(()),
                Err(err) => writeln!(out, "info string {}", err),
            },
            Command::Quit => Ok(()),
        }
    }

    /// A whole move as two selections: pick up `mv.from`, drop on `mv.to`
    fn cmd_move<W: Write>(&mut self, mv: Move, out: &mut W) -> io::Result<()> {
        if self.state.status().is_over() {
            return writeln!(out, "game is over");
        }
        if let Some(selected) = self.state.selection() {
            self.state.handle_selection(selected);
        }

        match self.state.handle_selection(mv.from) {
            Event::Selected(_) => {}
            _ => {
                return writeln!(out, "no {} piece on {}", self.state.turn().name().to_lowercase(), mv.from);
            }
        }

        match self.state.handle_selection(mv.to) {
            Event::Reselected { to, .. } => {
                self.state.handle_selection(to);
                writeln!(out, "illegal move {}", mv)
            }
            event => self.report(event, mv.to, out),
        }
    }

    fn report<W: Write>(&self, event: Event, coord: Coord, out: &mut W) -> io::Result<()> {
        match event {
            Event::Ignored if self.state.status().is_over() => writeln!(out, "game is over"),
            Event::Ignored => writeln!(out, "nothing to select on {}", coord),
            Event::Selected(at) | Event::Reselected { to: at, .. } => {
                match self.state.board().piece_at(at) {
                    Some(piece) => writeln!(out, "selected {} ({})", at, piece)?,
                    None => writeln!(out, "selected {}", at)?,
                }
                if self.options.show_moves {
                    self.write_destinations(self.state.highlights(), out)?;
                }
                Ok(())
            }
            Event::Deselected(at) => writeln!(out, "deselected {}", at),
            Event::Cancelled(mv) => writeln!(out, "illegal move {}", mv),
            Event::Moved { mv, piece, captured, status } => {
                writeln!(out, "moved {} ({})", mv, piece)?;
                if let Some(captured) = captured {
                    writeln!(out, "captured {}", captured)?;
                }
                match status {
                    Status::InProgress => writeln!(out, "{} to move", self.state.turn()),
                    ended => writeln!(out, "{}", ended),
                }
            }
        }
    }

    fn cmd_moves<W: Write>(&self, coord: Option<Coord>, out: &mut W) -> io::Result<()> {
        match coord.or(self.state.selection()) {
            Some(from) => self.write_destinations(MoveGen::destinations(self.state.board(), from), out),
            None => {
                let moves: Vec<String> = self.state.legal_moves().iter().map(|mv| mv.to_uci()).collect();
                writeln!(out, "legal moves ({}): {}", moves.len(), moves.join(" "))
            }
        }
    }

    fn write_destinations<W: Write>(&self, dests: Destinations, out: &mut W) -> io::Result<()> {
        writeln!(out, "moves: {}", join_coords(dests.quiet))?;
        writeln!(out, "captures: {}", join_coords(dests.captures))
    }

    fn cmd_display<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        write!(out, "{}", self.state.board().render(self.options.unicode))?;
        writeln!(out)?;
        writeln!(out, "Current player: {}", self.state.turn())?;
        match self.state.selection() {
            Some(coord) => writeln!(out, "Selected: {}", coord)?,
            None => writeln!(out, "Selected: -")?,
        }
        writeln!(out, "{}", self.state.status())
    }

    fn cmd_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let elapsed = Local::now().signed_duration_since(self.started_at);
        writeln!(out, "{}", self.state.status())?;
        writeln!(out, "Current player: {}", self.state.turn())?;
        writeln!(
            out,
            "Started at {} ({} s elapsed)",
            self.started_at.format("%H:%M:%S"),
            elapsed.num_seconds()
        )
    }

    fn cmd_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match serde_json::to_string(&self.state) {
            Ok(json) => writeln!(out, "{}", json),
            Err(err) => writeln!(out, "info string {}", err),
        }
    }

    fn cmd_options<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "option name ShowMoves type check value {}", self.options.show_moves)?;
        writeln!(out, "option name Unicode type check value {}", self.options.unicode)
    }

    fn cmd_help<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "commands:")?;
        writeln!(out, "  <square> | click <square>     select a piece or a destination")?;
        writeln!(out, "  <from><to> | move <from><to>  play a whole move, e.g. e2e4")?;
        writeln!(out, "  moves [<square>]              legal destinations")?;
        writeln!(out, "  d | display                   show the board")?;
        writeln!(out, "  status | json | options")?;
        writeln!(out, "  reset | new                   start a new game")?;
        writeln!(out, "  position startpos | <placement> [w|b]")?;
        writeln!(out, "  setoption name <name> value <value>")?;
        writeln!(out, "  quit")
    }
}

fn join_coords(bb: Bitboard) -> String {
    if bb.is_empty() {
        return "-".to_string();
    }
    bb.iter().map(|c| c.to_algebraic()).collect::<Vec<_>>().join(" ")
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
