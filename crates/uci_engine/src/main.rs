//! Text front end speaking a UCI subset over stdin/stdout.
//!
//! Protocol traffic goes to stdout; logging goes to stderr via `tracing`
//! so a GUI never sees it. Errors in a command are reported as
//! `info string ...` lines and leave the current position untouched.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use engine_core::{
    move_to_uci, parse_uci_move, perft, perft_divide, EngineError, Position, Searcher, MATE_SCORE,
};

const DEFAULT_DEPTH: u8 = 4;

struct Session {
    pos: Position,
    depth: u8,
    searcher: Searcher,
}

impl Session {
    fn new() -> Self {
        Session {
            pos: Position::startpos(),
            depth: DEFAULT_DEPTH,
            searcher: Searcher::new(),
        }
    }

    /// Handle one command line. Returns `false` on `quit`.
    fn handle(&mut self, line: &str, out: &mut impl Write) -> Result<bool> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            return Ok(true);
        };
        debug!(command, "handling");

        match command {
            "uci" => {
                writeln!(out, "id name Ferrum 0.1")?;
                writeln!(out, "id author Ferrum developers")?;
                writeln!(
                    out,
                    "option name Depth type spin default {DEFAULT_DEPTH} min 1 max 8"
                )?;
                writeln!(out, "uciok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "ucinewgame" => self.pos = Position::startpos(),
            "setoption" => self.set_option(&parts[1..]),
            "position" => {
                if let Err(e) = self.set_position(&parts[1..]) {
                    warn!(%e, "position rejected");
                    writeln!(out, "info string {e}")?;
                }
            }
            "go" => self.go(&parts[1..], out)?,
            "d" => writeln!(out, "{}", self.pos)?,
            "quit" => return Ok(false),
            _ => {
                // Unknown commands are ignored, as the protocol asks.
                debug!(command, "ignored");
            }
        }
        out.flush()?;
        Ok(true)
    }

    /// `setoption name Depth value N`. Unrecognized options are ignored.
    fn set_option(&mut self, args: &[&str]) {
        let name = args
            .iter()
            .position(|&a| a == "name")
            .and_then(|i| args.get(i + 1));
        let value = args
            .iter()
            .position(|&a| a == "value")
            .and_then(|i| args.get(i + 1));
        if let (Some(&"Depth"), Some(value)) = (name, value) {
            match value.parse::<u8>() {
                Ok(d) => self.depth = d.clamp(1, 8),
                Err(_) => warn!(%value, "bad Depth value"),
            }
        }
    }

    /// `position startpos|fen <fen> [moves <m1> <m2> ...]`. The new
    /// position is built on the side and only committed when every part
    /// parsed, so a bad FEN or move leaves the session where it was.
    fn set_position(&mut self, args: &[&str]) -> Result<(), EngineError> {
        let (mut pos, rest) = match args.first() {
            Some(&"startpos") => (Position::startpos(), &args[1..]),
            Some(&"fen") => {
                let end = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
                let fen = args[1..end].join(" ");
                (Position::from_fen(&fen)?, &args[end..])
            }
            _ => {
                return Err(EngineError::InvalidFen(
                    "expected 'startpos' or 'fen'".to_string(),
                ))
            }
        };

        let moves: &[&str] = match rest.first() {
            Some(&"moves") => &rest[1..],
            _ => &[],
        };
        for text in moves {
            let mv = parse_uci_move(&pos, text)?;
            pos.make_move(mv);
        }

        self.pos = pos;
        Ok(())
    }

    /// `go [depth N]` searches, `go perft N` counts and prints the split.
    fn go(&mut self, args: &[&str], out: &mut impl Write) -> Result<()> {
        if args.first() == Some(&"perft") {
            let depth = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
            return self.go_perft(depth, out);
        }

        let mut depth = self.depth;
        if let Some(i) = args.iter().position(|&a| a == "depth") {
            if let Some(d) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                depth = d;
            }
        }

        match self.searcher.best_move(&mut self.pos, depth) {
            Some((mv, score)) => {
                writeln!(
                    out,
                    "info depth {depth} score {} nodes {}",
                    format_score(score),
                    self.searcher.nodes()
                )?;
                writeln!(out, "bestmove {}", move_to_uci(&mv))?;
            }
            None => writeln!(out, "bestmove 0000")?,
        }
        Ok(())
    }

    fn go_perft(&mut self, depth: u8, out: &mut impl Write) -> Result<()> {
        let divided = perft_divide(&mut self.pos, depth);
        for (mv, nodes) in &divided {
            writeln!(out, "{}: {nodes}", move_to_uci(mv))?;
        }
        let total = if depth == 0 {
            perft(&mut self.pos, 0)
        } else {
            divided.iter().map(|(_, n)| n).sum()
        };
        writeln!(out)?;
        writeln!(out, "Nodes searched: {total}")?;
        Ok(())
    }
}

/// Centipawns normally, `mate N` (in moves, signed) when a forced mate is
/// inside the search window.
fn format_score(score: i32) -> String {
    if score.abs() > MATE_SCORE - 1_000 {
        let plies = MATE_SCORE - score.abs();
        let moves = (plies + 1) / 2;
        if score > 0 {
            format!("mate {moves}")
        } else {
            format!("mate -{moves}")
        }
    } else {
        format!("cp {score}")
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = Session::new();

    for line in stdin.lock().lines() {
        let line = line?;
        if !session.handle(line.trim(), &mut stdout)? {
            break;
        }
    }
    Ok(())
}
