//! UCCI-style stdio front end.
//!
//! One game session per process. Positions arrive as 90 board characters
//! (red perspective) plus the side to move and, optionally, the number of
//! plies played so far. Moves go out in red coordinates.

use std::io::{self, BufRead, Write};

use crate::engines::engine_trait::{is_error_answer, ThinkerKind};
use crate::host::engine_host::DEFAULT_SEARCH_DEPTH;
use crate::host::session_registry::SessionRegistry;
use crate::jieqi_errors::GameId;

const UCCI_ENGINE_NAME: &str = "Jieqi Engine";
const UCCI_ENGINE_AUTHOR: &str = "jieqi_engine developers";

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut ucci = UcciState::new(SessionRegistry::initialized());

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = ucci.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

struct UcciState {
    registry: SessionRegistry,
    game: GameId,
    depth: u8,
}

impl UcciState {
    fn new(registry: SessionRegistry) -> Self {
        let game = registry.create_game();
        Self {
            registry,
            game,
            depth: DEFAULT_SEARCH_DEPTH,
        }
    }

    fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();

        match cmd {
            "ucci" => {
                writeln!(out, "id name {UCCI_ENGINE_NAME}")?;
                writeln!(out, "id author {UCCI_ENGINE_AUTHOR}")?;
                writeln!(
                    out,
                    "option name Depth type spin default {DEFAULT_SEARCH_DEPTH} min 1 max 64"
                )?;
                writeln!(
                    out,
                    "option name Thinker type combo default alphabeta var alphabeta var greedy"
                )?;
                writeln!(out, "ucciok")?;
            }
            "isready" => {
                writeln!(out, "readyok")?;
            }
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    writeln!(out, "info string setoption error: {err}")?;
                }
            }
            "newgame" => {
                self.new_game();
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    writeln!(out, "info string position error: {err}")?;
                }
            }
            "go" => {
                let depth = parse_go_depth(trimmed).unwrap_or(self.depth);
                let answer = self.registry.get_move(self.game, Some(depth));
                if is_error_answer(&answer) {
                    writeln!(out, "info string {answer}")?;
                    writeln!(out, "nobestmove")?;
                } else {
                    writeln!(out, "bestmove {answer}")?;
                }
            }
            "eval" => match self.registry.get_static_evaluation(self.game) {
                Ok(score) => writeln!(out, "eval {score}")?,
                Err(err) => writeln!(out, "info string eval error: {err}")?,
            },
            "d" => match self.registry.render(self.game) {
                Ok(board) => writeln!(out, "{board}")?,
                Err(err) => writeln!(out, "info string {err}")?,
            },
            "quit" => {
                return Ok(true);
            }
            _ => {
                log::debug!("ignoring unknown command '{cmd}'");
            }
        }

        Ok(false)
    }

    fn new_game(&mut self) {
        if let Err(err) = self.registry.delete_game(self.game) {
            log::warn!("{err}");
        }
        self.game = self.registry.create_game();
    }

    fn handle_setoption(&mut self, line: &str) -> Result<(), String> {
        let mut name_tokens = Vec::<&str>::new();
        let mut value_tokens = Vec::<&str>::new();
        let mut mode = "";

        for tok in line.split_whitespace().skip(1) {
            match tok {
                "name" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(tok),
                _ if mode == "value" => value_tokens.push(tok),
                _ => {}
            }
        }

        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");

        if name.eq_ignore_ascii_case("Depth") {
            let parsed = value
                .parse::<u8>()
                .map_err(|_| format!("invalid Depth value '{value}'"))?;
            self.depth = parsed.max(1);
        } else if name.eq_ignore_ascii_case("Thinker") {
            self.registry.set_thinker(value.parse::<ThinkerKind>()?);
        } else {
            return Err(format!("unknown option '{name}'"));
        }

        Ok(())
    }

    fn handle_position(&mut self, line: &str) -> Result<(), String> {
        let mut tokens = line.split_whitespace().skip(1);
        let cells = tokens.next().ok_or("incomplete position command")?;
        let red_to_move = match tokens.next() {
            Some("red") | Some("w") => true,
            Some("black") | Some("b") => false,
            Some(other) => return Err(format!("unsupported side token '{other}'")),
            None => return Err("missing side to move".to_owned()),
        };
        let history_len = match tokens.next() {
            Some(tok) => tok
                .parse::<usize>()
                .map_err(|_| format!("invalid history length '{tok}'"))?,
            None => 0,
        };

        self.registry
            .set_board(self.game, cells.as_bytes(), red_to_move, history_len)
            .map_err(|err| err.to_string())
    }
}

fn parse_go_depth(line: &str) -> Option<u8> {
    let mut tokens = line.split_whitespace();
    while let Some(tok) = tokens.next() {
        if tok == "depth" {
            return tokens.next().and_then(|x| x.parse::<u8>().ok());
        }
    }
    None
}
