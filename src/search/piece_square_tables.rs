//! Piece-square tables loaded from `score.conf`.
//!
//! File format: `#` starts a comment that runs to the end of the line. The
//! rest is a whitespace-separated stream of records, each a key followed by
//! 90 integers in row-major order from the owner's side (row 0 is the owner's
//! back rank). Keys are `R N B A K C P` for revealed pieces and `D E F G H I`
//! for dark markers. A key suffixed with `:end` sets the endgame table only,
//! `:open` the opening table only, and a bare key sets both.

use std::fs;
use std::path::Path;

use crate::game_state::jieqi_types::{Cell, CELL_CODE_COUNT};
use crate::jieqi_errors::JieqiError;
use crate::utils::board_text::{cell_from_code, EXTERNAL_CELLS};

pub type SquareTable = [i32; EXTERNAL_CELLS];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Opening,
    Endgame,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTables {
    opening: [SquareTable; CELL_CODE_COUNT],
    endgame: [SquareTable; CELL_CODE_COUNT],
}

impl Default for ScoreTables {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl ScoreTables {
    pub const fn zeroed() -> Self {
        Self {
            opening: [[0; EXTERNAL_CELLS]; CELL_CODE_COUNT],
            endgame: [[0; EXTERNAL_CELLS]; CELL_CODE_COUNT],
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, JieqiError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|err| JieqiError::ScoreTable(format!("{}: {err}", path.display())))?;
        Self::parse(&text)
    }

    /// Load, or fall back to zeroed tables with a warning.
    pub fn load_or_zeroed(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(tables) => {
                log::info!("loaded score tables from {}", path.as_ref().display());
                tables
            }
            Err(err) => {
                log::warn!("{err}; using zeroed score tables");
                Self::zeroed()
            }
        }
    }

    pub fn parse(text: &str) -> Result<Self, JieqiError> {
        let mut tables = Self::zeroed();
        let mut tokens = text
            .lines()
            .map(|line| line.split('#').next().unwrap_or(""))
            .flat_map(str::split_whitespace);

        while let Some(key) = tokens.next() {
            let (code, phase) = parse_key(key)?;
            let mut values = [0i32; EXTERNAL_CELLS];
            for (index, slot) in values.iter_mut().enumerate() {
                let token = tokens.next().ok_or_else(|| {
                    JieqiError::ScoreTable(format!("record '{key}' ends after {index} values"))
                })?;
                *slot = token.parse().map_err(|_| {
                    JieqiError::ScoreTable(format!("record '{key}': bad value '{token}'"))
                })?;
            }
            if matches!(phase, Phase::Opening | Phase::Both) {
                tables.opening[code] = values;
            }
            if matches!(phase, Phase::Endgame | Phase::Both) {
                tables.endgame[code] = values;
            }
        }

        Ok(tables)
    }

    /// Opening and endgame bonus for cell code `code` on owner-view index
    /// `index` (`row * 9 + col`).
    #[inline]
    pub fn lookup(&self, code: usize, index: usize) -> (i32, i32) {
        (self.opening[code][index], self.endgame[code][index])
    }

    pub fn set(&mut self, cell: Cell, opening: SquareTable, endgame: SquareTable) {
        if let Some(code) = cell.code() {
            self.opening[code] = opening;
            self.endgame[code] = endgame;
        }
    }
}

fn parse_key(key: &str) -> Result<(usize, Phase), JieqiError> {
    let (letter, phase) = match key.split_once(':') {
        None => (key, Phase::Both),
        Some((letter, "end")) => (letter, Phase::Endgame),
        Some((letter, "open")) => (letter, Phase::Opening),
        Some(_) => return Err(JieqiError::ScoreTable(format!("unknown key '{key}'"))),
    };
    let code = match letter.as_bytes() {
        [byte] if byte.is_ascii_uppercase() => cell_from_code(*byte).and_then(Cell::code),
        _ => None,
    };
    code.map(|code| (code, phase))
        .ok_or_else(|| JieqiError::ScoreTable(format!("unknown key '{key}'")))
}
