/* =======================================================================
Sharpmate is a chess playing engine.

Sharpmate is free software: you can redistribute it and/or modify it under
the terms of the GNU General Public License version 3 as published by
the Free Software Foundation.

Sharpmate is distributed in the hope that it will be useful, but WITHOUT
ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License
for more details.

You should have received a copy of the GNU General Public License along
with this program.  If not, see <http://www.gnu.org/licenses/>.
======================================================================= */

pub use crate::engine::transposition::{HashFlag, PerftData, SearchData, TT, LocalTTCache};
use crate::{comm::CommReport, search::defs::SearchReport};

// This struct holds messages that are reported on fatal engine errors.
// These should never happen; if they do the engine is in an unknown state,
// and it will panic without trying any recovery whatsoever.
pub struct ErrFatal;
impl ErrFatal {
    pub const CREATE_COMM: &'static str = "Comm creation failed.";
    pub const NEW_GAME: &'static str = "Setting up new game failed.";
    pub const LOCK: &'static str = "Lock failed.";
    pub const READ_IO: &'static str = "Reading I/O failed.";
    pub const HANDLE: &'static str = "Broken handle.";
    pub const THREAD: &'static str = "Thread has failed.";
    pub const CHANNEL: &'static str = "Broken channel.";
    pub const NO_INFO_RX: &'static str = "No incoming Info channel.";
}

pub struct ErrNormal;
impl ErrNormal {
    pub const NOT_LEGAL: &'static str = "This is not a legal move in this position.";
    pub const NOT_INT: &'static str = "The value given was not an integer.";
    pub const FEN_FAILED: &'static str = "Setting up FEN failed. Board not changed.";
}

// This struct holds the engine's settings.
pub struct Settings {
    pub threads: usize,
    pub quiet: bool,
    pub tt_size: usize,
    pub sharp_margin: i16,
    pub multi_pv: usize,
    pub move_overhead: u128,
    pub contempt: i16,
    pub uci_analyse_mode: bool,
    pub ponder: bool,
    pub own_book: bool,
    pub null_move: bool,
    pub lmr: bool,
}

// This enum provides informatin to the engine, with regard to incoming
// messages and search results.
#[derive(PartialEq)]
pub enum Information {
    Comm(CommReport),
    Search(SearchReport),
}

pub enum UiElement {
    Spin,
    Button,
}

pub struct EngineOption {
    pub name: &'static str,
    pub ui_element: UiElement,
    pub default: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
}

impl EngineOption {
    pub fn new(
        name: &'static str,
        ui_element: UiElement,
        default: Option<String>,
        min: Option<String>,
        max: Option<String>,
    ) -> Self {
        Self {
            name,
            ui_element,
            default,
            min,
            max,
        }
    }
}

#[derive(PartialEq, Clone, Debug)]
pub enum EngineOptionName {
    Hash(String),
    ClearHash,
    SharpMargin(String),
    Threads(String),
    MultiPv(String),
    MoveOverhead(String),
    Contempt(String),
    UciAnalyseMode(String),
    Ponder(String),
    OwnBook(String),
    NullMove(String),
    Lmr(String),
    Nothing,
}
impl EngineOptionName {
    pub const HASH: &'static str = "Hash";
    pub const CLEAR_HASH: &'static str = "Clear Hash";
    pub const SHARP_MARGIN: &'static str = "Sharp Margin";
    pub const THREADS: &'static str = "Threads";
    pub const MULTI_PV: &'static str = "MultiPV";
    pub const MOVE_OVERHEAD: &'static str = "Move Overhead";
    pub const CONTEMPT: &'static str = "Contempt";
    pub const UCI_ANALYSE_MODE: &'static str = "UCI_AnalyseMode";
    pub const PONDER: &'static str = "Ponder";
    pub const OWN_BOOK: &'static str = "OwnBook";
    pub const NULL_MOVE: &'static str = "NullMove";
    pub const LMR: &'static str = "LMR";
}

pub struct EngineOptionDefaults;
impl EngineOptionDefaults {
    pub const HASH_DEFAULT: usize = 32;
    pub const HASH_MIN: usize = 0;
    pub const HASH_MAX_64_BIT: usize = 65536;
    pub const HASH_MAX_32_BIT: usize = 2048;
    pub const SHARP_MARGIN_DEFAULT: i16 = 30;
    pub const SHARP_MARGIN_MIN: i16 = 0;
    pub const SHARP_MARGIN_MAX: i16 = 100;
    pub const MULTI_PV_DEFAULT: usize = 1;
    pub const MULTI_PV_MIN: usize = 1;
    pub const MULTI_PV_MAX: usize = 8;
    pub const MOVE_OVERHEAD_DEFAULT: u128 = 50;
    pub const MOVE_OVERHEAD_MIN: u128 = 0;
    pub const MOVE_OVERHEAD_MAX: u128 = 5000;
    pub const CONTEMPT_DEFAULT: i16 = 0;
    pub const CONTEMPT_MIN: i16 = -100;
    pub const CONTEMPT_MAX: i16 = 100;
    pub const UCI_ANALYSE_MODE_DEFAULT: bool = false;
    pub const PONDER_DEFAULT: bool = false;
    pub const OWN_BOOK_DEFAULT: bool = true;
    pub const NULL_MOVE_DEFAULT: bool = true;
    pub const LMR_DEFAULT: bool = true;
}
