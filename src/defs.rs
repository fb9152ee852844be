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

// Crate-wide primitive types and constants shared by every module.

/// A bitboard: one bit per square, A1 is bit 0, H8 is bit 63.
pub type Bitboard = u64;

/// A board square, 0..64.
pub type Square = usize;

/// A piece type, 0..6 (see board::defs::Pieces).
pub type Piece = usize;

/// A side to move, 0 (white) or 1 (black).
pub type Side = usize;

pub const EMPTY: Bitboard = 0;

pub struct Sides;
impl Sides {
    pub const WHITE: Side = 0;
    pub const BLACK: Side = 1;
    pub const BOTH: usize = 2;
}

pub struct NrOf;
impl NrOf {
    pub const PIECE_TYPES: usize = 6;
    pub const SQUARES: usize = 64;
    pub const FILES: usize = 8;
    pub const RANKS: usize = 8;
    pub const CASTLING_PERMISSIONS: usize = 16;
}

/// Maximum search ply. Bounds recursion depth, killer/search-stack arrays,
/// and the mate-score encoding window.
pub const MAX_PLY: i16 = 128;

/// Mate scores live in [MATE_BASE - MAX_PLY, MATE_BASE]; normal evaluations
/// never reach this range. See search::defs for the derived thresholds.
pub const MATE_BASE: i16 = 30_000;

/// History capacity; generous enough for any game that will ever be played
/// interactively, cheap enough to allocate once per game.
pub const MAX_GAME_MOVES: usize = 2048;

pub const FEN_START_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
pub const FEN_KIWIPETE_POSITION: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

pub struct About;
impl About {
    pub const ENGINE: &'static str = "Sharpmate";
    pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");
    pub const AUTHOR: &'static str = "Matt Voce";
    pub const EMAIL: &'static str = "sharpmate@example.invalid";
    pub const WEBSITE: &'static str = "https://github.com/example/sharpmate";
}

/// Errors bubbled up from engine setup (FEN parsing, option handling) to the
/// UCI loop and to `main`.
pub type EngineRunResult = Result<(), String>;
