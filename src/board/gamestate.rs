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

use super::zobrist::ZobristKey;
use crate::defs::Sides;
use crate::movegen::Move;

// GameState doubles as the board's irreversible-state record and as the
// per-ply undo entry pushed onto History. make() pushes the state as it
// was *before* playing a move, together with that move; unmake() pops it,
// uses the move to put pieces back, then restores every field verbatim.
#[derive(Copy, Clone, Debug)]
pub struct GameState {
    pub active_color: u8,
    pub castling: u8,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u8,
    pub fullmove_number: u16,
    pub zobrist_key: ZobristKey,

    // Incrementally maintained evaluation terms, restored on unmake() so
    // the evaluator never has to recompute them from scratch mid-search.
    pub psqt: [i16; Sides::BOTH],
    pub pawn_hash: u64,
    pub pawn_structure_score: i16,
    pub game_phase: i16,
    pub mobility_score: i16,

    // The move played to leave this state. Unset (default) for the state
    // at the root of the history stack.
    pub next_move: Move,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            active_color: Sides::WHITE as u8,
            castling: 0,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            zobrist_key: 0,
            psqt: [0, 0],
            pawn_hash: 0,
            pawn_structure_score: 0,
            game_phase: 0,
            mobility_score: 0,
            next_move: Move::default(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
