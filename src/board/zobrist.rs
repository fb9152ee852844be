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

use crate::defs::{NrOf, Piece, Side, Sides, Square};
use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};

pub type ZobristKey = u64;

// Fixed seed: the key space only needs to be collision-free across one
// running process, not reproducible across engine versions, so any fixed
// seed works. Using a fixed one instead of OS randomness keeps startup
// deterministic and avoids pulling in getrandom.
const ZOBRIST_SEED: u64 = 0x5347_4841_5250_4D54;

#[derive(Clone)]
pub struct ZobristRandoms {
    rnd_pieces: [[[ZobristKey; NrOf::SQUARES]; NrOf::PIECE_TYPES]; Sides::BOTH],
    rnd_castling: [ZobristKey; NrOf::CASTLING_PERMISSIONS],
    rnd_side: [ZobristKey; Sides::BOTH],
    rnd_en_passant: [ZobristKey; NrOf::SQUARES + 1],
}

impl ZobristRandoms {
    pub fn new() -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(ZOBRIST_SEED);
        let mut zr = Self {
            rnd_pieces: [[[0; NrOf::SQUARES]; NrOf::PIECE_TYPES]; Sides::BOTH],
            rnd_castling: [0; NrOf::CASTLING_PERMISSIONS],
            rnd_side: [0; Sides::BOTH],
            rnd_en_passant: [0; NrOf::SQUARES + 1],
        };

        for side in zr.rnd_pieces.iter_mut() {
            for piece in side.iter_mut() {
                for square in piece.iter_mut() {
                    *square = rng.next_u64();
                }
            }
        }

        for permission in zr.rnd_castling.iter_mut() {
            *permission = rng.next_u64();
        }

        for side in zr.rnd_side.iter_mut() {
            *side = rng.next_u64();
        }

        for square in zr.rnd_en_passant.iter_mut() {
            *square = rng.next_u64();
        }

        zr
    }

    pub fn piece(&self, side: Side, piece: Piece, square: Square) -> ZobristKey {
        self.rnd_pieces[side][piece][square]
    }

    pub fn castling(&self, castling_permissions: u8) -> ZobristKey {
        debug_assert!((castling_permissions as usize) < NrOf::CASTLING_PERMISSIONS);
        self.rnd_castling[castling_permissions as usize]
    }

    pub fn side(&self, side: Side) -> ZobristKey {
        self.rnd_side[side]
    }

    pub fn en_passant(&self, en_passant: Option<u8>) -> ZobristKey {
        match en_passant {
            Some(square) => self.rnd_en_passant[square as usize],
            None => self.rnd_en_passant[NrOf::SQUARES],
        }
    }
}

impl Default for ZobristRandoms {
    fn default() -> Self {
        Self::new()
    }
}
