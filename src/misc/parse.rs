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

use crate::board::defs::Pieces;
use crate::board::utils::algebraic_to_square;
use crate::defs::{Piece, Square};

// A move as parsed off the wire, before it has been checked against the
// list of actually-legal moves for the current position.
#[derive(Copy, Clone, Debug)]
pub struct PotentialMove {
    pub from: Square,
    pub to: Square,
    pub promoted: Piece,
}

const ERR_LENGTH: &str = "move must be 4 or 5 characters long";
const ERR_SQUARE: &str = "move contains an invalid square";
const ERR_PROMOTION: &str = "move contains an invalid promotion piece";

// Parse UCI long algebraic notation, e.g. "e2e4" or "e7e8q".
pub fn algebraic_move_to_number(move_string: &str) -> Result<PotentialMove, String> {
    let length = move_string.len();
    if length != 4 && length != 5 {
        return Err(ERR_LENGTH.to_string());
    }

    let from = algebraic_to_square(&move_string[0..2]).ok_or(ERR_SQUARE)?;
    let to = algebraic_to_square(&move_string[2..4]).ok_or(ERR_SQUARE)?;

    let promoted = if length == 5 {
        match move_string.chars().nth(4).unwrap() {
            'q' => Pieces::QUEEN,
            'r' => Pieces::ROOK,
            'b' => Pieces::BISHOP,
            'n' => Pieces::KNIGHT,
            _ => return Err(ERR_PROMOTION.to_string()),
        }
    } else {
        Pieces::NONE
    };

    Ok(PotentialMove { from, to, promoted })
}
