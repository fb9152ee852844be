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

use super::Board;
use crate::defs::Square;

impl Board {
    // Split a square into (file, rank), both 0-indexed.
    pub fn square_on_file_rank(square: Square) -> (u8, u8) {
        ((square % 8) as u8, (square / 8) as u8)
    }
}

// Square <-> algebraic notation conversions, shared by the FEN reader, the
// move parser, and the UCI "position"/"go" command handling.

pub fn algebraic_to_square(algebraic: &str) -> Option<Square> {
    let mut chars = algebraic.chars();
    let file = chars.next()?;
    let rank = chars.next()?;

    if chars.next().is_some() {
        return None;
    }

    if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return None;
    }

    let file = file as usize - 'a' as usize;
    let rank = rank as usize - '1' as usize;
    Some(rank * 8 + file)
}

pub fn square_to_algebraic(square: Square) -> String {
    let file = (b'a' + (square % 8) as u8) as char;
    let rank = (b'1' + (square / 8) as u8) as char;
    format!("{file}{rank}")
}
