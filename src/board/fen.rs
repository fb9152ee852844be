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

use super::defs::Castling;
use super::Board;
use crate::defs::{Sides, FEN_START_POSITION};

const ERR_PARTS: &str = "FEN must have at least 4 space-separated parts";
const ERR_RANKS: &str = "FEN piece placement must have exactly 8 ranks";
const ERR_PIECE_CHAR: &str = "FEN piece placement contains an invalid character";
const ERR_ACTIVE_COLOR: &str = "FEN active color must be 'w' or 'b'";
const ERR_CASTLING: &str = "FEN castling field contains an invalid character";
const ERR_EN_PASSANT: &str = "FEN en passant square is invalid";
const ERR_HALFMOVE: &str = "FEN halfmove clock is not a valid number";
const ERR_FULLMOVE: &str = "FEN fullmove number is not a valid number";

impl Board {
    // Set up the board according to the given FEN string, or the normal
    // starting position if no FEN was given.
    pub fn fen_read(&mut self, fen: Option<&str>) -> Result<(), String> {
        let fen_string = fen.unwrap_or(FEN_START_POSITION).trim();
        let parts: Vec<&str> = fen_string.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(ERR_PARTS.to_string());
        }

        self.reset();

        self.fen_setup_piece_placement(parts[0])?;
        self.fen_setup_active_color(parts[1])?;
        self.fen_setup_castling(parts[2])?;
        self.fen_setup_en_passant(parts[3])?;

        self.game_state.halfmove_clock = match parts.get(4) {
            Some(s) => s.parse::<u8>().map_err(|_| ERR_HALFMOVE.to_string())?,
            None => 0,
        };

        self.game_state.fullmove_number = match parts.get(5) {
            Some(s) => s.parse::<u16>().map_err(|_| ERR_FULLMOVE.to_string())?,
            None => 1,
        };

        self.init();
        Ok(())
    }

    fn fen_setup_piece_placement(&mut self, field: &str) -> Result<(), String> {
        let ranks: Vec<&str> = field.split('/').collect();
        if ranks.len() != 8 {
            return Err(ERR_RANKS.to_string());
        }

        // FEN ranks run from rank 8 down to rank 1; square 0 (A1) is the
        // least significant bit, so the last FEN rank maps to rank index 0.
        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_from_top;
            let mut file = 0usize;

            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }

                if file >= 8 {
                    return Err(ERR_PIECE_CHAR.to_string());
                }

                let square = rank * 8 + file;
                let (side, piece) = Self::fen_char_to_piece(c).ok_or(ERR_PIECE_CHAR)?;
                self.bb_pieces[side][piece] |= 1u64 << square;
                file += 1;
            }
        }

        Ok(())
    }

    fn fen_char_to_piece(c: char) -> Option<(usize, usize)> {
        use super::defs::Pieces;

        let side = if c.is_ascii_uppercase() {
            Sides::WHITE
        } else {
            Sides::BLACK
        };

        let piece = match c.to_ascii_lowercase() {
            'k' => Pieces::KING,
            'q' => Pieces::QUEEN,
            'r' => Pieces::ROOK,
            'b' => Pieces::BISHOP,
            'n' => Pieces::KNIGHT,
            'p' => Pieces::PAWN,
            _ => return None,
        };

        Some((side, piece))
    }

    fn fen_setup_active_color(&mut self, field: &str) -> Result<(), String> {
        self.game_state.active_color = match field {
            "w" => Sides::WHITE as u8,
            "b" => Sides::BLACK as u8,
            _ => return Err(ERR_ACTIVE_COLOR.to_string()),
        };
        Ok(())
    }

    fn fen_setup_castling(&mut self, field: &str) -> Result<(), String> {
        let mut castling = 0u8;

        if field != "-" {
            for c in field.chars() {
                castling |= match c {
                    'K' => Castling::WK,
                    'Q' => Castling::WQ,
                    'k' => Castling::BK,
                    'q' => Castling::BQ,
                    _ => return Err(ERR_CASTLING.to_string()),
                };
            }
        }

        self.game_state.castling = castling;
        Ok(())
    }

    fn fen_setup_en_passant(&mut self, field: &str) -> Result<(), String> {
        if field == "-" {
            self.game_state.en_passant = None;
            return Ok(());
        }

        let mut chars = field.chars();
        let file_char = chars.next().ok_or(ERR_EN_PASSANT)?;
        let rank_char = chars.next().ok_or(ERR_EN_PASSANT)?;

        if chars.next().is_some() {
            return Err(ERR_EN_PASSANT.to_string());
        }

        if !('a'..='h').contains(&file_char) || !('1'..='8').contains(&rank_char) {
            return Err(ERR_EN_PASSANT.to_string());
        }

        let file = file_char as usize - 'a' as usize;
        let rank = rank_char as usize - '1' as usize;
        self.game_state.en_passant = Some((rank * 8 + file) as u8);
        Ok(())
    }

    // Serialize the current position back to a FEN string. Used by the
    // UCI "board" debug command and by tests.
    pub fn to_fen(&self) -> String {
        use super::defs::Pieces;

        let mut ranks = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut rank_str = String::new();
            let mut empty_run = 0;

            for file in 0..8 {
                let square = rank * 8 + file;
                let piece = self.piece_list[square];

                if piece == Pieces::NONE {
                    empty_run += 1;
                    continue;
                }

                if empty_run > 0 {
                    rank_str.push_str(&empty_run.to_string());
                    empty_run = 0;
                }

                let is_white = self.bb_side[Sides::WHITE] & (1u64 << square) != 0;
                let c = match piece {
                    Pieces::KING => 'k',
                    Pieces::QUEEN => 'q',
                    Pieces::ROOK => 'r',
                    Pieces::BISHOP => 'b',
                    Pieces::KNIGHT => 'n',
                    Pieces::PAWN => 'p',
                    _ => '?',
                };
                rank_str.push(if is_white { c.to_ascii_uppercase() } else { c });
            }

            if empty_run > 0 {
                rank_str.push_str(&empty_run.to_string());
            }

            ranks.push(rank_str);
        }

        let placement = ranks.join("/");
        let active_color = if self.us() == Sides::WHITE { "w" } else { "b" };

        let mut castling = String::new();
        if self.game_state.castling & Castling::WK != 0 {
            castling.push('K');
        }
        if self.game_state.castling & Castling::WQ != 0 {
            castling.push('Q');
        }
        if self.game_state.castling & Castling::BK != 0 {
            castling.push('k');
        }
        if self.game_state.castling & Castling::BQ != 0 {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = match self.game_state.en_passant {
            Some(square) => {
                let file = (square as usize % 8) as u8 + b'a';
                let rank = (square as usize / 8) as u8 + b'1';
                format!("{}{}", file as char, rank as char)
            }
            None => "-".to_string(),
        };

        format!(
            "{} {} {} {} {} {}",
            placement,
            active_color,
            castling,
            en_passant,
            self.game_state.halfmove_clock,
            self.game_state.fullmove_number
        )
    }
}
