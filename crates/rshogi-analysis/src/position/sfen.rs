//! SFEN形式の解析・出力

use thiserror::Error;

use super::Position;
use crate::types::{Color, Piece, PieceType, Square};

/// 平手初期局面のSFEN
pub const SFEN_HIRATE: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

/// SFENパースエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SfenError {
    #[error("Invalid board: {0}")]
    Board(String),
    #[error("Invalid side to move: {0}")]
    SideToMove(String),
    #[error("Invalid hand: {0}")]
    Hand(String),
    #[error("Invalid ply: {0}")]
    Ply(String),
}

/// 手駒の出力順
const HAND_ORDER: [PieceType; 7] = [
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Gold,
    PieceType::Silver,
    PieceType::Knight,
    PieceType::Lance,
    PieceType::Pawn,
];

impl Position {
    /// SFEN文字列から局面を作る
    pub fn from_sfen(sfen: &str) -> Result<Position, SfenError> {
        let mut pos = Position::new();

        let parts: Vec<&str> = sfen.split_whitespace().collect();
        if parts.len() < 3 {
            return Err(SfenError::Board("SFEN must have at least 3 parts".to_string()));
        }

        pos.parse_board(parts[0])?;

        pos.side_to_move = match parts[1] {
            "b" => Color::Black,
            "w" => Color::White,
            other => {
                return Err(SfenError::SideToMove(format!("Expected 'b' or 'w', got '{other}'")));
            }
        };

        pos.parse_hand(parts[2])?;

        pos.game_ply = match parts.get(3) {
            Some(ply) => ply.parse().map_err(|_| SfenError::Ply(ply.to_string()))?,
            None => 1,
        };

        pos.recompute_keys();
        Ok(pos)
    }

    /// 現局面のSFEN文字列
    pub fn to_sfen(&self) -> String {
        let mut result = String::new();

        for rank in 0..9u8 {
            let mut empty_count = 0;
            for file in (0..9u8).rev() {
                let pc = self.piece_on(Square::new(file, rank));
                if pc.is_none() {
                    empty_count += 1;
                    continue;
                }
                if empty_count > 0 {
                    result.push_str(&empty_count.to_string());
                    empty_count = 0;
                }
                result.push_str(&piece_to_sfen(pc));
            }
            if empty_count > 0 {
                result.push_str(&empty_count.to_string());
            }
            if rank < 8 {
                result.push('/');
            }
        }

        result.push(' ');
        result.push(if self.side_to_move == Color::Black { 'b' } else { 'w' });

        result.push(' ');
        let hand_str = self.hand_to_sfen();
        if hand_str.is_empty() {
            result.push('-');
        } else {
            result.push_str(&hand_str);
        }

        result.push(' ');
        result.push_str(&self.game_ply.to_string());
        result
    }

    fn parse_board(&mut self, board_str: &str) -> Result<(), SfenError> {
        let ranks: Vec<&str> = board_str.split('/').collect();
        if ranks.len() != 9 {
            return Err(SfenError::Board(format!("Expected 9 ranks, got {}", ranks.len())));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            // 9筋から開始
            let mut file_idx = 8i32;
            let mut promoted = false;

            for c in rank_str.chars() {
                if c == '+' {
                    promoted = true;
                    continue;
                }

                if let Some(digit) = c.to_digit(10) {
                    file_idx -= digit as i32;
                    if file_idx < -1 {
                        return Err(SfenError::Board(format!(
                            "Too many squares in rank {rank_idx}"
                        )));
                    }
                    continue;
                }

                if file_idx < 0 {
                    return Err(SfenError::Board(format!("Too many pieces in rank {rank_idx}")));
                }
                let sq = Square::new(file_idx as u8, rank_idx as u8);
                let pc = sfen_char_to_piece(c, promoted)?;
                if !Position::can_stand(pc, sq) {
                    return Err(SfenError::Board(format!("Dead piece {c} at {sq}")));
                }
                if pc.piece_type() == PieceType::King && self.king_square(pc.color()).is_some() {
                    return Err(SfenError::Board("Duplicate king".to_string()));
                }
                self.put_piece(pc, sq);

                promoted = false;
                file_idx -= 1;
            }

            if file_idx != -1 {
                return Err(SfenError::Board(format!(
                    "Rank {rank_idx} has wrong number of squares"
                )));
            }
        }

        Ok(())
    }

    fn parse_hand(&mut self, hand_str: &str) -> Result<(), SfenError> {
        if hand_str == "-" {
            return Ok(());
        }

        let mut count = 0u32;
        for c in hand_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                count = count * 10 + digit;
                continue;
            }
            let (color, pt) = sfen_hand_char_to_piece(c)?;
            let total = self.hand(color).count(pt) + count.max(1);
            if total > crate::types::Hand::max_count(pt) {
                return Err(SfenError::Hand(format!("Too many {c} in hand")));
            }
            self.set_hand(color, pt, total);
            count = 0;
        }

        Ok(())
    }

    fn hand_to_sfen(&self) -> String {
        let mut result = String::new();
        for color in Color::ALL {
            for pt in HAND_ORDER {
                let cnt = self.hand(color).count(pt);
                if cnt == 0 {
                    continue;
                }
                if cnt > 1 {
                    result.push_str(&cnt.to_string());
                }
                let c = pt.to_usi_char();
                result.push(if color == Color::Black { c } else { c.to_ascii_lowercase() });
            }
        }
        result
    }
}

fn piece_to_sfen(pc: Piece) -> String {
    let pt = pc.piece_type();
    let base = pt.unpromote().to_usi_char();
    let c = if pc.color() == Color::White { base.to_ascii_lowercase() } else { base };
    if pt.is_promoted() { format!("+{c}") } else { c.to_string() }
}

fn sfen_char_to_piece(c: char, promoted: bool) -> Result<Piece, SfenError> {
    let color = if c.is_ascii_uppercase() { Color::Black } else { Color::White };
    let base_pt = PieceType::from_usi_char(c.to_ascii_uppercase())
        .ok_or_else(|| SfenError::Board(format!("Unknown piece: {c}")))?;
    let pt = if promoted {
        base_pt.promote().ok_or_else(|| SfenError::Board(format!("Cannot promote: {c}")))?
    } else {
        base_pt
    };
    Ok(Piece::new(color, pt))
}

fn sfen_hand_char_to_piece(c: char) -> Result<(Color, PieceType), SfenError> {
    let color = if c.is_ascii_uppercase() { Color::Black } else { Color::White };
    match PieceType::from_usi_char(c.to_ascii_uppercase()) {
        Some(pt) if PieceType::HAND_PIECES.contains(&pt) => Ok((color, pt)),
        _ => Err(SfenError::Hand(format!("Unknown hand piece: {c}"))),
    }
}
