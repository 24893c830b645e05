//! 駒（Piece）
//!
//! bit 0-3 が `PieceType`、bit 4 が `Color`。0 は駒なし。

use super::{Color, PieceType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Piece(u8);

impl Piece {
    pub const NONE: Piece = Piece(0);

    pub const B_PAWN: Piece = Piece::new(Color::Black, PieceType::Pawn);
    pub const B_LANCE: Piece = Piece::new(Color::Black, PieceType::Lance);
    pub const B_KNIGHT: Piece = Piece::new(Color::Black, PieceType::Knight);
    pub const B_SILVER: Piece = Piece::new(Color::Black, PieceType::Silver);
    pub const B_GOLD: Piece = Piece::new(Color::Black, PieceType::Gold);
    pub const B_BISHOP: Piece = Piece::new(Color::Black, PieceType::Bishop);
    pub const B_ROOK: Piece = Piece::new(Color::Black, PieceType::Rook);
    pub const B_KING: Piece = Piece::new(Color::Black, PieceType::King);
    pub const W_PAWN: Piece = Piece::new(Color::White, PieceType::Pawn);
    pub const W_LANCE: Piece = Piece::new(Color::White, PieceType::Lance);
    pub const W_KNIGHT: Piece = Piece::new(Color::White, PieceType::Knight);
    pub const W_SILVER: Piece = Piece::new(Color::White, PieceType::Silver);
    pub const W_GOLD: Piece = Piece::new(Color::White, PieceType::Gold);
    pub const W_BISHOP: Piece = Piece::new(Color::White, PieceType::Bishop);
    pub const W_ROOK: Piece = Piece::new(Color::White, PieceType::Rook);
    pub const W_KING: Piece = Piece::new(Color::White, PieceType::King);

    /// 配列サイズ用（NONEを含む）
    pub const NUM: usize = 31;

    #[inline]
    pub const fn new(color: Color, piece_type: PieceType) -> Piece {
        Piece(piece_type as u8 | ((color as u8) << 4))
    }

    /// 駒種（NONEに対して呼ぶのは契約違反）
    #[inline]
    pub const fn piece_type(self) -> PieceType {
        match PieceType::from_u8(self.0 & 0x0F) {
            Some(pt) => pt,
            None => panic!("piece_type() called on Piece::NONE"),
        }
    }

    #[inline]
    pub const fn color(self) -> Color {
        if self.0 & 0x10 == 0 { Color::Black } else { Color::White }
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    /// 先後反転
    #[inline]
    pub const fn flip(self) -> Piece {
        if self.is_none() { self } else { Piece(self.0 ^ 0x10) }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// 内部値から生成（不正値はNone）
    #[inline]
    pub const fn from_raw(raw: u8) -> Option<Piece> {
        if raw == 0 {
            return Some(Piece::NONE);
        }
        if raw & !0x1F != 0 || PieceType::from_u8(raw & 0x0F).is_none() {
            return None;
        }
        Some(Piece(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_layout() {
        assert_eq!(Piece::B_PAWN.raw(), 1);
        assert_eq!(Piece::W_PAWN.raw(), 17);
        assert_eq!(Piece::W_KING.piece_type(), PieceType::King);
        assert_eq!(Piece::W_KING.color(), Color::White);
        assert_eq!(Piece::B_GOLD.color(), Color::Black);
    }

    #[test]
    fn test_piece_flip() {
        assert_eq!(Piece::B_ROOK.flip(), Piece::W_ROOK);
        assert_eq!(Piece::W_LANCE.flip(), Piece::B_LANCE);
        assert_eq!(Piece::NONE.flip(), Piece::NONE);
    }

    #[test]
    fn test_piece_from_raw() {
        assert_eq!(Piece::from_raw(0), Some(Piece::NONE));
        assert_eq!(Piece::from_raw(30), Some(Piece::new(Color::White, PieceType::Dragon)));
        assert_eq!(Piece::from_raw(15), None);
        assert_eq!(Piece::from_raw(0x21), None);
    }
}
