//! 指し手（Move）

use super::{Piece, PieceType, Square};

/// 指し手（32bit）
///
/// - bit 0-6:   移動先 (to)
/// - bit 7-13:  移動元 (from) / 駒打ちの場合は打つ駒種
/// - bit 14:    駒打ちフラグ
/// - bit 15:    成りフラグ
/// - bit 16-19: 動かした駒種（成る前）
/// - bit 20-24: 取った駒（`Piece` の内部値、先後付き）
///
/// 評価関数の差分計算と SEE が必要とする情報をすべて持たせている。
/// 合法性は検査しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Move(u32);

impl Move {
    pub const NONE: Move = Move(0);

    const TO_MASK: u32 = 0x7F;
    const FROM_SHIFT: u32 = 7;
    const FROM_MASK: u32 = 0x7F << Self::FROM_SHIFT;
    const DROP_FLAG: u32 = 1 << 14;
    const PROMOTE_FLAG: u32 = 1 << 15;
    const PIECE_SHIFT: u32 = 16;
    const CAPTURED_SHIFT: u32 = 20;

    /// 盤上の駒の移動
    #[inline]
    pub const fn normal(
        from: Square,
        to: Square,
        piece_type: PieceType,
        captured: Piece,
        promote: bool,
    ) -> Move {
        let mut m = to.raw() as u32
            | ((from.raw() as u32) << Self::FROM_SHIFT)
            | ((piece_type as u32) << Self::PIECE_SHIFT)
            | ((captured.raw() as u32) << Self::CAPTURED_SHIFT);
        if promote {
            m |= Self::PROMOTE_FLAG;
        }
        Move(m)
    }

    /// 駒打ち
    #[inline]
    pub const fn drop(piece_type: PieceType, to: Square) -> Move {
        Move(
            to.raw() as u32
                | ((piece_type as u32) << Self::FROM_SHIFT)
                | Self::DROP_FLAG
                | ((piece_type as u32) << Self::PIECE_SHIFT),
        )
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn to(self) -> Square {
        match Square::from_u8((self.0 & Self::TO_MASK) as u8) {
            Some(sq) => sq,
            None => panic!("corrupted move destination"),
        }
    }

    /// 移動元（駒打ちに対して呼ぶのは契約違反）
    #[inline]
    pub const fn from(self) -> Square {
        debug_assert!(!self.is_drop());
        match Square::from_u8(((self.0 & Self::FROM_MASK) >> Self::FROM_SHIFT) as u8) {
            Some(sq) => sq,
            None => panic!("corrupted move origin"),
        }
    }

    #[inline]
    pub const fn is_drop(self) -> bool {
        self.0 & Self::DROP_FLAG != 0
    }

    #[inline]
    pub const fn is_promote(self) -> bool {
        self.0 & Self::PROMOTE_FLAG != 0
    }

    /// 動かした駒種（成る前）
    #[inline]
    pub const fn piece_type(self) -> PieceType {
        match PieceType::from_u8(((self.0 >> Self::PIECE_SHIFT) & 0x0F) as u8) {
            Some(pt) => pt,
            None => panic!("piece_type() called on Move::NONE"),
        }
    }

    /// 移動後の駒種
    #[inline]
    pub const fn piece_type_after(self) -> PieceType {
        let pt = self.piece_type();
        if self.is_promote() {
            match pt.promote() {
                Some(promoted) => promoted,
                None => pt,
            }
        } else {
            pt
        }
    }

    /// 取った駒（取らない手では `Piece::NONE`）
    #[inline]
    pub const fn captured(self) -> Piece {
        match Piece::from_raw(((self.0 >> Self::CAPTURED_SHIFT) & 0x1F) as u8) {
            Some(pc) => pc,
            None => Piece::NONE,
        }
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured().is_some()
    }

    #[inline]
    pub const fn is_king_move(self) -> bool {
        !self.is_drop() && matches!(self.piece_type(), PieceType::King)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// USI形式（"7g7f", "P*5e", "8h2b+"）
    pub fn to_usi(self) -> String {
        if self.is_none() {
            return "none".to_string();
        }
        if self.is_drop() {
            return format!("{}*{}", self.piece_type().to_usi_char(), self.to());
        }
        let promote = if self.is_promote() { "+" } else { "" };
        format!("{}{}{promote}", self.from(), self.to())
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::NONE
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_usi())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_normal_fields() {
        let from = Square::new(7, 7);
        let to = Square::new(1, 1);
        let mv = Move::normal(from, to, PieceType::Bishop, Piece::W_BISHOP, true);
        assert_eq!(mv.from(), from);
        assert_eq!(mv.to(), to);
        assert_eq!(mv.piece_type(), PieceType::Bishop);
        assert_eq!(mv.piece_type_after(), PieceType::Horse);
        assert_eq!(mv.captured(), Piece::W_BISHOP);
        assert!(mv.is_promote());
        assert!(!mv.is_drop());
        assert_eq!(mv.to_usi(), "8h2b+");
    }

    #[test]
    fn test_move_drop_fields() {
        let mv = Move::drop(PieceType::Pawn, Square::SQ_55);
        assert!(mv.is_drop());
        assert!(!mv.is_capture());
        assert!(!mv.is_king_move());
        assert_eq!(mv.piece_type(), PieceType::Pawn);
        assert_eq!(mv.to_usi(), "P*5e");
    }

    #[test]
    fn test_move_king() {
        let mv = Move::normal(Square::new(4, 8), Square::new(4, 7), PieceType::King, Piece::NONE, false);
        assert!(mv.is_king_move());
        assert_eq!(mv.captured(), Piece::NONE);
    }
}
