//! 手駒（Hand）

use super::PieceType;

/// 手駒（32bit packed）
///
/// 歩5bit、香・桂・銀・金3bit、角・飛2bitを下位から順に詰める。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Hand(u32);

/// (shift, mask) を `PieceType::HAND_PIECES` の順で並べたもの
const LAYOUT: [(u32, u32); 7] = [
    (0, 0x1F),
    (5, 0x07),
    (8, 0x07),
    (11, 0x07),
    (14, 0x07),
    (17, 0x03),
    (19, 0x03),
];

impl Hand {
    pub const EMPTY: Hand = Hand(0);

    /// 駒種ごとの最大枚数
    #[inline]
    pub const fn max_count(pt: PieceType) -> u32 {
        match pt {
            PieceType::Pawn => 18,
            PieceType::Bishop | PieceType::Rook => 2,
            _ => 4,
        }
    }

    #[inline]
    pub const fn count(self, pt: PieceType) -> u32 {
        let (shift, mask) = Self::layout(pt);
        (self.0 >> shift) & mask
    }

    #[inline]
    pub const fn has(self, pt: PieceType) -> bool {
        self.count(pt) > 0
    }

    #[inline]
    pub const fn add(self, pt: PieceType) -> Hand {
        debug_assert!(self.count(pt) < Self::max_count(pt));
        let (shift, _) = Self::layout(pt);
        Hand(self.0 + (1 << shift))
    }

    #[inline]
    pub const fn sub(self, pt: PieceType) -> Hand {
        debug_assert!(self.has(pt));
        let (shift, _) = Self::layout(pt);
        Hand(self.0 - (1 << shift))
    }

    #[inline]
    pub const fn set(self, pt: PieceType, count: u32) -> Hand {
        let (shift, mask) = Self::layout(pt);
        Hand((self.0 & !(mask << shift)) | ((count & mask) << shift))
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    const fn layout(pt: PieceType) -> (u32, u32) {
        match pt {
            PieceType::Pawn => LAYOUT[0],
            PieceType::Lance => LAYOUT[1],
            PieceType::Knight => LAYOUT[2],
            PieceType::Silver => LAYOUT[3],
            PieceType::Gold => LAYOUT[4],
            PieceType::Bishop => LAYOUT[5],
            PieceType::Rook => LAYOUT[6],
            // 玉・成駒は手駒にならない
            _ => (0, 0),
        }
    }
}
