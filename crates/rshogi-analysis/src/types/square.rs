//! 升目（Square）

/// 升目（0-80）
///
/// 筋ごとに9升ずつ並ぶ縦型配置。
/// SQ_11(1一)=0, SQ_12(1二)=1, ..., SQ_19(1九)=8, SQ_21(2一)=9, ...
///
/// 段0は盤面の上端（後手陣）。先手の駒は段が小さくなる方向へ進む。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    pub const NUM: usize = 81;

    /// 1一
    pub const SQ_11: Square = Square(0);
    /// 5五
    pub const SQ_55: Square = Square(40);
    /// 9九
    pub const SQ_99: Square = Square(80);

    /// 筋(0-8)と段(0-8)から生成
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Square {
        debug_assert!(file < 9 && rank < 9);
        Square(file * 9 + rank)
    }

    #[inline]
    pub const fn from_u8(n: u8) -> Option<Square> {
        if n < 81 { Some(Square(n)) } else { None }
    }

    /// 筋（0 = 1筋, 8 = 9筋）
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 / 9
    }

    /// 段（0 = 一段, 8 = 九段）
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 % 9
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// 180度回転
    #[inline]
    pub const fn inverse(self) -> Square {
        Square(80 - self.0)
    }

    /// 左右反転（5筋軸）
    #[inline]
    pub const fn mirror(self) -> Square {
        Square((8 - self.file()) * 9 + self.rank())
    }

    /// 筋・段方向にずらした升（盤外ならNone）
    #[inline]
    pub const fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Square> {
        let f = self.file() as i8 + file_delta;
        let r = self.rank() as i8 + rank_delta;
        if f < 0 || f > 8 || r < 0 || r > 8 {
            None
        } else {
            Some(Square::new(f as u8, r as u8))
        }
    }

    /// USI形式（"7g"等）
    pub fn to_usi(self) -> String {
        let file = (b'1' + self.file()) as char;
        let rank = (b'a' + self.rank()) as char;
        format!("{file}{rank}")
    }

    pub fn from_usi(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].checked_sub(b'1').filter(|f| *f < 9)?;
        let rank = bytes[1].checked_sub(b'a').filter(|r| *r < 9)?;
        Some(Square::new(file, rank))
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..81).map(Square)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_usi())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_layout() {
        assert_eq!(Square::new(0, 0), Square::SQ_11);
        assert_eq!(Square::new(4, 4), Square::SQ_55);
        assert_eq!(Square::new(8, 8), Square::SQ_99);
        let sq = Square::new(2, 6);
        assert_eq!((sq.file(), sq.rank()), (2, 6));
    }

    #[test]
    fn test_square_inverse_mirror() {
        assert_eq!(Square::SQ_11.inverse(), Square::SQ_99);
        assert_eq!(Square::SQ_55.inverse(), Square::SQ_55);
        assert_eq!(Square::new(0, 4).mirror(), Square::new(8, 4));
        for sq in Square::all() {
            assert_eq!(sq.inverse().inverse(), sq);
        }
    }

    #[test]
    fn test_square_offset() {
        assert_eq!(Square::SQ_11.offset(0, -1), None);
        assert_eq!(Square::SQ_11.offset(1, 1), Some(Square::new(1, 1)));
        assert_eq!(Square::SQ_99.offset(1, 0), None);
    }

    #[test]
    fn test_square_usi() {
        assert_eq!(Square::new(6, 6).to_usi(), "7g");
        assert_eq!(Square::from_usi("1a"), Some(Square::SQ_11));
        assert_eq!(Square::from_usi("9i"), Some(Square::SQ_99));
        assert_eq!(Square::from_usi("0a"), None);
        assert_eq!(Square::from_usi("1j"), None);
        assert_eq!(Square::from_usi(""), None);
    }
}
