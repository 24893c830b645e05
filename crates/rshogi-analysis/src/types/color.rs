//! 手番（Color）

/// 先手/後手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    pub const NUM: usize = 2;

    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// 配列アクセス用
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 先手視点の符号（先手 +1, 後手 -1）
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::Black => 1,
            Color::White => -1,
        }
    }

    #[inline]
    pub const fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.opponent()
    }
}
