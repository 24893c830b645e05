//! 方向と利きの通り道
//!
//! 升から各方向へ盤端まで伸ばした升集合を起動時に一度だけ作る。

use lazy_static::lazy_static;

use super::Bitboard;
use crate::types::Square;

/// 8方向（先手から見た上下左右）
///
/// 「上」は段が小さくなる方向（先手の前方）、「左」は筋が大きくなる方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
    LeftUp = 4,
    LeftDown = 5,
    RightUp = 6,
    RightDown = 7,
}

impl Direction {
    pub const NUM: usize = 8;

    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::LeftUp,
        Direction::LeftDown,
        Direction::RightUp,
        Direction::RightDown,
    ];

    /// (筋の増分, 段の増分)
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (1, 0),
            Direction::Right => (-1, 0),
            Direction::LeftUp => (1, -1),
            Direction::LeftDown => (1, 1),
            Direction::RightUp => (-1, -1),
            Direction::RightDown => (-1, 1),
        }
    }

    /// 升番号の増分
    #[inline]
    pub const fn offset(self) -> i8 {
        let (df, dr) = self.delta();
        df * 9 + dr
    }

    #[inline]
    pub const fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::LeftUp => Direction::RightDown,
            Direction::LeftDown => Direction::RightUp,
            Direction::RightUp => Direction::LeftDown,
            Direction::RightDown => Direction::LeftUp,
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        let (df, dr) = self.delta();
        df != 0 && dr != 0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// `from` から `to` へ一直線に進む方向（同じ升・直線上にない場合はNone）
    pub fn between(from: Square, to: Square) -> Option<Direction> {
        let df = to.file() as i8 - from.file() as i8;
        let dr = to.rank() as i8 - from.rank() as i8;
        if df == 0 && dr == 0 {
            return None;
        }
        if df != 0 && dr != 0 && df.abs() != dr.abs() {
            return None;
        }
        let step = (df.signum(), dr.signum());
        Direction::ALL.into_iter().find(|d| d.delta() == step)
    }
}

lazy_static! {
    static ref RAYS: [[Bitboard; Direction::NUM]; Square::NUM] = {
        let mut rays = [[Bitboard::EMPTY; Direction::NUM]; Square::NUM];
        for sq in Square::all() {
            for dir in Direction::ALL {
                let (df, dr) = dir.delta();
                let mut bb = Bitboard::EMPTY;
                let mut cur = sq.offset(df, dr);
                while let Some(s) = cur {
                    bb.set(s);
                    cur = s.offset(df, dr);
                }
                rays[sq.index()][dir.index()] = bb;
            }
        }
        rays
    };
}

/// `sq` から `dir` 方向に盤端まで（`sq` 自身は含まない）
#[inline]
pub fn ray(sq: Square, dir: Direction) -> Bitboard {
    RAYS[sq.index()][dir.index()]
}

impl Bitboard {
    /// `sq` から `dir` 方向に見て最初にある駒の升
    #[inline]
    pub fn nearest_blocker(sq: Square, dir: Direction, occupied: Bitboard) -> Option<Square> {
        let hits = ray(sq, dir) & occupied;
        if dir.offset() > 0 { hits.lsb() } else { hits.msb() }
    }
}
