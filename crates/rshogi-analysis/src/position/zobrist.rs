//! Zobristハッシュ
//!
//! 盤上の駒はXOR、手駒は枚数分を加算する（同じ駒を何枚持っても衝突しにくい）。

use crate::types::{Color, Piece, PieceType, Square};

const HAND_KINDS: usize = 7;

/// Zobristハッシュ用乱数テーブル
pub struct Zobrist {
    /// 手番用
    pub side: u64,
    /// 駒×升 [Piece.index()][Square.index()]
    pub psq: [[u64; Square::NUM]; Piece::NUM],
    /// 手駒（加算型）[Color][手駒の並び順]
    pub hand: [[u64; HAND_KINDS]; Color::NUM],
}

impl Zobrist {
    /// テーブル初期化
    pub const fn init() -> Self {
        let mut zobrist = Zobrist {
            side: 0,
            psq: [[0; Square::NUM]; Piece::NUM],
            hand: [[0; HAND_KINDS]; Color::NUM],
        };

        let mut seed = 0x1234_5678_90AB_CDEFu64;

        seed = xorshift64(seed);
        zobrist.side = seed;

        // pc == 0 (Piece::NONE) は0のまま
        let mut pc = 1;
        while pc < Piece::NUM {
            let mut sq = 0;
            while sq < Square::NUM {
                seed = xorshift64(seed);
                zobrist.psq[pc][sq] = seed;
                sq += 1;
            }
            pc += 1;
        }

        let mut c = 0;
        while c < Color::NUM {
            let mut pt = 0;
            while pt < HAND_KINDS {
                seed = xorshift64(seed);
                zobrist.hand[c][pt] = seed;
                pt += 1;
            }
            c += 1;
        }

        zobrist
    }
}

const fn xorshift64(mut x: u64) -> u64 {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

pub static ZOBRIST: Zobrist = Zobrist::init();

#[inline]
pub fn zobrist_psq(pc: Piece, sq: Square) -> u64 {
    ZOBRIST.psq[pc.index()][sq.index()]
}

/// 手駒1枚ぶんのキー（成駒・玉は0）
#[inline]
pub fn zobrist_hand(color: Color, pt: PieceType) -> u64 {
    match hand_index(pt) {
        Some(idx) => ZOBRIST.hand[color.index()][idx],
        None => 0,
    }
}

#[inline]
pub fn zobrist_side() -> u64 {
    ZOBRIST.side
}

const fn hand_index(pt: PieceType) -> Option<usize> {
    match pt {
        PieceType::Pawn => Some(0),
        PieceType::Lance => Some(1),
        PieceType::Knight => Some(2),
        PieceType::Silver => Some(3),
        PieceType::Gold => Some(4),
        PieceType::Bishop => Some(5),
        PieceType::Rook => Some(6),
        _ => None,
    }
}
