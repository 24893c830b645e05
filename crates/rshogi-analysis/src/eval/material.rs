//! 駒割り（Material）
//!
//! 駒価値はApery(WCSC26)準拠。

use crate::position::Position;
use crate::types::{Color, PieceType, Value};

/// 盤上の駒の価値
#[inline]
pub const fn piece_value(pt: PieceType) -> i32 {
    match pt {
        PieceType::Pawn => 90,
        PieceType::Lance => 315,
        PieceType::Knight => 405,
        PieceType::Silver => 495,
        PieceType::Bishop => 855,
        PieceType::Rook => 990,
        PieceType::Gold => 540,
        PieceType::King => 15000,
        PieceType::ProPawn => 540,
        PieceType::ProLance => 540,
        PieceType::ProKnight => 540,
        PieceType::ProSilver => 540,
        PieceType::Horse => 945,
        PieceType::Dragon => 1395,
    }
}

/// 手駒になったときの価値（玉は手駒にならないので0）
#[inline]
pub const fn hand_value(pt: PieceType) -> i32 {
    match pt.unpromote() {
        PieceType::King => 0,
        base => piece_value(base),
    }
}

/// 駒を取ったときの駒割りの変化量（相手から消える分 + 自分の手駒に増える分）
#[inline]
pub const fn exchange_value(pt: PieceType) -> i32 {
    piece_value(pt) + hand_value(pt)
}

/// 成ったときの駒割りの変化量
#[inline]
pub const fn promote_value(pt: PieceType) -> i32 {
    match pt.promote() {
        Some(promoted) => piece_value(promoted) - piece_value(pt),
        None => 0,
    }
}

/// 駒割りを最初から計算する（先手から見た値、玉は数えない）
pub fn evaluate_material(pos: &Position) -> Value {
    let mut score = 0i32;

    for sq in pos.occupied() {
        let pc = pos.piece_on(sq);
        let pt = pc.piece_type();
        if pt == PieceType::King {
            continue;
        }
        score += pc.color().sign() * piece_value(pt);
    }

    for color in Color::ALL {
        let hand = pos.hand(color);
        for pt in PieceType::HAND_PIECES {
            score += color.sign() * hand.count(pt) as i32 * piece_value(pt);
        }
    }

    Value::new(score)
}
