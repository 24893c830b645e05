//! 静的駒交換評価（SEE）
//!
//! 取られる升に利いている駒を両手番について安い順に並べ、
//! 互いに一番安い駒で取り返し合ったときの損得を alpha-beta で求める。
//! 各手番は損になる取り返しをせずに止められる。
//!
//! ## モジュール構成
//! - `attackers` - 利いている駒の列挙（x-ray を含む）
//! - `tests` - 局面を使ったテスト

mod attackers;

#[cfg(test)]
mod tests;

use smallvec::SmallVec;

use crate::eval::material::exchange_value;
use crate::position::Position;
use crate::types::{Color, Move, Value};

/// 1手番あたりの取り合いに参加する駒の上限
pub const MAX_ATTACKERS: usize = 16;

#[derive(Debug, Clone, Copy)]
struct Attacker {
    value: i32,
    /// この駒の前にいる駒（動いた後でなければ使えない）
    depends_on: Option<usize>,
    used: bool,
}

/// SEEの作業領域
///
/// 呼び出しごとに作り直すので、呼び出しをまたいで値は残らない。
#[derive(Debug, Default)]
pub struct See {
    arena: SmallVec<[Attacker; 2 * MAX_ATTACKERS]>,
    black: SmallVec<[usize; MAX_ATTACKERS]>,
    white: SmallVec<[usize; MAX_ATTACKERS]>,
}

impl See {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指し手 `mv` による駒交換の損得（手番側から見た値）
    ///
    /// 値が `alpha` 以下・`beta` 以上と分かった時点でそれぞれを返す。
    pub fn search(&mut self, pos: &Position, mv: Move, alpha: Value, beta: Value) -> Value {
        self.run(pos, mv, alpha, beta, false)
    }

    /// x-ray を調べない簡易版
    pub fn search_shallow(&mut self, pos: &Position, mv: Move, alpha: Value, beta: Value) -> Value {
        self.run(pos, mv, alpha, beta, true)
    }

    fn run(&mut self, pos: &Position, mv: Move, alpha: Value, beta: Value, shallow: bool) -> Value {
        debug_assert!(beta <= Value::PIECE_INF);
        debug_assert!(alpha >= -Value::PIECE_INF);

        let target = pos.piece_on(mv.to());
        let captured = if target.is_some() { exchange_value(target.piece_type()) } else { 0 };
        // 成る手は成る前の駒で数える（もともと成っている駒はそのまま）
        let attacker = exchange_value(mv.piece_type());
        let (alpha, beta) = (alpha.raw(), beta.raw());

        if captured <= alpha {
            return Value::new(alpha);
        }
        if captured - attacker >= beta {
            return Value::new(beta);
        }

        self.generate_attackers(pos, mv, shallow);

        let stm = pos.side_to_move();
        Value::new(captured - self.exchange(!stm, attacker, -beta + captured, -alpha + captured))
    }

    /// `side` が `value` の駒を取り返すかどうか
    fn exchange(&mut self, side: Color, value: i32, alpha: i32, beta: i32) -> i32 {
        let list = match side {
            Color::Black => &self.black,
            Color::White => &self.white,
        };
        let next = list.iter().copied().find(|&i| {
            let att = &self.arena[i];
            !att.used && att.depends_on.is_none_or(|d| self.arena[d].used)
        });
        let Some(idx) = next else {
            return 0;
        };

        let att_value = self.arena[idx].value;
        if value - att_value >= beta {
            return beta;
        }
        self.arena[idx].used = true;
        let result = (value - self.exchange(!side, att_value, -beta + value, -alpha + value)).max(0);
        self.arena[idx].used = false;
        result
    }
}
