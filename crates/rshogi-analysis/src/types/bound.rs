//! 境界値種別（Bound）

use super::Value;

/// 置換表に格納する値の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Bound {
    #[default]
    None = 0,
    /// 上界（fail-low: 真の値はこれ以下）
    Upper = 1,
    /// 下界（fail-high: 真の値はこれ以上）
    Lower = 2,
    Exact = 3,
}

impl Bound {
    /// 探索窓 (alpha, beta) に対する値の種類を判定する
    #[inline]
    pub fn classify(value: Value, alpha: Value, beta: Value) -> Bound {
        if value >= beta {
            Bound::Lower
        } else if value <= alpha {
            Bound::Upper
        } else {
            Bound::Exact
        }
    }

    /// TTカットオフ判定
    #[inline]
    pub fn can_cutoff(self, value: Value, beta: Value) -> bool {
        match self {
            Bound::Exact => true,
            Bound::Lower => value >= beta,
            Bound::Upper => value < beta,
            Bound::None => false,
        }
    }
}
