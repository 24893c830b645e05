//! KPP/KKP評価関数
//!
//! - `feature`: 特徴量インデックスの割り当て
//! - `table`: 学習済みパラメータとファイル入出力
//! - `cache`: 評価値キャッシュ
//! - `evaluator`: 全計算・差分計算・見積もり

pub mod cache;
pub mod config;
pub mod feature;
pub mod material;
pub mod table;

mod evaluator;


pub use cache::EvaluateCache;
pub use config::{EvalConfig, InitMode};
pub use evaluator::{Evaluator, FUTILITY_KING_MARGIN, FUTILITY_MARGIN};
pub use table::FeatureTable;

use crate::types::Value;

/// 駒の配置評価の倍率（positional は駒割りの32倍の分解能で持つ）
pub const POSITIONAL_SCALE: i32 = 32;

/// 駒割りと駒の配置評価の組
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValuePair {
    material: Value,
    positional: Value,
}

impl ValuePair {
    #[inline]
    pub const fn new(material: Value, positional: Value) -> ValuePair {
        ValuePair { material, positional }
    }

    #[inline]
    pub const fn material(self) -> Value {
        self.material
    }

    #[inline]
    pub const fn positional(self) -> Value {
        self.positional
    }

    /// 先手から見た評価値
    #[inline]
    pub fn value(self) -> Value {
        self.material + self.positional / POSITIONAL_SCALE
    }
}

impl std::ops::Add for ValuePair {
    type Output = ValuePair;

    #[inline]
    fn add(self, rhs: ValuePair) -> ValuePair {
        ValuePair::new(self.material + rhs.material, self.positional + rhs.positional)
    }
}

impl std::ops::AddAssign for ValuePair {
    #[inline]
    fn add_assign(&mut self, rhs: ValuePair) {
        self.material += rhs.material;
        self.positional += rhs.positional;
    }
}

impl std::ops::Neg for ValuePair {
    type Output = ValuePair;

    #[inline]
    fn neg(self) -> ValuePair {
        ValuePair::new(-self.material, -self.positional)
    }
}
