//! 置換表エントリ

use crate::search::NodeStat;
use crate::types::{Bound, Move, Value};

/// 置換表エントリ
///
/// ハッシュは64bitすべてを保持し、読み出し時に完全一致を要求する。
/// 詰みスコアは格納時に手数（ply）ぶん補正してある。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TTEntry {
    pub(super) hash: u64,
    pub(super) value: Value,
    pub(super) bound: Bound,
    pub(super) depth: i32,
    pub(super) mv: Move,
    pub(super) age: u8,
    pub(super) stat: u32,
}

impl TTEntry {
    /// 空きスロットか（書き込み済みのエントリは必ず Bound::None 以外を持つ）
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bound == Bound::None
    }

    #[inline]
    pub fn matches(&self, hash: u64) -> bool {
        !self.is_empty() && self.hash == hash
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// 現在の手数 `ply` から見た値
    #[inline]
    pub fn value(&self, ply: i32) -> Value {
        value_from_tt(self.value, ply)
    }

    /// 格納されている生の値（詰みスコアは根からの手数補正前）
    #[inline]
    pub fn raw_value(&self) -> Value {
        self.value
    }

    #[inline]
    pub fn bound(&self) -> Bound {
        self.bound
    }

    #[inline]
    pub fn depth(&self) -> i32 {
        self.depth
    }

    #[inline]
    pub fn mv(&self) -> Move {
        self.mv
    }

    #[inline]
    pub fn age(&self) -> u8 {
        self.age
    }

    #[inline]
    pub fn stat(&self) -> NodeStat {
        NodeStat::from(self.stat)
    }
}

/// 詰みスコアを「この局面から何手」に直して格納する
#[inline]
pub(super) fn value_to_tt(v: Value, ply: i32) -> Value {
    if v >= Value::MATE_IN_MAX_PLY {
        v + Value::new(ply)
    } else if v <= Value::MATED_IN_MAX_PLY {
        v - Value::new(ply)
    } else {
        v
    }
}

#[inline]
pub(super) fn value_from_tt(v: Value, ply: i32) -> Value {
    if v >= Value::MATE_IN_MAX_PLY {
        v - Value::new(ply)
    } else if v <= Value::MATED_IN_MAX_PLY {
        v + Value::new(ply)
    } else {
        v
    }
}
