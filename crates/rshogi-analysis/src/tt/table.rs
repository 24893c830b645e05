//! TranspositionTable本体
//!
//! - Cluster: 同じインデックスに割り当たるエントリのグループ
//! - TranspositionTable: テーブル本体
//! - entry/get操作

use log::debug;

use super::entry::{value_to_tt, TTEntry};
use super::{AGE_MAX, CLUSTER_SIZE};
use crate::search::NodeStat;
use crate::types::{Bound, Move, Value};

/// クラスター構造
#[derive(Debug, Clone, Copy, Default)]
pub struct Cluster {
    entries: [TTEntry; CLUSTER_SIZE],
}

impl Cluster {
    pub fn entries(&self) -> &[TTEntry; CLUSTER_SIZE] {
        &self.entries
    }
}

/// 置換表
pub struct TranspositionTable {
    table: Box<[Cluster]>,
    mask: usize,
    age: u8,
}

impl TranspositionTable {
    /// 新しい置換表を作成（サイズはMB単位、クラスター数は2の冪に切り下げ）
    pub fn new(mb_size: usize) -> Self {
        let cluster_count = cluster_count_for(mb_size);
        debug!(
            "transposition table: {mb_size}MB -> {cluster_count} clusters x {CLUSTER_SIZE} entries"
        );
        Self {
            table: vec![Cluster::default(); cluster_count].into_boxed_slice(),
            mask: cluster_count - 1,
            age: 0,
        }
    }

    /// クリア（世代も0に戻す）
    pub fn clear(&mut self) {
        self.age = 0;
        self.table.fill(Cluster::default());
    }

    /// 世代を進める（反復深化の1イテレーションごとに呼ぶ）
    pub fn evolve(&mut self) {
        self.age = (self.age + 1) % AGE_MAX;
    }

    /// 現在の世代
    #[inline]
    pub fn age(&self) -> u8 {
        self.age
    }

    #[inline]
    pub fn cluster_count(&self) -> usize {
        self.table.len()
    }

    /// 探索結果を登録する（書き込んだらtrue）
    #[allow(clippy::too_many_arguments)]
    pub fn entry(
        &mut self,
        hash: u64,
        alpha: Value,
        beta: Value,
        value: Value,
        depth: i32,
        ply: i32,
        stat: NodeStat,
        mv: Move,
    ) -> bool {
        let age = self.age;
        let depth = depth.max(0);
        let idx = self.index(hash);
        let cluster = &mut self.table[idx];

        let mut new_entry = TTEntry {
            hash,
            value: value_to_tt(value, ply),
            bound: Bound::classify(value, alpha, beta),
            depth,
            mv,
            age,
            stat: stat.into(),
        };

        // 同一局面: 同じ世代でより深い結果があるときだけ拒否
        if let Some(slot) = cluster.entries.iter_mut().find(|e| e.matches(hash)) {
            if slot.age == age && slot.depth > depth {
                return false;
            }
            if new_entry.mv.is_none() {
                new_entry.mv = slot.mv;
            }
            *slot = new_entry;
            return true;
        }

        // 置換対象: 空き > 古い世代 > 浅い深さ の順に優先
        let Some(victim) = cluster.entries.iter_mut().min_by_key(|e| replace_priority(e, age))
        else {
            return false;
        };
        if victim.is_empty() || victim.age != age || victim.depth < depth {
            *victim = new_entry;
            true
        } else {
            false
        }
    }

    /// 局面ハッシュが完全一致するエントリを返す
    pub fn get(&self, hash: u64) -> Option<TTEntry> {
        self.table[self.index(hash)]
            .entries
            .iter()
            .find(|e| e.matches(hash))
            .copied()
    }

    /// 指定ハッシュのクラスターをプリフェッチ
    #[inline]
    pub fn prefetch(&self, hash: u64) {
        let cluster = &self.table[self.index(hash)];

        #[cfg(target_arch = "x86_64")]
        unsafe {
            use std::arch::x86_64::{_MM_HINT_T0, _mm_prefetch};
            _mm_prefetch::<_MM_HINT_T0>(cluster as *const Cluster as *const i8);
        }

        #[cfg(not(target_arch = "x86_64"))]
        let _ = cluster;
    }

    /// 使用率（1000分率、先頭1000クラスターのサンプル）
    pub fn hashfull(&self) -> usize {
        let sample = self.table.len().min(1000);
        let used: usize = self.table[..sample]
            .iter()
            .map(|c| c.entries.iter().filter(|e| !e.is_empty() && e.age == self.age).count())
            .sum();
        used * 1000 / (sample * CLUSTER_SIZE)
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }
}

/// 置換されやすさ（小さいほど先に置換される）
#[inline]
fn replace_priority(e: &TTEntry, age: u8) -> (u8, i32) {
    if e.is_empty() {
        (0, 0)
    } else if e.age != age {
        (1, e.depth)
    } else {
        (2, e.depth)
    }
}

fn cluster_count_for(mb_size: usize) -> usize {
    let bytes = mb_size.max(1).saturating_mul(1024 * 1024);
    let count = (bytes / std::mem::size_of::<Cluster>()).max(1);
    if count.is_power_of_two() { count } else { count.next_power_of_two() / 2 }
}
