//! 評価値キャッシュ
//!
//! 手番なしハッシュをキーに駒の配置評価（positional）を保存する。
//! 後から書いたものが勝つ。

use log::debug;

use crate::types::Value;

/// デフォルトのエントリ数（2の冪の指数）
pub const DEFAULT_CACHE_BITS: u32 = 18;

#[derive(Debug, Clone, Copy, Default)]
struct CacheEntry {
    key: u64,
    positional: i32,
    valid: bool,
}

/// 評価値キャッシュ
pub struct EvaluateCache {
    table: Box<[CacheEntry]>,
    mask: usize,
}

impl EvaluateCache {
    /// 2^bits エントリのキャッシュを作る
    pub fn new(bits: u32) -> Self {
        let size = 1usize << bits.min(30);
        debug!(
            "evaluate cache: {size} entries ({} KB)",
            size * std::mem::size_of::<CacheEntry>() / 1024
        );
        Self {
            table: vec![CacheEntry::default(); size].into_boxed_slice(),
            mask: size - 1,
        }
    }

    /// キーが一致したときだけ値を返す
    #[inline]
    pub fn probe(&self, key: u64) -> Option<Value> {
        let entry = &self.table[self.index(key)];
        if entry.valid && entry.key == key { Some(Value::new(entry.positional)) } else { None }
    }

    #[inline]
    pub fn store(&mut self, key: u64, positional: Value) {
        let idx = self.index(key);
        self.table[idx] = CacheEntry { key, positional: positional.raw(), valid: true };
    }

    pub fn clear(&mut self) {
        self.table.fill(CacheEntry::default());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    #[inline]
    pub fn prefetch(&self, key: u64) {
        let entry = &self.table[self.index(key)];

        #[cfg(target_arch = "x86_64")]
        unsafe {
            use std::arch::x86_64::{_MM_HINT_T0, _mm_prefetch};
            _mm_prefetch::<_MM_HINT_T0>(entry as *const CacheEntry as *const i8);
        }

        #[cfg(not(target_arch = "x86_64"))]
        let _ = entry;
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }
}

impl Default for EvaluateCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_BITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_store_probe() {
        let mut cache = EvaluateCache::new(10);
        let key = 0x1234_5678_9ABC_DEF0;
        assert_eq!(cache.probe(key), None);

        cache.store(key, Value::new(-321));
        assert_eq!(cache.probe(key), Some(Value::new(-321)));
    }

    #[test]
    fn test_cache_rejects_other_key_in_same_slot() {
        let mut cache = EvaluateCache::new(4);
        cache.store(0x10, Value::new(5));
        // 下位ビットが同じで上位が違う
        assert_eq!(cache.probe(0x10 | (1 << 40)), None);

        // 後勝ち
        cache.store(0x10 | (1 << 40), Value::new(9));
        assert_eq!(cache.probe(0x10), None);
        assert_eq!(cache.probe(0x10 | (1 << 40)), Some(Value::new(9)));
    }

    #[test]
    fn test_cache_zero_key_is_not_hit_when_empty() {
        let cache = EvaluateCache::new(4);
        assert_eq!(cache.probe(0), None);
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = EvaluateCache::new(8);
        cache.store(42, Value::new(1));
        cache.clear();
        assert_eq!(cache.probe(42), None);
        assert_eq!(cache.len(), 256);
        cache.prefetch(42);
    }
}
