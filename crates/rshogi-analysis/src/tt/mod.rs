//! 置換表モジュール
//!
//! 探索結果をキャッシュする置換表（Transposition Table）。
//!
//! - `TTEntry`: エントリ（局面ハッシュ全体・境界種別・値・深さ・指し手・世代・探索フラグ）
//! - `TranspositionTable`: 4エントリのクラスター配列
//! - 世代管理（`evolve()` で 0..AGE_MAX を巡回）
//! - prefetch

mod entry;
mod table;

pub use entry::TTEntry;
pub use table::{Cluster, TranspositionTable};

/// 1クラスターあたりのエントリ数
pub const CLUSTER_SIZE: usize = 4;

/// 世代の周期（3bit）
pub const AGE_MAX: u8 = 8;
