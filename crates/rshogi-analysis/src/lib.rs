//! # rshogi-analysis
//!
//! 将棋探索の静的解析コア。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Color, Square, Piece, Move, Value, etc.）
//! - `bitboard`: ビットボードと方向ごとの通り道
//! - `position`: 評価・SEEが参照する局面表現（SFEN入出力つき）
//! - `eval`: KPP/KKP評価関数（差分計算・評価値キャッシュ）
//! - `see`: 静的駒交換評価
//! - `tt`: 置換表（Transposition Table）
//! - `search`: 探索制御フラグ
//! - `error`: エラー型
//!

pub mod types;

pub mod bitboard;
pub mod position;

pub mod eval;
pub mod see;

pub mod search;
pub mod tt;

pub mod error;

pub use eval::{EvalConfig, Evaluator, ValuePair};
pub use position::Position;
pub use see::See;
pub use tt::TranspositionTable;
