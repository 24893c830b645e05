//! 基本型モジュール
//!
//! 評価関数・SEE・置換表が共通で使う型を定義する。
//!
//! ```text
//! Color
//!   ↓
//! Square
//!   ↓
//! PieceType → Piece → Move
//!   ↓
//! Hand
//!
//! Value, Bound は独立
//! ```

mod bound;
mod color;
mod hand;
mod moves;
mod piece;
mod piece_type;
mod square;
mod value;

pub use bound::Bound;
pub use color::Color;
pub use hand::Hand;
pub use moves::Move;
pub use piece::Piece;
pub use piece_type::PieceType;
pub use square::Square;
pub use value::Value;
