//! 評価値（Value）
//!
//! 先手有利を正とする固定小数点の整数スコア。
//! `MATE` 付近は詰みスコアとして予約している。

/// 評価値
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Value(i32);

impl Value {
    pub const ZERO: Value = Value(0);
    /// 詰み（勝ち側の最大スコア）
    pub const MATE: Value = Value(32000);
    /// 探索窓の番兵
    pub const INFINITE: Value = Value(32001);
    /// 最大探索深度内での詰みスコア
    pub const MATE_IN_MAX_PLY: Value = Value(Self::MATE.0 - 128);
    /// 最大探索深度内での詰まされスコア
    pub const MATED_IN_MAX_PLY: Value = Value(-Self::MATE_IN_MAX_PLY.0);
    /// 駒の交換値の上限（SEEの探索窓に使う）
    pub const PIECE_INF: Value = Value(15000);

    #[inline]
    pub const fn new(v: i32) -> Value {
        Value(v)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn mate_in(ply: i32) -> Value {
        Value(Self::MATE.0 - ply)
    }

    #[inline]
    pub const fn mated_in(ply: i32) -> Value {
        Value(-Self::MATE.0 + ply)
    }

    #[inline]
    pub const fn is_win(self) -> bool {
        self.0 >= Self::MATE_IN_MAX_PLY.0
    }

    #[inline]
    pub const fn is_loss(self) -> bool {
        self.0 <= Self::MATED_IN_MAX_PLY.0
    }

    /// 探索窓の番兵を越えないよう丸める
    #[inline]
    pub const fn saturate(self) -> Value {
        if self.0 > Self::INFINITE.0 {
            Self::INFINITE
        } else if self.0 < -Self::INFINITE.0 {
            Value(-Self::INFINITE.0)
        } else {
            self
        }
    }
}

impl std::ops::Neg for Value {
    type Output = Value;

    #[inline]
    fn neg(self) -> Value {
        Value(-self.0)
    }
}

impl std::ops::Add for Value {
    type Output = Value;

    #[inline]
    fn add(self, rhs: Value) -> Value {
        Value(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Value {
    type Output = Value;

    #[inline]
    fn sub(self, rhs: Value) -> Value {
        Value(self.0 - rhs.0)
    }
}

impl std::ops::AddAssign for Value {
    #[inline]
    fn add_assign(&mut self, rhs: Value) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for Value {
    #[inline]
    fn sub_assign(&mut self, rhs: Value) {
        self.0 -= rhs.0;
    }
}

impl std::ops::Mul<i32> for Value {
    type Output = Value;

    #[inline]
    fn mul(self, rhs: i32) -> Value {
        Value(self.0 * rhs)
    }
}

impl std::ops::Div<i32> for Value {
    type Output = Value;

    #[inline]
    fn div(self, rhs: i32) -> Value {
        Value(self.0 / rhs)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(v: i32) -> Value {
        Value(v)
    }
}

impl From<Value> for i32 {
    #[inline]
    fn from(v: Value) -> i32 {
        v.0
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
